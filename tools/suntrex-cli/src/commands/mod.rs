//! CLI command implementations.

pub mod browse;
pub mod categories;
pub mod config;
pub mod facets;

use clap::{Args, Subcommand};
use suntrex_catalog::search::{QuickFilter, SortOption};

/// Arguments for the browse command.
///
/// Filters are applied in a fixed order on top of the optional deep link:
/// category, search, multi-selects, ranges, toggles, sort, tag removals, page.
#[derive(Args, Debug, Default)]
pub struct BrowseArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,

    /// Start from a deep link query string, e.g. "q=huawei&brand=Deye".
    #[arg(long, value_name = "QUERY")]
    pub link: Option<String>,

    /// Category id ("all" for every category).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Free-text search over name and brand.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Toggle a brand (repeatable).
    #[arg(short, long)]
    pub brand: Vec<String>,

    /// Toggle a product type (repeatable).
    #[arg(short = 't', long = "type")]
    pub product_type: Vec<String>,

    /// Toggle a phase count (repeatable).
    #[arg(long)]
    pub phase: Vec<String>,

    /// Toggle an MPPT count (repeatable).
    #[arg(long)]
    pub mppt: Vec<String>,

    /// Minimum power in kW (blank clears).
    #[arg(long, value_name = "KW")]
    pub power_min: Option<String>,

    /// Maximum power in kW (blank clears).
    #[arg(long, value_name = "KW")]
    pub power_max: Option<String>,

    /// Minimum offer price (blank clears).
    #[arg(long, value_name = "PRICE")]
    pub price_min: Option<String>,

    /// Maximum offer price (blank clears).
    #[arg(long, value_name = "PRICE")]
    pub price_max: Option<String>,

    /// Only products with stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Toggle a quick filter: bank-transfer, suntrex-delivery or trusted (repeatable).
    #[arg(long = "quick", value_name = "FILTER", value_parser = parse_quick_filter)]
    pub quick: Vec<QuickFilter>,

    /// Sort: relevance, price-asc, price-desc, stock or rating.
    #[arg(short, long, value_parser = parse_sort)]
    pub sort: Option<SortOption>,

    /// Reset every filter except the category before applying flags.
    #[arg(long)]
    pub clear: bool,

    /// Remove an active filter by tag key, e.g. "brand:Huawei" or "price" (repeatable).
    #[arg(long, value_name = "KEY")]
    pub remove_tag: Vec<String>,

    /// Page number (1-based, clamped to the last page).
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Products per page (default: browse.page_size from config).
    #[arg(long)]
    pub page_size: Option<usize>,
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_quick_filter(s: &str) -> Result<QuickFilter, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Arguments for the facets command.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the categories command.
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Catalog JSON file (default: catalog.path from config).
    #[arg(long)]
    pub catalog: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Catalog path to write into the new config.
        #[arg(long, default_value = "catalog.json")]
        catalog: String,

        /// Overwrite an existing config without asking.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
