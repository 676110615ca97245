//! Faceted product browsing for the Suntrex solar marketplace.
//!
//! This crate turns an immutable catalog snapshot and a filter state into one
//! page of results:
//!
//! - **Catalog**: Products, seller offers, category counts, ingestion checks
//! - **Search**: Filter state and commands, filter pipeline, sorting,
//!   pagination, facet options, active filter tags, deep links
//! - **View**: The `recompute` entry point and an optional memo cache
//!
//! # Example
//!
//! ```rust,ignore
//! use suntrex_catalog::prelude::*;
//!
//! let catalog = Catalog::from_json(&std::fs::read_to_string("catalog.json")?)?;
//! let facets = FacetOptions::derive(&catalog);
//!
//! let state = FilterState::seeded(Some("huawei"), Some("inverters"))
//!     .apply_all(&[
//!         Command::TogglePhase("3".into()),
//!         Command::SetPriceRange(Some(500.0), Some(2000.0)),
//!         Command::SetSort(SortOption::PriceAsc),
//!     ]);
//!
//! let view = recompute(&catalog, &state, DEFAULT_PAGE_SIZE);
//! println!("{} products, page {}/{}", view.total_result_count, view.current_page, view.total_pages);
//! ```

pub mod error;
pub mod ids;

pub mod catalog;
pub mod search;
pub mod view;

pub use error::{CatalogError, CatalogResult};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::ids::*;

    // Catalog
    pub use crate::catalog::{Catalog, CategorySummary, Delivery, Offer, OfferBadges, Product};

    // Search
    pub use crate::search::{
        ActiveTag, Command, FacetOptions, FilterState, Pagination, QuickFilter, SearchResults,
        SortOption, DEFAULT_PAGE_SIZE,
    };

    // View
    pub use crate::view::{recompute, ViewCache, ViewModel};
}
