//! Filter state value object.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ALL_CATEGORIES;
use crate::error::CatalogError;

/// Sort options for browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Relevance,
    /// Cheapest offer, low to high.
    PriceAsc,
    /// Cheapest offer, high to low.
    PriceDesc,
    /// Total stock across offers, high to low.
    Stock,
    /// Best offer rating, high to low.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Relevance,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::Stock,
        SortOption::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Stock => "stock",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Relevance => "Relevance",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Stock => "Available Stock",
            SortOption::Rating => "Best Rated",
        }
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s.trim())
            .ok_or_else(|| CatalogError::InvalidSortKey(s.to_string()))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean shortcut filters keyed to offer badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickFilter {
    BankTransfer,
    SuntrexDelivery,
    Trusted,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 3] = [
        QuickFilter::BankTransfer,
        QuickFilter::SuntrexDelivery,
        QuickFilter::Trusted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuickFilter::BankTransfer => "bankTransfer",
            QuickFilter::SuntrexDelivery => "suntrexDelivery",
            QuickFilter::Trusted => "trusted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickFilter::BankTransfer => "Secured bank transfer",
            QuickFilter::SuntrexDelivery => "SUNTREX Delivery",
            QuickFilter::Trusted => "Trusted seller",
        }
    }
}

impl FromStr for QuickFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bankTransfer" | "bank-transfer" => Ok(QuickFilter::BankTransfer),
            "suntrexDelivery" | "suntrex-delivery" => Ok(QuickFilter::SuntrexDelivery),
            "trusted" => Ok(QuickFilter::Trusted),
            other => Err(CatalogError::InvalidQuickFilter(other.to_string())),
        }
    }
}

/// Quick filter flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuickFilters {
    pub bank_transfer: bool,
    pub suntrex_delivery: bool,
    pub trusted: bool,
}

impl QuickFilters {
    pub fn is_enabled(&self, filter: QuickFilter) -> bool {
        match filter {
            QuickFilter::BankTransfer => self.bank_transfer,
            QuickFilter::SuntrexDelivery => self.suntrex_delivery,
            QuickFilter::Trusted => self.trusted,
        }
    }

    /// Copy with one flag flipped.
    pub fn toggled(mut self, filter: QuickFilter) -> Self {
        let flag = match filter {
            QuickFilter::BankTransfer => &mut self.bank_transfer,
            QuickFilter::SuntrexDelivery => &mut self.suntrex_delivery,
            QuickFilter::Trusted => &mut self.trusted,
        };
        *flag = !*flag;
        self
    }

    /// Enabled flags in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = QuickFilter> + '_ {
        QuickFilter::ALL.into_iter().filter(|f| self.is_enabled(*f))
    }
}

/// The user's current browse selections.
///
/// A plain value: every interaction produces a new `FilterState` through
/// [`Command::apply`](crate::search::Command::apply) and the engine never
/// mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Category id, `"all"` for no restriction.
    pub category: String,
    pub selected_brands: BTreeSet<String>,
    pub selected_types: BTreeSet<String>,
    /// Stringified phase counts ("1", "3").
    pub selected_phases: BTreeSet<String>,
    /// Stringified MPPT counts.
    pub selected_mppts: BTreeSet<String>,
    pub power_min: Option<f64>,
    pub power_max: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub in_stock_only: bool,
    pub quick_filters: QuickFilters,
    pub search_query: String,
    pub sort_by: SortOption,
    /// 1-based page number.
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            selected_brands: BTreeSet::new(),
            selected_types: BTreeSet::new(),
            selected_phases: BTreeSet::new(),
            selected_mppts: BTreeSet::new(),
            power_min: None,
            power_max: None,
            price_min: None,
            price_max: None,
            in_stock_only: false,
            quick_filters: QuickFilters::default(),
            search_query: String::new(),
            sort_by: SortOption::Relevance,
            page: 1,
        }
    }
}

impl FilterState {
    /// Create the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for a browse session, seeded from a navigation URL's
    /// free-text query and category path segment.
    pub fn seeded(query: Option<&str>, category: Option<&str>) -> Self {
        let mut state = Self::default();
        if let Some(q) = query {
            state.search_query = q.to_string();
        }
        if let Some(cat) = category.map(str::trim).filter(|c| !c.is_empty()) {
            state.category = cat.to_string();
        }
        state
    }

    /// The trimmed, lower-cased search query, if it is not blank.
    pub fn normalized_query(&self) -> Option<String> {
        let q = self.search_query.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }

    /// Whether any filter (anything clear-all would reset, besides sort and
    /// page) differs from its default.
    pub fn has_active_filters(&self) -> bool {
        let cleared = Self {
            category: self.category.clone(),
            search_query: self.search_query.clone(),
            sort_by: self.sort_by,
            page: self.page,
            ..Self::default()
        };
        *self != cleared || self.normalized_query().is_some()
    }

    /// Offset of the first item of the requested page.
    pub fn offset(&self, per_page: usize) -> usize {
        (self.page.max(1) as usize - 1) * per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = FilterState::default();
        assert_eq!(state.category, "all");
        assert_eq!(state.page, 1);
        assert_eq!(state.sort_by, SortOption::Relevance);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_seeded() {
        let state = FilterState::seeded(Some("huawei"), Some("inverters"));
        assert_eq!(state.search_query, "huawei");
        assert_eq!(state.category, "inverters");
        assert!(state.has_active_filters());

        let state = FilterState::seeded(None, Some(""));
        assert_eq!(state.category, "all");
    }

    #[test]
    fn test_normalized_query() {
        let mut state = FilterState::default();
        assert_eq!(state.normalized_query(), None);
        state.search_query = "   ".to_string();
        assert_eq!(state.normalized_query(), None);
        state.search_query = "  HUAWEI Sun ".to_string();
        assert_eq!(state.normalized_query().as_deref(), Some("huawei sun"));
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("price-asc".parse::<SortOption>().unwrap(), SortOption::PriceAsc);
        assert_eq!("stock".parse::<SortOption>().unwrap(), SortOption::Stock);
        assert!("cheapest".parse::<SortOption>().is_err());
        for opt in SortOption::ALL {
            assert_eq!(opt.as_str().parse::<SortOption>().unwrap(), opt);
        }
    }

    #[test]
    fn test_sort_option_serde() {
        let json = serde_json::to_string(&SortOption::PriceDesc).unwrap();
        assert_eq!(json, "\"price-desc\"");
    }

    #[test]
    fn test_quick_filters_toggle() {
        let flags = QuickFilters::default().toggled(QuickFilter::Trusted);
        assert!(flags.trusted);
        assert!(!flags.bank_transfer);
        assert_eq!(flags.enabled().collect::<Vec<_>>(), vec![QuickFilter::Trusted]);
        assert!(!flags.toggled(QuickFilter::Trusted).trusted);
    }

    #[test]
    fn test_blank_query_is_not_a_filter() {
        let state = FilterState {
            search_query: "   ".to_string(),
            ..FilterState::default()
        };
        assert!(!state.has_active_filters());
        assert!(state.active_tags().is_empty());

        let state = FilterState {
            search_query: " sun ".to_string(),
            ..FilterState::default()
        };
        assert!(state.has_active_filters());
    }

    #[test]
    fn test_sort_and_page_are_not_filters() {
        let state = FilterState {
            sort_by: SortOption::Stock,
            page: 4,
            category: "batteries".to_string(),
            ..FilterState::default()
        };
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_offset() {
        let state = FilterState {
            page: 3,
            ..FilterState::default()
        };
        assert_eq!(state.offset(12), 24);
    }

    #[test]
    fn test_deserialize_partial_state() {
        let state: FilterState =
            serde_json::from_str(r#"{"selectedBrands":["Huawei"],"sortBy":"stock"}"#).unwrap();
        assert!(state.selected_brands.contains("Huawei"));
        assert_eq!(state.sort_by, SortOption::Stock);
        assert_eq!(state.category, "all");
        assert_eq!(state.page, 1);
    }
}
