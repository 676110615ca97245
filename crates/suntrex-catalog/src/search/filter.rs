//! Filter predicates and catalog evaluation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{is_all, Catalog, Delivery, Product};
use crate::search::state::{FilterState, QuickFilter};

/// One stage of the filter pipeline.
///
/// Stages combine with AND; multi-select stages match when the product's value
/// is any of the selected values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Product category equals the selection.
    Category(String),
    /// Brand is one of the selected brands.
    Brands(BTreeSet<String>),
    /// Product type is one of the selected types.
    Types(BTreeSet<String>),
    /// Stringified phase count is one of the selections.
    Phases(BTreeSet<String>),
    /// Stringified MPPT count is one of the selections.
    Mppts(BTreeSet<String>),
    /// Lower-cased substring of name or brand.
    Text(String),
    /// Some offer has stock.
    InStock,
    /// Some offer carries the badge.
    Quick(QuickFilter),
    /// `Product.power` within the bounds.
    PowerRange { min: Option<f64>, max: Option<f64> },
    /// Some offer is at or above `min`, and some (possibly different) offer is
    /// at or below `max`.
    PriceRange { min: Option<f64>, max: Option<f64> },
}

impl Filter {
    /// Create a text search filter. Returns `None` for a blank query.
    pub fn text(query: &str) -> Option<Self> {
        let q = query.trim();
        (!q.is_empty()).then(|| Filter::Text(q.to_lowercase()))
    }

    /// The active stages for a filter state, in pipeline order.
    pub fn from_state(state: &FilterState) -> Vec<Filter> {
        let mut filters = Vec::new();

        if !is_all(&state.category) {
            filters.push(Filter::Category(state.category.clone()));
        }
        if !state.selected_brands.is_empty() {
            filters.push(Filter::Brands(state.selected_brands.clone()));
        }
        if !state.selected_types.is_empty() {
            filters.push(Filter::Types(state.selected_types.clone()));
        }
        if !state.selected_phases.is_empty() {
            filters.push(Filter::Phases(state.selected_phases.clone()));
        }
        if !state.selected_mppts.is_empty() {
            filters.push(Filter::Mppts(state.selected_mppts.clone()));
        }
        if let Some(text) = Filter::text(&state.search_query) {
            filters.push(text);
        }
        if state.in_stock_only {
            filters.push(Filter::InStock);
        }
        filters.extend(state.quick_filters.enabled().map(Filter::Quick));
        if state.power_min.is_some() || state.power_max.is_some() {
            filters.push(Filter::PowerRange {
                min: state.power_min,
                max: state.power_max,
            });
        }
        if state.price_min.is_some() || state.price_max.is_some() {
            filters.push(Filter::PriceRange {
                min: state.price_min,
                max: state.price_max,
            });
        }

        filters
    }

    /// Whether a product passes this stage.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(category) => product.category == *category,
            Filter::Brands(brands) => brands.contains(&product.brand),
            Filter::Types(types) => types.contains(&product.product_type),
            Filter::Phases(phases) => phases.contains(&product.phases.to_string()),
            Filter::Mppts(mppts) => mppts.contains(&product.mppt.to_string()),
            Filter::Text(q) => {
                product.name.to_lowercase().contains(q.as_str())
                    || product.brand.to_lowercase().contains(q.as_str())
            }
            Filter::InStock => product.is_in_stock(),
            Filter::Quick(QuickFilter::BankTransfer) => {
                product.offers.iter().any(|o| o.badges.bank_transfer)
            }
            Filter::Quick(QuickFilter::SuntrexDelivery) => product
                .offers
                .iter()
                .any(|o| o.badges.delivery == Delivery::Suntrex),
            Filter::Quick(QuickFilter::Trusted) => product.offers.iter().any(|o| o.badges.trusted),
            Filter::PowerRange { min, max } => {
                min.map_or(true, |lo| product.power >= lo) && max.map_or(true, |hi| product.power <= hi)
            }
            Filter::PriceRange { min, max } => {
                min.map_or(true, |lo| product.offers.iter().any(|o| o.price >= lo))
                    && max.map_or(true, |hi| product.offers.iter().any(|o| o.price <= hi))
            }
        }
    }

    /// Stable stage name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Category(_) => "category",
            Filter::Brands(_) => "brand",
            Filter::Types(_) => "type",
            Filter::Phases(_) => "phases",
            Filter::Mppts(_) => "mppt",
            Filter::Text(_) => "text",
            Filter::InStock => "stock",
            Filter::Quick(filter) => filter.as_str(),
            Filter::PowerRange { .. } => "power",
            Filter::PriceRange { .. } => "price",
        }
    }
}

/// Apply every active stage of `state` to the catalog.
///
/// The result keeps catalog order; sorting is a separate step.
pub fn evaluate<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Product> {
    let filters = Filter::from_state(state);
    let matched: Vec<&Product> = catalog
        .all()
        .iter()
        .filter(|product| filters.iter().all(|f| f.matches(product)))
        .collect();

    tracing::debug!(
        version = %catalog.version(),
        stages = ?filters.iter().map(Filter::name).collect::<Vec<_>>(),
        matched = matched.len(),
        total = catalog.len(),
        "catalog evaluated"
    );

    matched
}
