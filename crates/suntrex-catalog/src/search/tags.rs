//! Active filter tags.
//!
//! Each non-default filter value becomes one removable tag. Multi-select
//! values get one tag each, the power and price ranges get one combined tag
//! each. Removing a tag applies exactly the transition that undoes that value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::command::Command;
use crate::search::state::{FilterState, QuickFilter};

/// A removable representation of one active filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ActiveTag {
    Brand(String),
    Type(String),
    Phase(String),
    Mppt(String),
    PowerRange { min: Option<f64>, max: Option<f64> },
    PriceRange { min: Option<f64>, max: Option<f64> },
    InStock,
    QuickFilter(QuickFilter),
    Search(String),
}

impl ActiveTag {
    /// Stable identifier, unique within one state's tag list.
    pub fn key(&self) -> String {
        match self {
            ActiveTag::Brand(v) => format!("brand:{v}"),
            ActiveTag::Type(v) => format!("type:{v}"),
            ActiveTag::Phase(v) => format!("phase:{v}"),
            ActiveTag::Mppt(v) => format!("mppt:{v}"),
            ActiveTag::PowerRange { .. } => "power".to_string(),
            ActiveTag::PriceRange { .. } => "price".to_string(),
            ActiveTag::InStock => "inStock".to_string(),
            ActiveTag::QuickFilter(f) => format!("quick:{}", f.as_str()),
            ActiveTag::Search(_) => "search".to_string(),
        }
    }

    /// Chip text.
    pub fn label(&self) -> String {
        match self {
            ActiveTag::Brand(v) | ActiveTag::Type(v) => v.clone(),
            ActiveTag::Phase(v) if v == "1" => "1 phase".to_string(),
            ActiveTag::Phase(v) => format!("{v} phases"),
            ActiveTag::Mppt(v) => format!("{v} MPPT"),
            ActiveTag::PowerRange { min, max } => format!("Power: {}", range_text(*min, *max, " kW")),
            ActiveTag::PriceRange { min, max } => format!("Price: {}", range_text(*min, *max, "")),
            ActiveTag::InStock => "In stock".to_string(),
            ActiveTag::QuickFilter(f) => f.label().to_string(),
            ActiveTag::Search(q) => format!("\"{q}\""),
        }
    }

    /// The transition that removes this tag's value and nothing else.
    pub fn removal_command(&self) -> Command {
        match self {
            ActiveTag::Brand(v) => Command::ToggleBrand(v.clone()),
            ActiveTag::Type(v) => Command::ToggleType(v.clone()),
            ActiveTag::Phase(v) => Command::TogglePhase(v.clone()),
            ActiveTag::Mppt(v) => Command::ToggleMppt(v.clone()),
            ActiveTag::PowerRange { .. } => Command::SetPowerRange(None, None),
            ActiveTag::PriceRange { .. } => Command::SetPriceRange(None, None),
            ActiveTag::InStock => Command::ToggleInStock,
            ActiveTag::QuickFilter(f) => Command::ToggleQuickFilter(*f),
            ActiveTag::Search(_) => Command::SetSearchQuery(String::new()),
        }
    }
}

impl fmt::Display for ActiveTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

fn range_text(min: Option<f64>, max: Option<f64>, unit: &str) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("{lo} - {hi}{unit}"),
        (Some(lo), None) => format!(">= {lo}{unit}"),
        (None, Some(hi)) => format!("<= {hi}{unit}"),
        (None, None) => "any".to_string(),
    }
}

impl FilterState {
    /// One tag per active filter value.
    pub fn active_tags(&self) -> Vec<ActiveTag> {
        let mut tags: Vec<ActiveTag> = Vec::new();

        tags.extend(self.selected_brands.iter().cloned().map(ActiveTag::Brand));
        tags.extend(self.selected_types.iter().cloned().map(ActiveTag::Type));
        tags.extend(self.selected_phases.iter().cloned().map(ActiveTag::Phase));
        tags.extend(self.selected_mppts.iter().cloned().map(ActiveTag::Mppt));

        if self.power_min.is_some() || self.power_max.is_some() {
            tags.push(ActiveTag::PowerRange {
                min: self.power_min,
                max: self.power_max,
            });
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            tags.push(ActiveTag::PriceRange {
                min: self.price_min,
                max: self.price_max,
            });
        }
        if self.in_stock_only {
            tags.push(ActiveTag::InStock);
        }
        tags.extend(self.quick_filters.enabled().map(ActiveTag::QuickFilter));

        let query = self.search_query.trim();
        if !query.is_empty() {
            tags.push(ActiveTag::Search(query.to_string()));
        }

        tags
    }

    /// Remove one tag. A tag that is not active in this state is a no-op.
    pub fn remove_tag(&self, tag: &ActiveTag) -> FilterState {
        if self.active_tags().contains(tag) {
            tag.removal_command().apply(self)
        } else {
            self.clone()
        }
    }
}
