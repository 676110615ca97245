//! Filter state transitions.
//!
//! Every user interaction is a [`Command`]; applying it to a [`FilterState`]
//! yields a new state. Every command except [`Command::GoToPage`] resets the
//! page to 1. Range edits that would invert `min > max`, or that carry a
//! negative or non-finite bound, are rejected and leave the state unchanged.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ALL_CATEGORIES;
use crate::error::{CatalogError, CatalogResult};
use crate::search::state::{FilterState, QuickFilter, SortOption};

/// Numeric range facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeFacet {
    Power,
    Price,
}

impl fmt::Display for RangeFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeFacet::Power => f.write_str("power"),
            RangeFacet::Price => f.write_str("price"),
        }
    }
}

/// Which end of a range an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundSide {
    Min,
    Max,
}

/// A user action on the browse surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "camelCase")]
pub enum Command {
    SetCategory(String),
    ToggleBrand(String),
    ToggleType(String),
    TogglePhase(String),
    ToggleMppt(String),
    SetPowerMin(Option<f64>),
    SetPowerMax(Option<f64>),
    SetPowerRange(Option<f64>, Option<f64>),
    SetPriceMin(Option<f64>),
    SetPriceMax(Option<f64>),
    SetPriceRange(Option<f64>, Option<f64>),
    ToggleInStock,
    ToggleQuickFilter(QuickFilter),
    SetSearchQuery(String),
    SetSort(SortOption),
    GoToPage(u32),
    ClearAll,
}

impl Command {
    /// Build a single-bound edit from raw user input. Blank input clears the
    /// bound.
    pub fn bound_from_input(facet: RangeFacet, side: BoundSide, raw: &str) -> CatalogResult<Self> {
        let value = parse_bound(raw)?;
        Ok(match (facet, side) {
            (RangeFacet::Power, BoundSide::Min) => Command::SetPowerMin(value),
            (RangeFacet::Power, BoundSide::Max) => Command::SetPowerMax(value),
            (RangeFacet::Price, BoundSide::Min) => Command::SetPriceMin(value),
            (RangeFacet::Price, BoundSide::Max) => Command::SetPriceMax(value),
        })
    }

    /// Whether the host should scroll the result list back to the top.
    pub fn scrolls_to_top(&self) -> bool {
        matches!(self, Command::GoToPage(_))
    }

    /// Apply the command, returning `state` unchanged if the edit is rejected.
    pub fn apply(&self, state: &FilterState) -> FilterState {
        match self.try_apply(state) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(command = ?self, error = %err, "rejected filter edit");
                state.clone()
            }
        }
    }

    /// Apply the command, reporting why an edit was rejected.
    pub fn try_apply(&self, state: &FilterState) -> CatalogResult<FilterState> {
        let mut next = state.clone();

        match self {
            Command::SetCategory(category) => {
                let category = category.trim();
                next.category = if category.is_empty() {
                    ALL_CATEGORIES.to_string()
                } else {
                    category.to_string()
                };
            }
            Command::ToggleBrand(brand) => toggle(&mut next.selected_brands, brand),
            Command::ToggleType(product_type) => toggle(&mut next.selected_types, product_type),
            Command::TogglePhase(phase) => toggle(&mut next.selected_phases, phase),
            Command::ToggleMppt(mppt) => toggle(&mut next.selected_mppts, mppt),
            Command::SetPowerMin(min) => {
                let (min, max) = checked_range(RangeFacet::Power, *min, state.power_max)?;
                next.power_min = min;
                next.power_max = max;
            }
            Command::SetPowerMax(max) => {
                let (min, max) = checked_range(RangeFacet::Power, state.power_min, *max)?;
                next.power_min = min;
                next.power_max = max;
            }
            Command::SetPowerRange(min, max) => {
                let (min, max) = checked_range(RangeFacet::Power, *min, *max)?;
                next.power_min = min;
                next.power_max = max;
            }
            Command::SetPriceMin(min) => {
                let (min, max) = checked_range(RangeFacet::Price, *min, state.price_max)?;
                next.price_min = min;
                next.price_max = max;
            }
            Command::SetPriceMax(max) => {
                let (min, max) = checked_range(RangeFacet::Price, state.price_min, *max)?;
                next.price_min = min;
                next.price_max = max;
            }
            Command::SetPriceRange(min, max) => {
                let (min, max) = checked_range(RangeFacet::Price, *min, *max)?;
                next.price_min = min;
                next.price_max = max;
            }
            Command::ToggleInStock => next.in_stock_only = !next.in_stock_only,
            Command::ToggleQuickFilter(filter) => {
                next.quick_filters = next.quick_filters.toggled(*filter);
            }
            Command::SetSearchQuery(query) => next.search_query = query.clone(),
            Command::SetSort(sort) => next.sort_by = *sort,
            Command::GoToPage(page) => {
                next.page = (*page).max(1);
                return Ok(next);
            }
            Command::ClearAll => {
                next = FilterState {
                    category: state.category.clone(),
                    ..FilterState::default()
                };
            }
        }

        next.page = 1;
        Ok(next)
    }
}

impl FilterState {
    /// Apply a sequence of commands in order.
    pub fn apply_all<'a>(&self, commands: impl IntoIterator<Item = &'a Command>) -> FilterState {
        commands
            .into_iter()
            .fold(self.clone(), |state, command| command.apply(&state))
    }

    /// Edit one range bound from raw text input. Non-numeric, negative or
    /// inverting input leaves the state unchanged.
    pub fn edit_bound(&self, facet: RangeFacet, side: BoundSide, raw: &str) -> FilterState {
        match Command::bound_from_input(facet, side, raw) {
            Ok(command) => command.apply(self),
            Err(err) => {
                tracing::debug!(%facet, input = raw, error = %err, "rejected bound input");
                self.clone()
            }
        }
    }
}

/// Parse a bound typed by the user. Blank means "unbounded".
pub fn parse_bound(raw: &str) -> CatalogResult<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| CatalogError::InvalidBound(raw.to_string()))?;
    check_bound(Some(value))
}

fn check_bound(value: Option<f64>) -> CatalogResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(CatalogError::InvalidBound(v.to_string())),
        other => Ok(other),
    }
}

fn checked_range(
    facet: RangeFacet,
    min: Option<f64>,
    max: Option<f64>,
) -> CatalogResult<(Option<f64>, Option<f64>)> {
    let min = check_bound(min)?;
    let max = check_bound(max)?;
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(CatalogError::InvertedRange {
                facet: facet.to_string(),
                min: lo,
                max: hi,
            });
        }
    }
    Ok((min, max))
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
