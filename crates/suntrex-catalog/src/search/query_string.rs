//! Deep-link encoding of a filter state as a URL query string.
//!
//! Multi-select filters repeat their key (`brand=Huawei&brand=Deye`). Unknown
//! keys and unparsable values are ignored so a stale link still opens.

use std::str::FromStr;

use crate::catalog::is_all;
use crate::search::command::{parse_bound, Command};
use crate::search::state::{FilterState, QuickFilter, SortOption};

impl FilterState {
    /// Parse a URL query string (with or without the leading `?`).
    ///
    /// Bounds go through the same validation as user edits, so an inverted
    /// range keeps only the first bound seen.
    pub fn from_query_string(qs: &str) -> Self {
        let qs = qs.strip_prefix('?').unwrap_or(qs);
        let mut state = FilterState::default();
        let mut page = 1;

        for pair in qs.split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = percent_decode(parts.next().unwrap_or(""));

            let command = match key {
                "q" => Some(Command::SetSearchQuery(value)),
                "category" => Some(Command::SetCategory(value)),
                "brand" if !state.selected_brands.contains(&value) => {
                    Some(Command::ToggleBrand(value))
                }
                "type" if !state.selected_types.contains(&value) => Some(Command::ToggleType(value)),
                "phase" if !state.selected_phases.contains(&value) => {
                    Some(Command::TogglePhase(value))
                }
                "mppt" if !state.selected_mppts.contains(&value) => Some(Command::ToggleMppt(value)),
                "powerMin" => parse_bound(&value).ok().map(Command::SetPowerMin),
                "powerMax" => parse_bound(&value).ok().map(Command::SetPowerMax),
                "priceMin" => parse_bound(&value).ok().map(Command::SetPriceMin),
                "priceMax" => parse_bound(&value).ok().map(Command::SetPriceMax),
                "inStock" if is_truthy(&value) && !state.in_stock_only => Some(Command::ToggleInStock),
                "sort" => SortOption::from_str(&value).ok().map(Command::SetSort),
                "page" => {
                    page = value.parse().unwrap_or(1);
                    None
                }
                other => QuickFilter::from_str(other)
                    .ok()
                    .filter(|f| is_truthy(&value) && !state.quick_filters.is_enabled(*f))
                    .map(Command::ToggleQuickFilter),
            };

            if let Some(command) = command {
                state = command.apply(&state);
            }
        }

        Command::GoToPage(page).apply(&state)
    }

    /// Encode the non-default fields as a query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if !self.search_query.is_empty() {
            pairs.push(("q", self.search_query.clone()));
        }
        if !is_all(&self.category) {
            pairs.push(("category", self.category.clone()));
        }
        pairs.extend(self.selected_brands.iter().map(|v| ("brand", v.clone())));
        pairs.extend(self.selected_types.iter().map(|v| ("type", v.clone())));
        pairs.extend(self.selected_phases.iter().map(|v| ("phase", v.clone())));
        pairs.extend(self.selected_mppts.iter().map(|v| ("mppt", v.clone())));

        let bounds = [
            ("powerMin", self.power_min),
            ("powerMax", self.power_max),
            ("priceMin", self.price_min),
            ("priceMax", self.price_max),
        ];
        pairs.extend(
            bounds
                .into_iter()
                .filter_map(|(key, bound)| bound.map(|b| (key, b.to_string()))),
        );

        if self.in_stock_only {
            pairs.push(("inStock", "1".to_string()));
        }
        pairs.extend(
            self.quick_filters
                .enabled()
                .map(|f| (f.as_str(), "1".to_string())),
        );
        if self.sort_by != SortOption::Relevance {
            pairs.push(("sort", self.sort_by.as_str().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }

        pairs
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, percent_encode(&value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}

/// Decode `%XX` escapes and `+` as space. Invalid escapes are kept verbatim.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Encode everything except RFC 3986 unreserved characters.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
