//! View recomputation and result memoization.
//!
//! [`recompute`] is the single entry point from a catalog snapshot and a filter
//! state to what a renderer needs. It is pure; [`ViewCache`] is an optional,
//! caller-owned memo keyed by `(CatalogVersion, FilterState, page_size)`.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::ids::CatalogVersion;
use crate::search::{evaluate, paginate, sort_products, ActiveTag, FilterState, Pagination, SortOption};

/// Everything the renderer needs for one page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Products on the current page, in display order.
    pub products: Vec<Product>,
    pub pagination: Pagination,
    /// Page actually shown, after clamping. Mirrors `pagination.page`.
    pub current_page: usize,
    /// Mirrors `pagination.total_pages`.
    pub total_pages: usize,
    /// Number of products matching the filters, across all pages.
    pub total_result_count: usize,
    /// Number of offers on the matching products, across all pages.
    pub total_offer_count: usize,
    pub active_tags: Vec<ActiveTag>,
    pub sort_by: SortOption,
}

impl ViewModel {
    /// Whether the renderer should show its "no results" state.
    pub fn is_empty(&self) -> bool {
        self.total_result_count == 0
    }
}

/// Run filter, sort and pagination for one state.
pub fn recompute(catalog: &Catalog, state: &FilterState, page_size: usize) -> ViewModel {
    let matched = sort_products(evaluate(catalog, state), state.sort_by);
    let total_result_count = matched.len();
    let total_offer_count = matched.iter().map(|p| p.offers.len()).sum();

    let page = paginate(matched, state.page, page_size).map(Product::clone);

    tracing::debug!(
        sort = %state.sort_by,
        page = page.pagination.page,
        total_pages = page.pagination.total_pages,
        results = total_result_count,
        "view recomputed"
    );

    ViewModel {
        products: page.items,
        current_page: page.pagination.page,
        total_pages: page.pagination.total_pages,
        pagination: page.pagination,
        total_result_count,
        total_offer_count,
        active_tags: state.active_tags(),
        sort_by: state.sort_by,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ViewKey {
    version: CatalogVersion,
    state: FilterState,
    page_size: usize,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Bounded most-recently-used memo of view models.
///
/// Keys compare by value; an entry's key is never modified after insertion.
/// Entries for an older catalog version are never returned for a newer one.
#[derive(Debug)]
pub struct ViewCache {
    capacity: usize,
    entries: VecDeque<(ViewKey, Arc<ViewModel>)>,
    stats: CacheStats,
}

impl ViewCache {
    /// Create a cache holding at most `capacity` views (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// Return the memoized view or compute and remember it.
    pub fn get_or_compute(
        &mut self,
        catalog: &Catalog,
        state: &FilterState,
        page_size: usize,
    ) -> Arc<ViewModel> {
        let key = ViewKey {
            version: catalog.version(),
            state: state.clone(),
            page_size,
        };

        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.stats.hits += 1;
            tracing::trace!(version = %key.version, "view cache hit");
            if let Some(entry) = self.entries.remove(pos) {
                let view = Arc::clone(&entry.1);
                self.entries.push_front(entry);
                return view;
            }
        }

        self.stats.misses += 1;
        tracing::trace!(version = %key.version, "view cache miss");

        let view = Arc::new(recompute(catalog, state, page_size));
        if self.entries.len() >= self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front((key, Arc::clone(&view)));
        view
    }

    /// Drop entries belonging to any catalog version other than `current`.
    pub fn retain_version(&mut self, current: CatalogVersion) {
        self.entries.retain(|(k, _)| k.version == current);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new(32)
    }
}
