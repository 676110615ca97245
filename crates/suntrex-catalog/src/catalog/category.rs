//! Category selection and summaries.

use serde::{Deserialize, Serialize};

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Whether a category selection matches every product.
pub fn is_all(category: &str) -> bool {
    category == ALL_CATEGORIES
}

/// A category present in the catalog with its product count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category identifier (`"all"` for the synthetic entry).
    pub id: String,
    /// Number of products in this category, over the full catalog.
    pub count: usize,
}

impl CategorySummary {
    pub fn new(id: impl Into<String>, count: usize) -> Self {
        Self {
            id: id.into(),
            count,
        }
    }

    /// Whether this is the synthetic "all products" entry.
    pub fn is_all(&self) -> bool {
        is_all(&self.id)
    }
}
