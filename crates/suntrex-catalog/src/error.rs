//! Catalog error types.

use thiserror::Error;

/// Result type used across the catalog crate.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised at the catalog boundary.
///
/// Everything here is either an ingestion contract violation (the loader handed
/// us a malformed document) or a rejected user edit. Query evaluation itself
/// never fails.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A product record has an empty identifier.
    #[error("Product at position {0} has an empty id")]
    EmptyId(usize),

    /// A product was supplied without any offers.
    #[error("Product {0} has no offers")]
    NoOffers(String),

    /// Two products share the same identifier.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product field is out of its allowed domain.
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: String, reason: String },

    /// An offer field is out of its allowed domain.
    #[error("Invalid offer from seller {seller_id} on product {product_id}: {reason}")]
    InvalidOffer {
        product_id: String,
        seller_id: String,
        reason: String,
    },

    /// A range bound could not be parsed or is not a finite, non-negative number.
    #[error("Invalid range bound: {0}")]
    InvalidBound(String),

    /// A range edit would leave `min > max`.
    #[error("Invalid {facet} range: min {min} is greater than max {max}")]
    InvertedRange { facet: String, min: f64, max: f64 },

    /// Unknown sort key.
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    /// Unknown quick filter name.
    #[error("Invalid quick filter: {0}")]
    InvalidQuickFilter(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    pub(crate) fn invalid_product(product_id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProduct {
            product_id: product_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_offer(
        product_id: &str,
        seller_id: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOffer {
            product_id: product_id.to_string(),
            seller_id: seller_id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
