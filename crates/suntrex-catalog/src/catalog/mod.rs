//! Product catalog module.
//!
//! Contains the product/offer schema, category helpers and the validated
//! catalog snapshot.

mod category;
mod product;
mod store;

pub use category::{is_all, CategorySummary, ALL_CATEGORIES};
pub use product::{Delivery, Offer, OfferBadges, Product};
pub use store::Catalog;
