//! Product and offer types.

use crate::error::{CatalogError, CatalogResult};
use crate::ids::{ProductId, SellerId};
use serde::{Deserialize, Serialize};

/// Who ships an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Delivery {
    /// The seller ships the goods itself.
    #[default]
    #[serde(rename = "self", alias = "seller")]
    SelfDelivery,
    /// Platform-managed delivery.
    #[serde(rename = "suntrex")]
    Suntrex,
}

impl Delivery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delivery::SelfDelivery => "self",
            Delivery::Suntrex => "suntrex",
        }
    }
}

/// Badge flags attached to an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OfferBadges {
    /// Seller accepts secured bank transfer.
    #[serde(default)]
    pub bank_transfer: bool,
    /// Seller is a trusted vendor.
    #[serde(default)]
    pub trusted: bool,
    /// Delivery channel.
    #[serde(default)]
    pub delivery: Delivery,
}

/// One seller's listing of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub seller_id: SellerId,
    pub seller_name: String,
    /// ISO country code of the seller.
    pub country: String,
    /// Seller rating in `[0, 5]`.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    /// Units available.
    #[serde(default)]
    pub stock: u64,
    /// Unit price in base currency.
    pub price: f64,
    #[serde(default)]
    pub badges: OfferBadges,
}

impl Offer {
    /// Create an offer with no badges and no reviews.
    pub fn new(
        seller_id: impl Into<SellerId>,
        seller_name: impl Into<String>,
        price: f64,
        stock: u64,
    ) -> Self {
        Self {
            seller_id: seller_id.into(),
            seller_name: seller_name.into(),
            country: String::new(),
            rating: 0.0,
            reviews: 0,
            stock,
            price,
            badges: OfferBadges::default(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }

    pub fn with_badges(mut self, badges: OfferBadges) -> Self {
        self.badges = badges;
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    fn validate(&self, product_id: &str) -> CatalogResult<()> {
        let seller = self.seller_id.as_str();
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(CatalogError::invalid_offer(
                product_id,
                seller,
                format!("price must be positive, got {}", self.price),
            ));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CatalogError::invalid_offer(
                product_id,
                seller,
                format!("rating must be within [0, 5], got {}", self.rating),
            ));
        }
        Ok(())
    }
}

/// A distinct item in the catalog.
///
/// `power` is shared between inverter/panel output power (kW) and battery
/// capacity (kWh); filters and facets treat it as a single scalar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub power: f64,
    /// 0 (unspecified), 1 or 3.
    #[serde(default)]
    pub phases: u8,
    /// 0 when not applicable.
    #[serde(default)]
    pub mppt: u32,
    /// Never empty once the product is part of a [`Catalog`](crate::catalog::Catalog).
    pub offers: Vec<Offer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_kwh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<String>,
}

impl Product {
    /// Create a product with no offers yet.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        product_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            product_type: product_type.into(),
            power: 0.0,
            phases: 0,
            mppt: 0,
            offers: Vec::new(),
            sku: None,
            capacity_kwh: None,
            dimensions: None,
            weight_kg: None,
            certifications: Vec::new(),
        }
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    pub fn with_phases(mut self, phases: u8) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_mppt(mut self, mppt: u32) -> Self {
        self.mppt = mppt;
        self
    }

    pub fn with_offer(mut self, offer: Offer) -> Self {
        self.offers.push(offer);
        self
    }

    /// Lowest offer price.
    pub fn best_price(&self) -> f64 {
        self.offers
            .iter()
            .map(|o| o.price)
            .fold(f64::INFINITY, f64::min)
    }

    /// Highest offer rating.
    pub fn best_rating(&self) -> f64 {
        self.offers.iter().map(|o| o.rating).fold(0.0, f64::max)
    }

    /// Units available across all offers, saturating at `u64::MAX`.
    pub fn total_stock(&self) -> u64 {
        self.offers
            .iter()
            .map(|o| o.stock)
            .fold(0, u64::saturating_add)
    }

    pub fn is_in_stock(&self) -> bool {
        self.offers.iter().any(Offer::is_in_stock)
    }

    /// Check that the product satisfies the ingestion contract.
    pub fn validate(&self) -> CatalogResult<()> {
        let id = self.id.as_str();
        if self.offers.is_empty() {
            return Err(CatalogError::NoOffers(id.to_string()));
        }
        if !(self.power.is_finite() && self.power >= 0.0) {
            return Err(CatalogError::invalid_product(
                id,
                format!("power must be non-negative, got {}", self.power),
            ));
        }
        if !matches!(self.phases, 0 | 1 | 3) {
            return Err(CatalogError::invalid_product(
                id,
                format!("phases must be 0, 1 or 3, got {}", self.phases),
            ));
        }
        for offer in &self.offers {
            offer.validate(id)?;
        }
        Ok(())
    }
}
