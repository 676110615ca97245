//! The immutable catalog snapshot.

use std::collections::HashSet;

use crate::catalog::category::{is_all, CategorySummary, ALL_CATEGORIES};
use crate::catalog::Product;
use crate::error::{CatalogError, CatalogResult};
use crate::ids::{CatalogVersion, ProductId};

/// Read-only collection of products supplied once by an external loader.
///
/// Construction validates every record; a `Catalog` value therefore always
/// satisfies the ingestion contract (unique ids, at least one offer per
/// product). Reloading means building a new `Catalog`, which gets a new
/// [`CatalogVersion`].
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    version: CatalogVersion,
}

impl Catalog {
    /// Validate and wrap a product list, preserving its order.
    pub fn new(products: Vec<Product>) -> CatalogResult<Self> {
        let mut seen: HashSet<&ProductId> = HashSet::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if product.id.is_blank() {
                return Err(CatalogError::EmptyId(position));
            }
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.to_string()));
            }
            product.validate()?;
        }

        let version = CatalogVersion::next();
        tracing::debug!(
            %version,
            products = products.len(),
            offers = products.iter().map(|p| p.offers.len()).sum::<usize>(),
            "catalog ingested"
        );

        Ok(Self { products, version })
    }

    /// Parse a JSON array of products and validate it.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// All products in ingestion order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products of one category, in ingestion order. `"all"` yields everything.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> + 'a {
        self.products
            .iter()
            .filter(move |p| is_all(category) || p.category == category)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    pub fn version(&self) -> CatalogVersion {
        self.version
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category counts over the full catalog, `"all"` first, then categories
    /// in first-seen order.
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut summaries = vec![CategorySummary::new(ALL_CATEGORIES, self.products.len())];
        for product in &self.products {
            match summaries[1..].iter_mut().find(|s| s.id == product.category) {
                Some(summary) => summary.count += 1,
                None => summaries.push(CategorySummary::new(product.category.clone(), 1)),
            }
        }
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Offer;

    fn product(id: &str, category: &str) -> Product {
        Product::new(id, format!("Product {id}"), "Huawei", category, "String")
            .with_offer(Offer::new("S01", "SolarTech DE", 100.0, 10))
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = Catalog::new(vec![
            product("B", "batteries"),
            product("A", "inverters"),
            product("C", "batteries"),
        ])
        .unwrap();

        let ids: Vec<&str> = catalog.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_by_category() {
        let catalog = Catalog::new(vec![
            product("B", "batteries"),
            product("A", "inverters"),
            product("C", "batteries"),
        ])
        .unwrap();

        let ids: Vec<&str> = catalog
            .by_category("batteries")
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(catalog.by_category("all").count(), 3);
        assert_eq!(catalog.by_category("panels").count(), 0);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product("A", "inverters"), product("A", "batteries")]);
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "A"));
    }

    #[test]
    fn test_rejects_empty_offers() {
        let empty = Product::new("E", "Empty", "Huawei", "inverters", "String");
        let result = Catalog::new(vec![product("A", "inverters"), empty]);
        assert!(matches!(result, Err(CatalogError::NoOffers(id)) if id == "E"));
    }

    #[test]
    fn test_rejects_blank_id() {
        let result = Catalog::new(vec![product("A", "inverters"), product(" ", "inverters")]);
        assert!(matches!(result, Err(CatalogError::EmptyId(1))));
    }

    #[test]
    fn test_from_json_rejects_missing_offers_field() {
        let json = r#"[{"id":"X","name":"X","brand":"B","category":"c","type":"t"}]"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::Serialization(_))
        ));
    }

    #[test]
    fn test_category_summaries() {
        let catalog = Catalog::new(vec![
            product("B", "batteries"),
            product("A", "inverters"),
            product("C", "batteries"),
        ])
        .unwrap();

        let summaries = catalog.categories();
        assert_eq!(
            summaries,
            vec![
                CategorySummary::new("all", 3),
                CategorySummary::new("batteries", 2),
                CategorySummary::new("inverters", 1),
            ]
        );
    }

    #[test]
    fn test_reload_gets_new_version() {
        let first = Catalog::new(vec![product("A", "inverters")]).unwrap();
        let second = Catalog::new(vec![product("A", "inverters")]).unwrap();
        assert_ne!(first.version(), second.version());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(vec![product("A", "inverters")]).unwrap();
        assert!(catalog.get("A").is_some());
        assert!(catalog.get("Z").is_none());
    }
}
