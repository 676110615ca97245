//! Facet option derivation.
//!
//! Options and bounds come from the full, unfiltered catalog. They do not
//! narrow as other filters are applied: selecting a brand leaves every type,
//! phase and MPPT option visible.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Distinct values and bounds for each filterable dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    /// Sorted distinct brands.
    pub brands: Vec<String>,
    /// Sorted distinct product types.
    pub types: Vec<String>,
    /// Phase counts above zero, ascending.
    pub phases: Vec<String>,
    /// MPPT counts above zero, numerically ascending.
    pub mppts: Vec<String>,
    /// Floor of the smallest positive power, 0 if none.
    pub power_min: f64,
    /// Ceiling of the largest positive power, 0 if none.
    pub power_max: f64,
    /// Floor of the cheapest offer price, 0 for an empty catalog.
    pub price_min: f64,
    /// Ceiling of the most expensive offer price, 0 for an empty catalog.
    pub price_max: f64,
}

impl FacetOptions {
    /// Derive facet options from a catalog.
    pub fn derive(catalog: &Catalog) -> Self {
        let products = catalog.all();

        let brands: BTreeSet<&str> = products.iter().map(|p| p.brand.as_str()).collect();
        let types: BTreeSet<&str> = products.iter().map(|p| p.product_type.as_str()).collect();
        let phases: BTreeSet<u8> = products
            .iter()
            .map(|p| p.phases)
            .filter(|&n| n > 0)
            .collect();
        let mppts: BTreeSet<u32> = products
            .iter()
            .map(|p| p.mppt)
            .filter(|&n| n > 0)
            .collect();

        let (power_min, power_max) = bounds(products.iter().map(|p| p.power).filter(|&w| w > 0.0));
        let (price_min, price_max) = bounds(
            products
                .iter()
                .flat_map(|p| p.offers.iter().map(|o| o.price)),
        );

        let options = Self {
            brands: brands.into_iter().map(String::from).collect(),
            types: types.into_iter().map(String::from).collect(),
            phases: phases.into_iter().map(|n| n.to_string()).collect(),
            mppts: mppts.into_iter().map(|n| n.to_string()).collect(),
            power_min,
            power_max,
            price_min,
            price_max,
        };

        tracing::trace!(
            version = %catalog.version(),
            brands = options.brands.len(),
            types = options.types.len(),
            "facet options derived"
        );

        options
    }
}

/// Floor of the minimum and ceiling of the maximum, `(0, 0)` when empty.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (lo.floor(), hi.ceil()))
        .unwrap_or((0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Offer, Product};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("INV001", "Huawei SUN2000-3KTL", "Huawei", "inverters", "String")
                .with_power(3.0)
                .with_phases(1)
                .with_mppt(2)
                .with_offer(Offer::new("S01", "SolarTech DE", 479.0, 450))
                .with_offer(Offer::new("S02", "PV Parts FR", 499.5, 120)),
            Product::new("INV007", "Enphase IQ8Plus", "Enphase", "inverters", "Microinverter")
                .with_power(0.29)
                .with_phases(1)
                .with_mppt(1)
                .with_offer(Offer::new("S04", "SunPower NL", 46.2, 2268)),
            Product::new("INV004", "Huawei SUN2000-20KTL", "Huawei", "inverters", "String")
                .with_power(20.4)
                .with_phases(3)
                .with_mppt(12)
                .with_offer(Offer::new("S01", "SolarTech DE", 1530.0, 45)),
            Product::new("ACC001", "Cable kit", "Deye", "accessories", "Cable")
                .with_offer(Offer::new("S06", "DeyelDirect PL", 12.0, 0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_distinct_sorted_values() {
        let facets = FacetOptions::derive(&catalog());
        assert_eq!(facets.brands, vec!["Deye", "Enphase", "Huawei"]);
        assert_eq!(facets.types, vec!["Cable", "Microinverter", "String"]);
        assert_eq!(facets.phases, vec!["1", "3"]);
    }

    #[test]
    fn test_mppts_sorted_numerically() {
        let facets = FacetOptions::derive(&catalog());
        assert_eq!(facets.mppts, vec!["1", "2", "12"]);
    }

    #[test]
    fn test_power_bounds_skip_zero() {
        let facets = FacetOptions::derive(&catalog());
        assert_eq!(facets.power_min, 0.0);
        assert_eq!(facets.power_max, 21.0);

        let only_big = Catalog::new(vec![Product::new("P", "P", "B", "c", "t")
            .with_power(4.6)
            .with_offer(Offer::new("S", "S", 10.0, 1))])
        .unwrap();
        let facets = FacetOptions::derive(&only_big);
        assert_eq!(facets.power_min, 4.0);
        assert_eq!(facets.power_max, 5.0);
    }

    #[test]
    fn test_price_bounds_span_all_offers() {
        let facets = FacetOptions::derive(&catalog());
        assert_eq!(facets.price_min, 12.0);
        assert_eq!(facets.price_max, 1530.0);
    }

    #[test]
    fn test_empty_catalog() {
        let facets = FacetOptions::derive(&Catalog::new(Vec::new()).unwrap());
        assert!(facets.brands.is_empty());
        assert_eq!((facets.price_min, facets.price_max), (0.0, 0.0));
        assert_eq!((facets.power_min, facets.power_max), (0.0, 0.0));
    }
}
