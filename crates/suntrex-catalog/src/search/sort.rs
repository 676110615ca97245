//! Result ordering.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::search::state::SortOption;

impl SortOption {
    /// Compare two products under this sort key. `Relevance` treats every pair
    /// as equal.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Relevance => Ordering::Equal,
            SortOption::PriceAsc => a.best_price().total_cmp(&b.best_price()),
            SortOption::PriceDesc => b.best_price().total_cmp(&a.best_price()),
            SortOption::Stock => b.total_stock().cmp(&a.total_stock()),
            SortOption::Rating => b.best_rating().total_cmp(&a.best_rating()),
        }
    }
}

/// Reorder products by `sort`. The sort is stable: ties keep their input order.
pub fn sort_products<'a>(mut products: Vec<&'a Product>, sort: SortOption) -> Vec<&'a Product> {
    if sort != SortOption::Relevance {
        products.sort_by(|a, b| sort.compare(a, b));
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Offer;

    fn product(id: &str, prices: &[f64], stocks: &[u64]) -> Product {
        prices.iter().zip(stocks).enumerate().fold(
            Product::new(id, id, "Brand", "inverters", "String"),
            |p, (i, (&price, &stock))| {
                p.with_offer(Offer::new(format!("S{i}"), "Seller", price, stock))
            },
        )
    }

    fn order(products: &[Product], sort: SortOption) -> Vec<String> {
        sort_products(products.iter().collect(), sort)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect()
    }

    #[test]
    fn test_relevance_is_identity() {
        let products = vec![
            product("C", &[30.0], &[1]),
            product("A", &[10.0], &[1]),
            product("B", &[20.0], &[1]),
        ];
        assert_eq!(order(&products, SortOption::Relevance), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_price_uses_cheapest_offer() {
        let products = vec![
            product("A", &[50.0, 5.0], &[1, 1]),
            product("B", &[10.0], &[1]),
            product("C", &[7.0, 70.0], &[1, 1]),
        ];
        assert_eq!(order(&products, SortOption::PriceAsc), vec!["A", "C", "B"]);
        assert_eq!(order(&products, SortOption::PriceDesc), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_price_sort_is_stable() {
        let products = vec![
            product("X", &[10.0, 99.0], &[1, 1]),
            product("Y", &[5.0], &[1]),
            product("Z", &[10.0], &[1]),
            product("W", &[10.0, 12.0], &[1, 1]),
        ];
        assert_eq!(order(&products, SortOption::PriceAsc), vec!["Y", "X", "Z", "W"]);
        assert_eq!(order(&products, SortOption::PriceDesc), vec!["X", "Z", "W", "Y"]);
    }

    #[test]
    fn test_stock_descending_by_sum() {
        let products = vec![
            product("forty", &[1.0, 1.0], &[25, 15]),
            product("zero", &[1.0], &[0]),
            product("fifteen", &[1.0], &[15]),
        ];
        assert_eq!(
            order(&products, SortOption::Stock),
            vec!["forty", "fifteen", "zero"]
        );
    }

    #[test]
    fn test_stock_ties_keep_input_order() {
        let products = vec![
            product("first", &[1.0, 1.0], &[10, 20]),
            product("low", &[1.0], &[3]),
            product("second", &[1.0], &[30]),
            product("third", &[1.0, 1.0, 1.0], &[5, 5, 20]),
        ];
        assert_eq!(
            order(&products, SortOption::Stock),
            vec!["first", "second", "third", "low"]
        );
    }

    #[test]
    fn test_stock_sort_with_huge_totals() {
        let products = vec![
            product("Z", &[1.0], &[5]),
            product("A", &[1.0, 1.0], &[u64::MAX, 1]),
        ];
        assert_eq!(order(&products, SortOption::Stock), vec!["A", "Z"]);
    }

    #[test]
    fn test_rating_ties_keep_input_order() {
        let mut products = vec![
            product("B", &[1.0], &[1]),
            product("A", &[1.0], &[1]),
            product("C", &[1.0], &[1]),
        ];
        products[0].offers[0].rating = 4.5;
        products[1].offers[0].rating = 4.9;
        products[2].offers[0].rating = 4.5;

        assert_eq!(order(&products, SortOption::Rating), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rating_uses_best_offer() {
        let mut low = product("low", &[1.0], &[1]);
        low.offers[0].rating = 3.5;
        let mut high = product("high", &[1.0, 2.0], &[1, 1]);
        high.offers[0].rating = 2.0;
        high.offers[1].rating = 4.9;

        assert_eq!(
            order(&[low, high], SortOption::Rating),
            vec!["high", "low"]
        );
    }
}
