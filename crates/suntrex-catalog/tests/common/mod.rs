//! Shared fixtures and proptest strategies for the integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use suntrex_catalog::prelude::*;

pub const BRANDS: [&str; 4] = ["Huawei", "Deye", "Jinko Solar", "BYD"];
pub const CATEGORIES: [&str; 3] = ["inverters", "panels", "batteries"];
pub const TYPES: [&str; 3] = ["String", "Hybrid", "Monocrystalline"];

pub fn ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.as_str().to_string()).collect()
}

pub fn position(catalog: &Catalog, product: &Product) -> usize {
    catalog
        .all()
        .iter()
        .position(|p| p.id == product.id)
        .unwrap()
}

fn offer_strategy() -> impl Strategy<Value = Offer> {
    (1u32..6, 1u32..2000, 0u64..30, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(seller, price, stock, bank_transfer, trusted, platform)| {
            Offer::new(format!("S{seller:02}"), format!("Seller {seller}"), price as f64, stock)
                .with_badges(OfferBadges {
                    bank_transfer,
                    trusted,
                    delivery: if platform { Delivery::Suntrex } else { Delivery::SelfDelivery },
                })
        },
    )
}

fn product_strategy() -> impl Strategy<Value = Product> {
    (
        0..BRANDS.len(),
        0..CATEGORIES.len(),
        0..TYPES.len(),
        0u32..30,
        prop::sample::select(vec![0u8, 1, 3]),
        0u32..4,
        prop::collection::vec(offer_strategy(), 1..4),
    )
        .prop_map(|(brand, category, kind, power, phases, mppt, offers)| {
            let mut product = Product::new(
                "pending",
                format!("{} {} {power}K", BRANDS[brand], TYPES[kind]),
                BRANDS[brand],
                CATEGORIES[category],
                TYPES[kind],
            )
            .with_power(power as f64)
            .with_phases(phases)
            .with_mppt(mppt);
            product.offers = offers;
            product
        })
}

/// A valid catalog of up to 40 products with unique ids.
pub fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    prop::collection::vec(product_strategy(), 0..40).prop_map(|products| {
        let products = products
            .into_iter()
            .enumerate()
            .map(|(i, mut p)| {
                p.id = ProductId::new(format!("P{i:03}"));
                p
            })
            .collect();
        Catalog::new(products).unwrap()
    })
}

fn bound_strategy(max: u32) -> impl Strategy<Value = Option<f64>> {
    prop::option::of((0..max).prop_map(f64::from))
}

pub fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        prop::sample::select(vec!["all", "inverters", "panels", "batteries"])
            .prop_map(|c| Command::SetCategory(c.to_string())),
        prop::sample::select(BRANDS.to_vec()).prop_map(|b| Command::ToggleBrand(b.to_string())),
        prop::sample::select(TYPES.to_vec()).prop_map(|t| Command::ToggleType(t.to_string())),
        prop::sample::select(vec!["1", "3"]).prop_map(|p| Command::TogglePhase(p.to_string())),
        (1u32..4).prop_map(|m| Command::ToggleMppt(m.to_string())),
        (bound_strategy(30), bound_strategy(30)).prop_map(|(lo, hi)| Command::SetPowerRange(lo, hi)),
        (bound_strategy(2000), bound_strategy(2000)).prop_map(|(lo, hi)| Command::SetPriceRange(lo, hi)),
        bound_strategy(2000).prop_map(Command::SetPriceMin),
        bound_strategy(2000).prop_map(Command::SetPriceMax),
        Just(Command::ToggleInStock),
        prop::sample::select(QuickFilter::ALL.to_vec()).prop_map(Command::ToggleQuickFilter),
        prop::sample::select(vec!["", "huawei", "DEYE", "hybrid", "5k", "zzz"])
            .prop_map(|q| Command::SetSearchQuery(q.to_string())),
        prop::sample::select(SortOption::ALL.to_vec()).prop_map(Command::SetSort),
        (0u32..8).prop_map(Command::GoToPage),
        Just(Command::ClearAll),
    ]
}

/// A state reached from the default by a random command sequence.
pub fn state_strategy() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(command_strategy(), 0..12)
        .prop_map(|commands| FilterState::default().apply_all(&commands))
}
