//! Browse command: filter, sort and page through the catalog.

use anyhow::{bail, Result};
use serde::Serialize;
use suntrex_catalog::search::{BoundSide, Command, FilterState, RangeFacet, SortOption};
use suntrex_catalog::view::{recompute, ViewModel};

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{format_power, format_price};

const COLUMN_WIDTHS: [usize; 7] = [10, 36, 14, 10, 8, 11, 7];
const PAGER_WINDOW: usize = 7;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrowseReport<'a> {
    state: &'a FilterState,
    link: String,
    view: &'a ViewModel,
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let page_size = args.page_size.unwrap_or(ctx.config.browse.page_size);
    if page_size == 0 {
        bail!("Page size must be at least 1");
    }

    let catalog = ctx.load_catalog(args.catalog.as_deref()).await?;

    let (state, warnings) = resolve_state(&args, ctx.config.default_sort());
    for warning in &warnings {
        ctx.output.warn(warning);
    }
    tracing::debug!(state = %state.to_query_string(), page_size, "browsing");

    let view = recompute(&catalog, &state, page_size);

    if ctx.output.is_json() {
        ctx.output.json(&BrowseReport {
            state: &state,
            link: state.to_query_string(),
            view: &view,
        });
        return Ok(());
    }

    render(&view, &state, ctx);
    Ok(())
}

/// Build the filter state from the deep link and flags.
///
/// Rejected edits leave the state as it was and come back as warnings.
pub(crate) fn resolve_state(args: &BrowseArgs, default_sort: SortOption) -> (FilterState, Vec<String>) {
    let mut warnings = Vec::new();
    let mut state = match args.link.as_deref() {
        Some(link) => FilterState::from_query_string(link),
        None => Command::SetSort(default_sort).apply(&FilterState::default()),
    };

    if args.clear {
        step(&mut state, Command::ClearAll, &mut warnings);
    }
    if let Some(category) = &args.category {
        step(&mut state, Command::SetCategory(category.clone()), &mut warnings);
    }
    if let Some(query) = &args.search {
        step(&mut state, Command::SetSearchQuery(query.clone()), &mut warnings);
    }

    for brand in &args.brand {
        step(&mut state, Command::ToggleBrand(brand.clone()), &mut warnings);
    }
    for product_type in &args.product_type {
        step(&mut state, Command::ToggleType(product_type.clone()), &mut warnings);
    }
    for phase in &args.phase {
        step(&mut state, Command::TogglePhase(phase.clone()), &mut warnings);
    }
    for mppt in &args.mppt {
        step(&mut state, Command::ToggleMppt(mppt.clone()), &mut warnings);
    }

    let bounds = [
        ("--power-min", RangeFacet::Power, BoundSide::Min, &args.power_min),
        ("--power-max", RangeFacet::Power, BoundSide::Max, &args.power_max),
        ("--price-min", RangeFacet::Price, BoundSide::Min, &args.price_min),
        ("--price-max", RangeFacet::Price, BoundSide::Max, &args.price_max),
    ];
    for (flag, facet, side, raw) in bounds {
        let Some(raw) = raw else { continue };
        match Command::bound_from_input(facet, side, raw) {
            Ok(command) => step(&mut state, command, &mut warnings),
            Err(e) => warnings.push(format!("Ignored {} '{}': {}", flag, raw, e)),
        }
    }

    if args.in_stock && !state.in_stock_only {
        step(&mut state, Command::ToggleInStock, &mut warnings);
    }
    for filter in &args.quick {
        step(&mut state, Command::ToggleQuickFilter(*filter), &mut warnings);
    }
    if let Some(sort) = args.sort {
        step(&mut state, Command::SetSort(sort), &mut warnings);
    }

    for key in &args.remove_tag {
        match state.active_tags().into_iter().find(|tag| tag.key() == *key) {
            Some(tag) => state = state.remove_tag(&tag),
            None => warnings.push(format!("No active filter '{}'", key)),
        }
    }

    if let Some(page) = args.page {
        step(&mut state, Command::GoToPage(page), &mut warnings);
    }

    (state, warnings)
}

fn step(state: &mut FilterState, command: Command, warnings: &mut Vec<String>) {
    match command.try_apply(state) {
        Ok(next) => *state = next,
        Err(e) => warnings.push(format!("Ignored: {}", e)),
    }
}

fn render(view: &ViewModel, state: &FilterState, ctx: &Context) {
    let out = &ctx.output;

    out.header(&format!(
        "{} products · {} offers",
        view.total_result_count, view.total_offer_count
    ));

    if !view.active_tags.is_empty() {
        out.info("Active filters:");
        for tag in &view.active_tags {
            out.list_item(&format!("{}  ({})", tag.label(), tag.key()));
        }
    }

    if view.is_empty() {
        out.warn("No products match these filters");
    } else {
        println!();
        out.table_row(
            &["ID", "Name", "Brand", "Type", "Power", "From", "Stock"],
            &COLUMN_WIDTHS,
        );
        for product in &view.products {
            let power = format_power(product.power);
            let price = format_price(product.best_price());
            let stock = product.total_stock().to_string();
            out.table_row(
                &[
                    product.id.as_str(),
                    &product.name,
                    &product.brand,
                    &product.product_type,
                    &power,
                    &price,
                    &stock,
                ],
                &COLUMN_WIDTHS,
            );
        }
    }

    let pagination = &view.pagination;
    println!();
    out.kv("Page", &pager(pagination.page, &pagination.page_numbers(PAGER_WINDOW)));
    out.kv(
        "Showing",
        &format!(
            "{}-{} of {}",
            pagination.start_item(),
            pagination.end_item(),
            pagination.total
        ),
    );
    out.kv("Sort", view.sort_by.display_name());

    let link = state.to_query_string();
    if !link.is_empty() {
        out.kv("Link", &format!("?{}", link));
    }
}

/// Render page numbers with the current one bracketed.
pub(crate) fn pager(current: usize, pages: &[usize]) -> String {
    pages
        .iter()
        .map(|&p| {
            if p == current {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use suntrex_catalog::search::QuickFilter;

    #[test]
    fn test_default_sort_applies_without_link() {
        let (state, warnings) = resolve_state(&BrowseArgs::default(), SortOption::PriceAsc);
        assert_eq!(state.sort_by, SortOption::PriceAsc);
        assert_eq!(state.page, 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_flags_map_to_filters() {
        let args = BrowseArgs {
            category: Some("inverters".into()),
            search: Some("sun2000".into()),
            brand: vec!["Huawei".into(), "Deye".into()],
            phase: vec!["3".into()],
            power_min: Some("3".into()),
            price_max: Some("1500".into()),
            in_stock: true,
            quick: vec![QuickFilter::Trusted],
            sort: Some(SortOption::Stock),
            page: Some(2),
            ..BrowseArgs::default()
        };

        let (state, warnings) = resolve_state(&args, SortOption::Relevance);

        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(state.category, "inverters");
        assert_eq!(state.search_query, "sun2000");
        assert_eq!(state.selected_brands.len(), 2);
        assert!(state.selected_phases.contains("3"));
        assert_eq!(state.power_min, Some(3.0));
        assert_eq!(state.price_max, Some(1500.0));
        assert!(state.in_stock_only);
        assert!(state.quick_filters.trusted);
        assert_eq!(state.sort_by, SortOption::Stock);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_bad_bounds_become_warnings() {
        let args = BrowseArgs {
            price_min: Some("500".into()),
            price_max: Some("100".into()),
            power_min: Some("lots".into()),
            ..BrowseArgs::default()
        };

        let (state, warnings) = resolve_state(&args, SortOption::Relevance);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("--power-min"));
        assert_eq!((state.price_min, state.price_max), (Some(500.0), None));
        assert_eq!(state.power_min, None);
    }

    #[test]
    fn test_link_then_flags() {
        let args = BrowseArgs {
            link: Some("?brand=Huawei&inStock=1&sort=price-desc&page=3".into()),
            brand: vec!["Deye".into()],
            in_stock: true,
            ..BrowseArgs::default()
        };

        let (state, _) = resolve_state(&args, SortOption::Rating);

        assert_eq!(state.selected_brands.len(), 2);
        assert!(state.in_stock_only);
        assert_eq!(state.sort_by, SortOption::PriceDesc);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_clear_keeps_category() {
        let args = BrowseArgs {
            link: Some("category=batteries&brand=BYD&priceMin=100".into()),
            clear: true,
            ..BrowseArgs::default()
        };

        let (state, _) = resolve_state(&args, SortOption::Relevance);

        assert_eq!(state.category, "batteries");
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_remove_tag_by_key() {
        let args = BrowseArgs {
            link: Some("brand=Huawei&brand=Deye&powerMin=3&powerMax=10".into()),
            remove_tag: vec!["brand:Deye".into(), "power".into(), "brand:SMA".into()],
            ..BrowseArgs::default()
        };

        let (state, warnings) = resolve_state(&args, SortOption::Relevance);

        assert_eq!(state.selected_brands.iter().collect::<Vec<_>>(), vec!["Huawei"]);
        assert_eq!((state.power_min, state.power_max), (None, None));
        assert_eq!(warnings, vec!["No active filter 'brand:SMA'".to_string()]);
    }

    #[test]
    fn test_pager() {
        assert_eq!(pager(3, &[1, 2, 3, 4]), "1 2 [3] 4");
        assert_eq!(pager(1, &[1]), "[1]");
    }
}
