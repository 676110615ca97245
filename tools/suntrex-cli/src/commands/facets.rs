//! Facets command: the filter options a catalog offers.

use anyhow::Result;
use suntrex_catalog::search::FacetOptions;

use super::FacetsArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog(args.catalog.as_deref()).await?;
    let facets = FacetOptions::derive(&catalog);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header(&format!("Filter options ({} products)", catalog.len()));
    ctx.output.kv("Brands", &list(&facets.brands));
    ctx.output.kv("Types", &list(&facets.types));
    ctx.output.kv("Phases", &list(&facets.phases));
    ctx.output.kv("MPPT", &list(&facets.mppts));
    ctx.output.kv(
        "Power",
        &format!("{} - {} kW", facets.power_min, facets.power_max),
    );
    ctx.output.kv(
        "Price",
        &format!(
            "{} - {}",
            format_price(facets.price_min),
            format_price(facets.price_max)
        ),
    );

    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
