//! Facet count command.

use anyhow::Result;
use threadline_commerce::{compute_facet_counts, FacetCount, FilterState};

use super::FacetsArgs;
use crate::context::Context;
use crate::output::facet_label;

/// Run the facets command.
pub fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_products(&args.file)?;
    let filters: FilterState = args.filters.to_filter_state()?;
    filters.validate()?;

    let counts = compute_facet_counts(&products, &filters);

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    section(ctx, "Collections", &counts.groups);
    if filters.group().is_some() {
        section(ctx, "Categories", &counts.categories);
    }
    section(ctx, "Gender", &counts.genders);

    ctx.output.header("Bestsellers");
    ctx.output.list_item(&facet_label(
        "Bestsellers only",
        counts.bestsellers,
        filters.bestsellers_only(),
    ));

    Ok(())
}

fn section(ctx: &Context, title: &str, facets: &[FacetCount]) {
    ctx.output.header(title);
    for facet in facets {
        ctx.output
            .list_item(&facet_label(&facet.value, facet.count, facet.selected));
    }
}
