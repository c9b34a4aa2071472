//! Catalogue listing command.

use anyhow::Result;
use threadline_commerce::{CatalogueView, SortOrder};

use super::CatalogueArgs;
use crate::context::Context;
use crate::output::format_price;

const WIDTHS: [usize; 5] = [12, 28, 24, 8, 10];

/// Run the catalogue command.
pub fn run(args: CatalogueArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_products(&args.file)?;
    let filters = args.filters.to_filter_state()?;
    let sort = SortOrder::parse(&args.sort)?;

    let view = CatalogueView::build(&products, &filters, sort)?;
    let shown = match args.limit {
        Some(limit) => &view.products[..limit.min(view.products.len())],
        None => &view.products[..],
    };

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} of {} products ({})",
        view.total,
        products.len(),
        sort.display_name()
    ));

    if view.is_empty() {
        ctx.output.info("No products match the selected filters");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "NAME", "COLLECTION", "GENDER", "PRICE"], &WIDTHS);
    for product in shown {
        let collection = format!("{} / {}", product.category_group, product.category);
        let price = format_price(product.listed_price());
        ctx.output.table_row(
            &[
                product.id.as_str(),
                product.name.as_str(),
                collection.as_str(),
                product.gender.as_str(),
                price.as_str(),
            ],
            &WIDTHS,
        );
    }

    if shown.len() < view.total {
        ctx.output
            .info(&format!("{} more not shown", view.total - shown.len()));
    }

    Ok(())
}
