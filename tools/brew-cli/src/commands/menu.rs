//! Menu listing.

use anyhow::Result;

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let items = ctx.catalog.filter_menu(args.category);

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header(&format!("Menu ({})", args.category));

    let widths = [12, 14, 10, 9];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE"], &widths);
    for item in items {
        let price = item.price.display();
        ctx.output.table_row(
            &[item.id.as_str(), &item.name, item.category.display_name(), &price],
            &widths,
        );
    }

    ctx.output.info("Add an item with `brew cart add <id>`.");
    Ok(())
}
