//! Cart commands.

use anyhow::Result;
use brew_commerce::prelude::*;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart();
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(&cart, ctx),
        CartCommand::Add { id } => {
            cart.add_catalog_item(&ctx.catalog, &id)?;
            let name = cart
                .cart()
                .get(&ItemId::from(id.as_str()))
                .map(|i| i.name.clone())
                .unwrap_or(id);
            ctx.output.success(&format!("{name} added to cart!"));
            report_count(&cart, ctx)
        }
        CartCommand::Remove { id } => {
            let id = ItemId::from(id);
            if cart.cart().get(&id).is_none() {
                ctx.output.warn(&format!("{id} is not in the cart"));
            }
            cart.remove(&id)?;
            report_count(&cart, ctx)
        }
        CartCommand::Set { id, quantity } => {
            let id = ItemId::from(id);
            if cart.cart().get(&id).is_none() {
                ctx.output.warn(&format!("{id} is not in the cart"));
                return report_count(&cart, ctx);
            }
            cart.set_quantity(&id, quantity)?;
            report_count(&cart, ctx)
        }
        CartCommand::Clear => {
            cart.clear()?;
            ctx.output.success("Cart cleared");
            report_count(&cart, ctx)
        }
    }
}

fn report_count(cart: &CartStore, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "count": cart.count() }));
    } else {
        ctx.output.kv("items in cart", &cart.count().to_string());
    }
    Ok(())
}

fn show(cart: &CartStore, ctx: &Context) -> Result<()> {
    let pricing = cart.pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&pricing);
        return Ok(());
    }

    ctx.output.header("Your Cart");

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        ctx.output.info("Browse the menu with `brew menu`.");
        return Ok(());
    }

    let widths = [12, 14, 9, 5, 10];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "QTY", "TOTAL"], &widths);
    for line in &pricing.line_items {
        ctx.output.table_row(
            &[
                line.item_id.as_str(),
                &line.name,
                &line.unit_price.display(),
                &line.quantity.to_string(),
                &line.total.display(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Subtotal", &pricing.subtotal.display());
    ctx.output.kv(
        &format!("Tax ({TAX_RATE_PERCENT}%)"),
        &pricing.tax.display(),
    );
    ctx.output.kv("Total", &pricing.grand_total.display());
    Ok(())
}
