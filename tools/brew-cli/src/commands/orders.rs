//! Order history commands.

use anyhow::{bail, Result};
use brew_commerce::prelude::*;

use super::OrdersArgs;
use crate::context::Context;
use crate::output::delivery_badge;

/// Run the orders command.
pub fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    let service = ctx.orders();

    if let Some(id) = args.id {
        return match service.history().find(&OrderId::from(id.as_str())) {
            Some(order) => show_order(&order, ctx),
            None => bail!("Order not found: {id}"),
        };
    }

    let mut orders = service.history().all();
    orders.reverse();
    if let Some(limit) = args.limit {
        orders.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Your Orders");

    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        ctx.output.info("Place one with `brew checkout`.");
        return Ok(());
    }

    for order in &orders {
        ctx.output.list_item(&format!(
            "{}  {}  {} item(s)  {}  {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.item_count(),
            order.total.display(),
            delivery_badge(order.customer.delivery_option),
        ));
    }

    Ok(())
}

fn show_order(order: &Order, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.id));
    ctx.output.kv("Placed", &order.created_at.to_rfc3339());
    ctx.output.kv("Name", &order.customer.name);
    ctx.output.kv("Phone", &order.customer.phone);
    ctx.output
        .kv("Delivery", &delivery_badge(order.customer.delivery_option));
    if !order.customer.address.is_empty() {
        ctx.output.kv("Address", &order.customer.address);
    }
    if !order.customer.notes.is_empty() {
        ctx.output.kv("Notes", &order.customer.notes);
    }

    println!();
    for item in &order.items {
        ctx.output.list_item(&format!(
            "{} x{}  {}",
            item.name,
            item.quantity,
            item.unit_price.display()
        ));
    }

    println!();
    ctx.output.kv("Subtotal", &order.subtotal.display());
    ctx.output.kv("Tax", &order.tax.display());
    ctx.output.kv("Total", &order.total.display());
    Ok(())
}
