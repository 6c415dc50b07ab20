//! Checkout command.

use anyhow::Result;
use brew_commerce::prelude::*;

use super::{text_or_prompt, CheckoutArgs};
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart();
    let service = ctx.orders();

    if cart.is_empty() {
        // Reject before prompting.
        return Err(CommerceError::from(ValidationError::EmptyCart).into());
    }

    let prompt = !args.no_input && !ctx.output.is_json();
    let fields = CheckoutFields {
        name: text_or_prompt(args.name, "Name", prompt)?,
        phone: text_or_prompt(args.phone, "Phone", prompt)?,
        delivery_option: args.delivery,
        address: match args.address {
            Some(address) => address,
            None if args.delivery.is_some_and(|d| d.needs_address()) => {
                text_or_prompt(None, "Delivery address", prompt)?
            }
            None => String::new(),
        },
        notes: args.notes.unwrap_or_default(),
    };

    let pricing = cart.pricing()?;
    ctx.output
        .debug(&format!("placing order for {}", pricing.grand_total.display()));

    let mut flow = CheckoutFlow::with_fields(fields);
    let order = flow.submit(&service, &mut cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&order.confirmation_message());
    ctx.output.kv("Order", order.id.as_str());
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Subtotal", &order.subtotal.display());
    ctx.output.kv("Tax", &order.tax.display());
    ctx.output.kv("Total", &order.total.display());
    Ok(())
}
