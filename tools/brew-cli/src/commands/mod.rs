//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod orders;

use brew_commerce::catalog::MenuFilter;
use brew_commerce::checkout::DeliveryOption;
use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Category to show: all, coffee or pastries.
    #[arg(short = 'C', long, default_value = "all")]
    pub category: MenuFilter,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add one of a menu item.
    Add {
        /// Menu item id, e.g. espresso.
        id: String,
    },
    /// Remove an item entirely.
    Remove {
        /// Menu item id.
        id: String,
    },
    /// Set the quantity of an item already in the cart (0 removes it).
    Set {
        /// Menu item id.
        id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Contact phone number.
    #[arg(short, long)]
    pub phone: Option<String>,

    /// pickup or delivery.
    #[arg(short, long)]
    pub delivery: Option<DeliveryOption>,

    /// Delivery address (required for delivery).
    #[arg(short, long)]
    pub address: Option<String>,

    /// Notes for the barista.
    #[arg(long)]
    pub notes: Option<String>,

    /// Never prompt for missing fields.
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show a single order.
    #[arg(long)]
    pub id: Option<String>,

    /// Show only the last N orders.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the signup command.
#[derive(Args)]
pub struct SignupArgs {
    /// Full name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,

    /// Password confirmation (defaults to --password).
    #[arg(long)]
    pub confirm: Option<String>,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Email address.
    #[arg(short, long)]
    pub email: Option<String>,

    /// Password (prompted when omitted).
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default brew.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Whether prompts can be shown.
pub(crate) fn interactive() -> bool {
    console::user_attended() && console::Term::stderr().is_term()
}

/// Use `value` if given, else prompt for it when interactive. Missing
/// values come back empty so validation reports them.
pub(crate) fn text_or_prompt(
    value: Option<String>,
    prompt: &str,
    allow_prompt: bool,
) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None if allow_prompt && interactive() => Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

/// Like [`text_or_prompt`] with hidden input.
pub(crate) fn secret_or_prompt(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Ok(dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?),
        None => Ok(String::new()),
    }
}
