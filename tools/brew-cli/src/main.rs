//! Brew CLI - the BrewAura storefront from the command line.
//!
//! Commands:
//! - `brew menu` - Browse the menu
//! - `brew cart` - Show and edit the cart
//! - `brew checkout` - Place an order
//! - `brew orders` - Order history
//! - `brew signup` / `login` / `logout` / `whoami` - Account session
//! - `brew config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::{Context as _, Result};
use brew_auth::AuthError;
use brew_commerce::CommerceError;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{CartArgs, CheckoutArgs, ConfigArgs, LoginArgs, MenuArgs, OrdersArgs, SignupArgs};
use config::LogFormat;

/// Brew CLI - Order from the BrewAura cafe
#[derive(Parser)]
#[command(name = "brew")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Place an order for the cart contents
    Checkout(CheckoutArgs),

    /// List placed orders
    Orders(OrdersArgs),

    /// Create an account
    Signup(SignupArgs),

    /// Log in
    Login(LoginArgs),

    /// Log out
    Logout,

    /// Show who is logged in
    Whoami,

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let (config, config_path) = match config::resolve(cli.config.as_deref(), &cwd) {
        Ok(found) => found,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let json_logs = cli.json || config.output.log_format == LogFormat::Json;
    init_tracing(cli.verbose, json_logs);

    let ctx = match context::Context::open(config, config_path, cwd, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx),
        Commands::Cart(args) => commands::cart::run(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Orders(args) => commands::orders::run(args, &ctx),
        Commands::Signup(args) => commands::auth::signup(args, &ctx),
        Commands::Login(args) => commands::auth::login(args, &ctx),
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&notice(&e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the log subscriber. Logs go to stderr so `--json` output on
/// stdout stays parseable.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "brew=debug,brew_commerce=debug,brew_auth=debug,brew_store=debug"
    } else {
        "brew=info,brew_commerce=warn,brew_auth=warn,brew_store=warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Text for the notification line: the customer-facing message when the
/// error has one, the full error chain otherwise.
fn notice(err: &anyhow::Error) -> String {
    if let Some(msg) = err
        .downcast_ref::<CommerceError>()
        .and_then(CommerceError::user_message)
    {
        return msg;
    }
    if let Some(msg) = err.downcast_ref::<AuthError>().and_then(AuthError::user_message) {
        return msg;
    }
    format!("{:#}", err)
}
