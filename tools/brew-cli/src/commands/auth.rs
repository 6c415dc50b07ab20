//! Account session commands.

use anyhow::Result;
use brew_auth::SessionStore;

use super::{secret_or_prompt, text_or_prompt, LoginArgs, SignupArgs};
use crate::context::Context;

/// Create an account and log in.
pub fn signup(args: SignupArgs, ctx: &Context) -> Result<()> {
    let prompt = !ctx.output.is_json();
    let name = text_or_prompt(args.name, "Full name", prompt)?;
    let email = text_or_prompt(args.email, "Email", prompt)?;
    let (password, confirm) = match args.password {
        Some(password) => {
            let confirm = args.confirm.unwrap_or_else(|| password.clone());
            (password, confirm)
        }
        None => (
            secret_or_prompt(None, "Password")?,
            secret_or_prompt(args.confirm, "Confirm password")?,
        ),
    };

    let user = ctx.session().signup(&name, &email, &password, &confirm)?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
    } else {
        ctx.output.success(&SessionStore::welcome_message(&user));
    }
    Ok(())
}

/// Log in to an existing account.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let prompt = !ctx.output.is_json();
    let email = text_or_prompt(args.email, "Email", prompt)?;
    let password = match args.password {
        Some(password) => password,
        None => secret_or_prompt(None, "Password")?,
    };

    let user = ctx.session().login(&email, &password)?;

    if ctx.output.is_json() {
        ctx.output.json(&user);
    } else {
        ctx.output.success(&SessionStore::welcome_back_message(&user));
    }
    Ok(())
}

/// End the session.
pub fn logout(ctx: &Context) -> Result<()> {
    ctx.session().logout()?;
    ctx.output.success(SessionStore::logout_message());
    Ok(())
}

/// Show the logged-in user.
pub fn whoami(ctx: &Context) -> Result<()> {
    let current = ctx.session().current_user();

    if ctx.output.is_json() {
        ctx.output.json(&current);
        return Ok(());
    }

    match current {
        Some(user) => {
            ctx.output
                .info(&format!("Logged in as {} ({})", user.first_name(), user.initial()));
            ctx.output.kv("name", &user.name);
            ctx.output.kv("email", &user.email);
        }
        None => ctx.output.info("Not logged in. Use `brew login` or `brew signup`."),
    }
    Ok(())
}
