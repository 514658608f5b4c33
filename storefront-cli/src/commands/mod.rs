//! CLI command implementations

pub mod google;
pub mod login;
pub mod logs;
pub mod marquee;
pub mod session;
pub mod signup;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use storefront_core::services::{log_quietly, EntryPoint, LogEvent, LoggingService};
use storefront_core::{FlowOutcome, FlowState, StorefrontContext};

use crate::output;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let storefront_dir = get_storefront_dir();
    std::fs::create_dir_all(&storefront_dir).ok()?;
    LoggingService::new(&storefront_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: Option<&Arc<LoggingService>>, event: LogEvent) {
    log_quietly(logger.map(Arc::as_ref), event);
}

/// Get the storefront directory from environment or default
pub fn get_storefront_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STOREFRONT_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".storefront")
    }
}

/// Build the storefront context, with diagnostics logging when available
pub fn get_context() -> Result<StorefrontContext> {
    let storefront_dir = get_storefront_dir();

    let ctx = StorefrontContext::new(&storefront_dir)
        .context("Failed to initialize storefront context")?;

    Ok(match get_logger() {
        Some(logger) => ctx.with_logger(logger),
        None => ctx,
    })
}

/// Record that a command ran
pub fn log_command(ctx: &StorefrontContext, command: &str) {
    log_event(
        ctx.logger(),
        LogEvent::new("command_executed").with_command(command),
    );
}

/// Tell the user when credentials would go over plain HTTP
pub fn warn_insecure_transport(ctx: &StorefrontContext, json: bool) {
    if !json && ctx.config.is_insecure_transport() {
        output::warning(&format!(
            "Warning: {} is not HTTPS; credentials are sent unencrypted.",
            ctx.config.api_base_url
        ));
    }
}

/// Use the flag value or ask for it
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// Use the flag value or ask for it without echoing
pub fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?),
    }
}

/// Print the outcome of a flow and follow its navigation
///
/// A failed flow becomes the command's error.
pub fn finish(ctx: &StorefrontContext, outcome: FlowOutcome, json: bool) -> Result<()> {
    if json {
        return output::print_outcome_json(&outcome);
    }

    if outcome.state == FlowState::Idle {
        match outcome.message.as_deref() {
            Some(reason) => output::warning(reason),
            None => output::info("Cancelled."),
        }
        return Ok(());
    }

    if !outcome.succeeded() {
        anyhow::bail!(
            "{}",
            outcome.message.as_deref().unwrap_or("Something went wrong")
        );
    }

    if let Some(message) = &outcome.message {
        output::success(message);
    }
    if let Some(navigation) = &outcome.navigation {
        output::follow(navigation, ctx.route_path(navigation.route));
    }
    Ok(())
}
