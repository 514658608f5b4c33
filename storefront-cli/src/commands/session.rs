//! Session command - show or clear the stored session

use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use storefront_core::OperationResult;

use super::{get_context, log_command};
use crate::output;

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Show who is signed in
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the stored session on this machine
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: SessionCommands) -> Result<()> {
    let ctx = get_context()?;
    log_command(&ctx, "session");

    match command {
        SessionCommands::Show { json } => {
            let summary = ctx.session_service.summary(Utc::now())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&OperationResult::ok(&summary))?);
                return Ok(());
            }

            if !summary.authenticated {
                println!("Not signed in. Use 'sf login' or 'sf signup'.");
                return Ok(());
            }

            println!("{}", "Session".bold());
            println!();

            let mut table = output::create_table();
            table.add_row(vec!["Role", summary.role.as_deref().unwrap_or("-")]);
            if let Some(route) = summary.landing {
                table.add_row(vec!["Home page", ctx.route_path(route)]);
            }
            if let Some(name) = &summary.full_name {
                table.add_row(vec!["Name", name.as_str()]);
            }
            if let Some(email) = &summary.email {
                table.add_row(vec!["Email", email.as_str()]);
            }
            if let Some(saved_at) = summary.saved_at {
                table.add_row(vec![
                    "Signed in".to_string(),
                    saved_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                ]);
            }
            if let Some(expires_at) = summary.expires_at {
                table.add_row(vec![
                    "Token expires".to_string(),
                    expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                ]);
            }
            println!("{}", table);

            if summary.expired {
                output::warning("The session token has expired. Sign in again.");
            }
            if summary.role_mismatch {
                output::warning("The token claims a different role than the one stored.");
            }
        }
        SessionCommands::Clear { force, json } => {
            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt("Forget the stored session?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let existed = ctx.session_service.clear()?;

            if json {
                println!("{}", serde_json::json!({"cleared": existed}));
            } else if existed {
                output::success("Signed out on this machine.");
            } else {
                println!("No session stored.");
            }
        }
    }

    Ok(())
}
