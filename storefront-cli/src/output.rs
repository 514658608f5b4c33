//! Output formatting utilities

use std::thread;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::{FlowOutcome, Navigation, OperationResult};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Print a flow outcome as JSON
pub fn print_outcome_json(outcome: &FlowOutcome) -> Result<()> {
    let result = if outcome.succeeded() {
        OperationResult::ok(outcome)
    } else {
        let message = outcome.message.clone().unwrap_or_default();
        OperationResult::fail_with_data(message, outcome)
    };
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Show a spinner for the navigation delay, then print the destination
pub fn follow(navigation: &Navigation, path: &str) {
    if !navigation.delay.is_zero() {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Redirecting to {}", path));
        spinner.enable_steady_tick(Duration::from_millis(80));
        thread::sleep(navigation.delay);
        spinner.finish_and_clear();
    }

    println!("{} {}", "→".cyan(), path.bold());
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
