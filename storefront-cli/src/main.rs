//! Storefront CLI - sign in to the storefront from your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{google, login, logs, marquee, session, signup};

/// Storefront - account access in your terminal
#[derive(Parser)]
#[command(name = "sf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Signup {
        /// Full name (prompted if omitted)
        #[arg(long)]
        full_name: Option<String>,
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
        /// Account password (prompted if omitted)
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Sign up through a social provider instead (google, facebook, apple)
        #[arg(long = "with", value_name = "PROVIDER")]
        provider: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign up with a Google account
    Google {
        /// Google ID token to exchange (skips the Sign-In prompt)
        #[arg(long)]
        credential: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear the stored session
    Session {
        #[command(subcommand)]
        command: session::SessionCommands,
    },

    /// Scroll the storefront marquee
    Marquee {
        /// Columns per second
        #[arg(long)]
        speed: Option<f64>,
        /// Visible width in columns
        #[arg(long, default_value = "60")]
        width: usize,
        /// Seconds to animate for
        #[arg(long, default_value = "10")]
        duration: f64,
    },

    /// View and manage diagnostic logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password, json } => login::run(email, password, json),
        Commands::Signup { full_name, email, password, provider, json } => {
            signup::run(full_name, email, password, provider, json)
        }
        Commands::Google { credential, json } => google::run(credential, json),
        Commands::Session { command } => session::run(command),
        Commands::Marquee { speed, width, duration } => marquee::run(speed, width, duration),
        Commands::Logs { command } => logs::run(command),
    }
}
