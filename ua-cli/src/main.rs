//! Urban Airship CLI - Command-line interface for the Urban Airship API.
//!
//! Exposes every client operation as a subcommand: device token management
//! and listing, native push and broadcast, rich push and its users, and the
//! feedback report. Useful for scripting, debugging registrations, and
//! checking credentials.

mod commands;

use clap::{Parser, Subcommand};
use tracing::debug;

use ua_core::config::AppConfig;
use ua_core::error::AirshipResult;
use ua_core::logging;

/// Urban Airship - push notification API client.
#[derive(Parser)]
#[command(
    name = "airship",
    version,
    about = "Urban Airship push notification API CLI",
    long_about = "A command-line interface for the Urban Airship push notification API.\n\
                   Credentials come from the config file or the AIRSHIP_KEY and \
                   AIRSHIP_SECRET environment variables."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Register, inspect and list device tokens.
    Tokens {
        #[command(subcommand)]
        action: commands::tokens::TokensAction,
    },
    /// Send native push notifications and broadcasts.
    Push {
        #[command(subcommand)]
        action: commands::push::PushAction,
    },
    /// Send rich push messages.
    #[command(name = "rich-push")]
    RichPush(commands::rich_push::RichPushArgs),
    /// Manage rich push users.
    Users {
        #[command(subcommand)]
        action: commands::users::UsersAction,
    },
    /// List device tokens marked inactive since a point in time.
    Feedback {
        /// Start of the window, e.g. "2014-01-01T00:00:00Z" or "2014-01-01 00:00:00" (UTC).
        #[arg(short, long)]
        since: String,
    },
    /// View and initialize the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> AirshipResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match cli.config.as_deref() {
        Some(path) => std::path::PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    let stored = AppConfig::load_or_default(&config_path)?;
    let mut config = stored.clone();
    config.apply_env_overrides();

    // Initialize logging; an unusable log directory only costs the log file
    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("logs"));
    let _guard =
        logging::init_logging_or_console(log_level, &log_dir, config.logging.json_output);

    debug!("Urban Airship CLI v{}", ua_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Tokens { action } => {
            commands::tokens::run(&config, action, cli.format).await
        }
        Commands::Push { action } => {
            commands::push::run(&config, action, cli.format).await
        }
        Commands::RichPush(args) => {
            commands::rich_push::run(&config, args, cli.format).await
        }
        Commands::Users { action } => {
            commands::users::run(&config, action, cli.format).await
        }
        Commands::Feedback { since } => {
            commands::feedback::run(&config, &since, cli.format).await
        }
        Commands::Config { action } => {
            commands::config::run(config, stored, &config_path, action, cli.format)
        }
    }
}
