//! User Auth API - Application entry point
//!
//! CLI-based entry point that dispatches to the serve and migrate commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_auth_api::{
    cli::{Cli, Commands},
    commands,
    config::{Config, DEFAULT_LOG_LEVEL},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration comes first so LOG_LEVEL can seed the filter
    let config = Config::from_env();
    let configured_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    init_tracing(cli.verbose, &configured_level);

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Configuration loaded: {:?}", config);

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
///
/// `--verbose` wins, then `RUST_LOG`, then the configured level.
fn init_tracing(verbose: bool, configured_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured_level))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
