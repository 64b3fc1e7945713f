//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// User Auth API - user management and token authentication server
#[derive(Parser, Debug)]
#[command(name = "user-auth-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),
}

/// Arguments for the serve command. Unset values fall back to the
/// `SERVER_HOST` / `SERVER_PORT` configuration.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["user-auth-api", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.host, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_migrate_with_global_verbose() {
        let cli = Cli::try_parse_from(["user-auth-api", "migrate", "status", "-v"]).unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }

    #[test]
    fn test_unknown_migrate_action_rejected() {
        assert!(Cli::try_parse_from(["user-auth-api", "migrate", "sideways"]).is_err());
    }
}
