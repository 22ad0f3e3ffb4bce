//! CLI command definitions and dispatch for the `sewage-watch` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! noun-verb pattern for history (e.g., `sewage-watch history list`).

pub mod ask;
pub mod history;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Wastewater monitoring backend: AI expert Q&A and detection history.
#[derive(Parser)]
#[command(name = "sewage-watch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config.toml (default: <data dir>/config.toml).
    #[arg(long, global = true, env = "SEWAGE_WATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (default: server.port from config, 8080).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default: server.host from config, 127.0.0.1).
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask the wastewater expert a single question.
    Ask {
        /// The question; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Inspect and edit detection history.
    History {
        #[command(subcommand)]
        action: history::HistoryCommand,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_joins_words() {
        let cli = Cli::parse_from(["sewage-watch", "ask", "COD", "超标", "怎么办"]);
        match cli.command {
            Commands::Ask { question } => assert_eq!(question.join(" "), "COD 超标 怎么办"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve_with_global_flags() {
        let cli = Cli::parse_from(["sewage-watch", "-vv", "--otel", "serve", "--port", "9000"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.otel);
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(9000));
                assert!(host.is_none());
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_history_find() {
        let cli = Cli::parse_from([
            "sewage-watch",
            "history",
            "find",
            "--type",
            "bottle",
            "--task-id",
            "3",
        ]);
        match cli.command {
            Commands::History {
                action: history::HistoryCommand::Find { kind, task_id, .. },
            } => {
                assert_eq!(kind.as_deref(), Some("bottle"));
                assert_eq!(task_id, Some(3));
            }
            _ => panic!("expected history find"),
        }
    }
}
