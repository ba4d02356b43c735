//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read global options from flags or `MAINTDESK_*` environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the final configuration (see `main`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "maintdesk")]
#[command(about = "maintdesk - Maintenance dashboard from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  maintdesk login --email tech@example.com\n  maintdesk whoami\n  maintdesk equipment list\n  maintdesk tasks list --equipment-id 3 -o json\n  maintdesk attachments upload report.pdf --task-id 12\n  maintdesk logout\n"
)]
pub struct Cli {
    /// Base URL of the maintenance API (e.g., https://maint.example.com/api)
    #[arg(short, long, global = true, env = "MAINTDESK_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MAINTDESK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, global = true)]
    pub skip_verify: bool,

    /// Path of the stored session file
    #[arg(long, global = true, env = "MAINTDESK_SESSION_PATH", value_name = "FILE")]
    pub session_path: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Log line format on stderr (pretty, json)
    #[arg(long, global = true, env = "MAINTDESK_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// OTLP endpoint for exporting traces (e.g., http://localhost:4317)
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Serve Prometheus metrics on this address (e.g., 127.0.0.1:9090)
    #[arg(long, global = true, value_name = "ADDR")]
    pub metrics_bind: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store a new session
    Login {
        /// Account email (or MAINTDESK_EMAIL)
        #[arg(short, long)]
        email: Option<String>,

        /// Account password (or MAINTDESK_PASSWORD; prompts when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored session and the sections it may open
    Whoami,

    /// List and manage equipment
    Equipment {
        #[command(subcommand)]
        command: commands::equipment::EquipmentCommand,
    },

    /// List and record maintenance history
    History {
        #[command(subcommand)]
        command: commands::history::HistoryCommand,
    },

    /// List and manage maintenance tasks
    Tasks {
        #[command(subcommand)]
        command: commands::tasks::TasksCommand,
    },

    /// List and write task log entries
    TaskLogs {
        #[command(subcommand)]
        command: commands::task_logs::TaskLogsCommand,
    },

    /// Upload, download and manage attachments
    Attachments {
        #[command(subcommand)]
        command: commands::attachments::AttachmentsCommand,
    },

    /// Manage user accounts (Admin only)
    Users {
        #[command(subcommand)]
        command: commands::users::UsersCommand,
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
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "maintdesk",
            "equipment",
            "list",
            "-o",
            "json",
            "--base-url",
            "http://localhost:5000",
        ])
        .unwrap();
        assert_eq!(cli.output, "json");
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:5000"));
        assert!(matches!(cli.command, Commands::Equipment { .. }));
    }
}
