//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;
use maintdesk_config::Config;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;

pub(crate) async fn run_command(
    cli: Cli,
    config: Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let output = cli.output.as_str();
    let output_file = cli.output_file.clone();

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::run_login(config, email, password, cancel).await
        }
        Commands::Logout => commands::session::run_logout(config),
        Commands::Whoami => commands::session::run_whoami(config, output, output_file),
        Commands::Equipment { command } => {
            commands::equipment::run(config, command, output, output_file, cancel).await
        }
        Commands::History { command } => {
            commands::history::run(config, command, output, output_file, cancel).await
        }
        Commands::Tasks { command } => {
            commands::tasks::run(config, command, output, output_file, cancel).await
        }
        Commands::TaskLogs { command } => {
            commands::task_logs::run(config, command, output, output_file, cancel).await
        }
        Commands::Attachments { command } => {
            commands::attachments::run(config, command, output, output_file, cancel).await
        }
        Commands::Users { command } => {
            commands::users::run(config, command, output, output_file, cancel).await
        }
    }
}
