//! Task log command implementation.

use anyhow::{Context, Result};
use clap::Subcommand;

use maintdesk_client::TaskLogParams;
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Debug, Subcommand)]
pub enum TaskLogsCommand {
    /// List log entries
    List {
        /// Only entries for this task
        #[arg(long)]
        task_id: Option<i64>,
        /// Maximum number of entries to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show one log entry
    Get { id: i64 },
    /// Add a log entry to a task
    Create {
        #[arg(long)]
        task_id: i64,
        /// Log message
        message: String,
    },
    /// Delete a log entry
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: TaskLogsCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        TaskLogsCommand::List { task_id, count } => {
            let mut logs = cancel.run(client.list_task_logs(task_id)).await?;
            logs.truncate(count);
            let output = formatter.format_task_logs(&logs)?;
            output_result(&output, format, output_file.as_ref())
        }
        TaskLogsCommand::Get { id } => {
            let log = cancel
                .run(client.get_task_log(id))
                .await
                .with_context(|| format!("Failed to get task log {id}"))?;
            let output = formatter.format_task_logs(std::slice::from_ref(&log))?;
            output_result(&output, format, output_file.as_ref())
        }
        TaskLogsCommand::Create { task_id, message } => {
            if message.trim().is_empty() {
                anyhow::bail!("Log message cannot be empty");
            }
            let log = cancel
                .run(client.create_task_log(&TaskLogParams { task_id, message }))
                .await?;
            println!("Log entry {} added to task {}.", log.id, log.task_id);
            Ok(())
        }
        TaskLogsCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id.to_string(), "task log")? {
                return Ok(());
            }
            cancel
                .run(client.delete_task_log(id))
                .await
                .with_context(|| format!("Failed to delete task log {id}"))?;
            println!("Task log {id} deleted.");
            Ok(())
        }
    }
}
