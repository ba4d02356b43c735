//! Maintenance task command implementation.
//!
//! Invariants:
//! - Status names are parsed leniently (`in progress`, `in_progress` and
//!   `InProgress` are the same status); unknown names are sent unchanged.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use maintdesk_client::{TaskParams, TaskStatus};
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Debug, Subcommand)]
pub enum TasksCommand {
    /// List maintenance tasks
    List {
        /// Only tasks for this equipment
        #[arg(long)]
        equipment_id: Option<i64>,
        /// Only tasks with this status
        #[arg(long)]
        status: Option<String>,
        /// Maximum number of tasks to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show one task
    Get { id: i64 },
    /// Schedule a new task
    Create {
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Change fields of an existing task
    Update {
        id: i64,
        #[command(flatten)]
        fields: TaskFields,
    },
    /// Mark a task as completed
    Complete { id: i64 },
    /// Delete a task
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct TaskFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    equipment_id: Option<i64>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    assigned_to: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    due_date: Option<String>,
    /// Open, InProgress, Completed or Cancelled
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    priority: Option<String>,
}

impl From<TaskFields> for TaskParams {
    fn from(fields: TaskFields) -> Self {
        Self {
            equipment_id: fields.equipment_id,
            title: fields.title,
            description: fields.description,
            assigned_to: fields.assigned_to,
            due_date: fields.due_date,
            status: fields.status.as_deref().map(TaskStatus::parse),
            priority: fields.priority,
        }
    }
}

pub async fn run(
    config: Config,
    command: TasksCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        TasksCommand::List {
            equipment_id,
            status,
            count,
        } => {
            let mut tasks = cancel.run(client.list_tasks(equipment_id)).await?;
            if let Some(status) = status.as_deref().map(TaskStatus::parse) {
                tasks.retain(|t| t.status == status);
            }
            tasks.truncate(count);
            let output = formatter.format_tasks(&tasks)?;
            output_result(&output, format, output_file.as_ref())
        }
        TasksCommand::Get { id } => {
            let task = cancel
                .run(client.get_task(id))
                .await
                .with_context(|| format!("Failed to get task {id}"))?;
            let output = formatter.format_tasks(std::slice::from_ref(&task))?;
            output_result(&output, format, output_file.as_ref())
        }
        TasksCommand::Create { fields } => {
            if fields.title.is_none() {
                anyhow::bail!("--title is required when creating a task");
            }
            let task = cancel
                .run(client.create_task(&TaskParams::from(fields)))
                .await?;
            println!("Task '{}' created with id {}.", task.title, task.id);
            Ok(())
        }
        TasksCommand::Update { id, fields } => {
            cancel
                .run(client.update_task(id, &TaskParams::from(fields)))
                .await
                .with_context(|| format!("Failed to update task {id}"))?;
            println!("Task {id} updated.");
            Ok(())
        }
        TasksCommand::Complete { id } => {
            let params = TaskParams {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            };
            cancel
                .run(client.update_task(id, &params))
                .await
                .with_context(|| format!("Failed to complete task {id}"))?;
            println!("Task {id} marked as completed.");
            Ok(())
        }
        TasksCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id.to_string(), "task")? {
                return Ok(());
            }
            cancel
                .run(client.delete_task(id))
                .await
                .with_context(|| format!("Failed to delete task {id}"))?;
            println!("Task {id} deleted.");
            Ok(())
        }
    }
}
