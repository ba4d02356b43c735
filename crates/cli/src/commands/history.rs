//! Maintenance history command implementation.

use anyhow::{Context, Result};
use clap::Subcommand;

use maintdesk_client::HistoryParams;
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List maintenance records
    List {
        /// Only records for this equipment
        #[arg(long)]
        equipment_id: Option<i64>,
        /// Maximum number of records to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show one maintenance record
    Get { id: i64 },
    /// Record completed maintenance
    Create {
        #[arg(long)]
        equipment_id: i64,
        /// Date the work was done (YYYY-MM-DD)
        #[arg(long)]
        performed_on: Option<String>,
        #[arg(long)]
        performed_by: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long)]
        cost: Option<f64>,
    },
    /// Delete a maintenance record
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(
    config: Config,
    command: HistoryCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        HistoryCommand::List {
            equipment_id,
            count,
        } => {
            let mut items = cancel.run(client.list_history(equipment_id)).await?;
            items.truncate(count);
            let output = formatter.format_history(&items)?;
            output_result(&output, format, output_file.as_ref())
        }
        HistoryCommand::Get { id } => {
            let item = cancel
                .run(client.get_history(id))
                .await
                .with_context(|| format!("Failed to get maintenance record {id}"))?;
            let output = formatter.format_history(std::slice::from_ref(&item))?;
            output_result(&output, format, output_file.as_ref())
        }
        HistoryCommand::Create {
            equipment_id,
            performed_on,
            performed_by,
            summary,
            cost,
        } => {
            let params = HistoryParams {
                equipment_id: Some(equipment_id),
                performed_on,
                performed_by,
                summary,
                cost,
            };
            let item = cancel.run(client.create_history(&params)).await?;
            println!(
                "Maintenance record {} created for equipment {}.",
                item.id, item.equipment_id
            );
            Ok(())
        }
        HistoryCommand::Delete { id, force } => {
            if !force
                && !crate::interactive::confirm_delete(&id.to_string(), "maintenance record")?
            {
                return Ok(());
            }
            cancel
                .run(client.delete_history(id))
                .await
                .with_context(|| format!("Failed to delete maintenance record {id}"))?;
            println!("Maintenance record {id} deleted.");
            Ok(())
        }
    }
}
