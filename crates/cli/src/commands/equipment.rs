//! Equipment command implementation.
//!
//! Responsibilities:
//! - List, show, create, update and delete equipment.
//!
//! Invariants:
//! - Delete operations require confirmation unless --force is used.
//! - Update sends only the fields given on the command line.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

use maintdesk_client::EquipmentParams;
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result};

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// List equipment
    List {
        /// Maximum number of items to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show one piece of equipment
    Get { id: i64 },
    /// Register new equipment
    Create {
        #[command(flatten)]
        fields: EquipmentFields,
    },
    /// Change fields of existing equipment
    Update {
        id: i64,
        #[command(flatten)]
        fields: EquipmentFields,
    },
    /// Delete equipment
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct EquipmentFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    serial_number: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    status: Option<String>,
    /// Installation date (YYYY-MM-DD)
    #[arg(long)]
    installed_on: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl From<EquipmentFields> for EquipmentParams {
    fn from(fields: EquipmentFields) -> Self {
        Self {
            name: fields.name,
            serial_number: fields.serial_number,
            model: fields.model,
            location: fields.location,
            status: fields.status,
            installed_on: fields.installed_on,
            description: fields.description,
        }
    }
}

pub async fn run(
    config: Config,
    command: EquipmentCommand,
    output_format: &str,
    output_file: Option<std::path::PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        EquipmentCommand::List { count } => {
            info!("Listing equipment");
            let mut items = cancel.run(client.list_equipment()).await?;
            items.truncate(count);
            let output = formatter.format_equipment(&items)?;
            output_result(&output, format, output_file.as_ref())
        }
        EquipmentCommand::Get { id } => {
            let item = cancel
                .run(client.get_equipment(id))
                .await
                .with_context(|| format!("Failed to get equipment {id}"))?;
            let output = formatter.format_equipment(std::slice::from_ref(&item))?;
            output_result(&output, format, output_file.as_ref())
        }
        EquipmentCommand::Create { fields } => {
            if fields.name.is_none() {
                anyhow::bail!("--name is required when creating equipment");
            }
            let params = EquipmentParams::from(fields);
            let item = cancel.run(client.create_equipment(&params)).await?;
            println!("Equipment '{}' created with id {}.", item.name, item.id);
            Ok(())
        }
        EquipmentCommand::Update { id, fields } => {
            let params = EquipmentParams::from(fields);
            cancel
                .run(client.update_equipment(id, &params))
                .await
                .with_context(|| format!("Failed to update equipment {id}"))?;
            println!("Equipment {id} updated.");
            Ok(())
        }
        EquipmentCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id.to_string(), "equipment")? {
                return Ok(());
            }
            cancel
                .run(client.delete_equipment(id))
                .await
                .with_context(|| format!("Failed to delete equipment {id}"))?;
            println!("Equipment {id} deleted.");
            Ok(())
        }
    }
}
