//! Attachment command implementation.
//!
//! Responsibilities:
//! - List and show attachment metadata.
//! - Upload a local file to a task or a piece of equipment.
//! - Download an attachment body to disk.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

use maintdesk_client::AttachmentUpload;
use maintdesk_config::Config;
use maintdesk_config::constants::DEFAULT_LIST_PAGE_SIZE;

use crate::cancellation::CancellationToken;
use crate::formatters::{OutputFormat, get_formatter, output_result, write_to_file};

#[derive(Debug, Subcommand)]
pub enum AttachmentsCommand {
    /// List attachments
    List {
        /// Only attachments of this task
        #[arg(long)]
        task_id: Option<i64>,
        /// Maximum number of attachments to print
        #[arg(short, long, default_value_t = DEFAULT_LIST_PAGE_SIZE)]
        count: usize,
    },
    /// Show attachment metadata
    Get { id: i64 },
    /// Upload a file
    #[command(group(
        clap::ArgGroup::new("owner").required(true).args(["task_id", "equipment_id"])
    ))]
    Upload {
        /// File to upload
        file: PathBuf,
        #[arg(long)]
        task_id: Option<i64>,
        #[arg(long)]
        equipment_id: Option<i64>,
        /// Content type (guessed from the file extension when omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Download an attachment
    Download {
        id: i64,
        /// Destination file (defaults to the stored file name)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Delete an attachment
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Content type for common upload extensions.
fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type)
}

pub async fn run(
    config: Config,
    command: AttachmentsCommand,
    output_format: &str,
    output_file: Option<PathBuf>,
    cancel: &CancellationToken,
) -> Result<()> {
    let client = super::build_client_from_config(&config)?;
    let format = OutputFormat::from_str(output_format)?;
    let formatter = get_formatter(format);

    match command {
        AttachmentsCommand::List { task_id, count } => {
            let mut items = cancel.run(client.list_attachments(task_id)).await?;
            items.truncate(count);
            let output = formatter.format_attachments(&items)?;
            output_result(&output, format, output_file.as_ref())
        }
        AttachmentsCommand::Get { id } => {
            let item = cancel
                .run(client.get_attachment(id))
                .await
                .with_context(|| format!("Failed to get attachment {id}"))?;
            let output = formatter.format_attachments(std::slice::from_ref(&item))?;
            output_result(&output, format, output_file.as_ref())
        }
        AttachmentsCommand::Upload {
            file,
            task_id,
            equipment_id,
            content_type,
        } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("{} has no file name", file.display()))?;
            let upload = AttachmentUpload {
                content_type: content_type
                    .or_else(|| guess_content_type(&file).map(str::to_string)),
                file_name,
                bytes,
                task_id,
                equipment_id,
            };

            info!(file = %upload.file_name, size = upload.bytes.len(), "Uploading attachment");
            let item = cancel.run(client.upload_attachment(&upload)).await?;
            println!("Uploaded '{}' as attachment {}.", item.file_name, item.id);
            Ok(())
        }
        AttachmentsCommand::Download { id, out } => {
            let path = match out {
                Some(path) => path,
                None => {
                    let meta = cancel
                        .run(client.get_attachment(id))
                        .await
                        .with_context(|| format!("Failed to get attachment {id}"))?;
                    Path::new(&meta.file_name)
                        .file_name()
                        .map(PathBuf::from)
                        .unwrap_or_else(|| PathBuf::from(format!("attachment-{id}")))
                }
            };
            let content = cancel
                .run(client.download_attachment(id))
                .await
                .with_context(|| format!("Failed to download attachment {id}"))?;
            write_to_file(&content.bytes, &path)?;
            println!(
                "Saved attachment {id} to {} ({} bytes).",
                path.display(),
                content.bytes.len()
            );
            Ok(())
        }
        AttachmentsCommand::Delete { id, force } => {
            if !force && !crate::interactive::confirm_delete(&id.to_string(), "attachment")? {
                return Ok(());
            }
            cancel
                .run(client.delete_attachment(id))
                .await
                .with_context(|| format!("Failed to delete attachment {id}"))?;
            println!("Attachment {id} deleted.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("report.PDF")),
            Some("application/pdf")
        );
        assert_eq!(guess_content_type(Path::new("photo.jpeg")), Some("image/jpeg"));
        assert_eq!(guess_content_type(Path::new("firmware.bin")), None);
        assert_eq!(guess_content_type(Path::new("README")), None);
    }
}
