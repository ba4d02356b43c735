//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide table and JSON renderings for every resource the CLI prints.
//! - Write the rendered output to stdout or a file.
//!
//! Does NOT handle:
//! - Fetching data (see `commands`).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior | Example |
//! |--------|---------------------|---------|
//! | JSON | Valid empty structure | `[]` |
//! | Table | Human message | `No equipment found.` |
//!
//! Missing values print as `N/A` in tables and `null` in JSON.

use anyhow::Result;
use maintdesk_client::{
    Attachment, Equipment, MaintenanceHistory, MaintenanceTask, Role, Section, SessionInfo,
    TaskLog, User,
};
use serde::Serialize;

mod common;
mod json;
mod table;

pub use common::{output_result, write_to_file};
pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// What `whoami` prints.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub expiry: Option<String>,
    pub can_refresh: bool,
    pub sections: Vec<String>,
}

impl From<&SessionInfo> for SessionView {
    fn from(info: &SessionInfo) -> Self {
        Self {
            authenticated: info.is_authenticated(),
            user_id: info.user_id.clone(),
            name: info.name.clone(),
            role: info.role.clone(),
            expiry: info.expiry.map(|e| e.to_rfc3339()),
            can_refresh: info.has_refresh_token,
            sections: Section::allowed_for(info.role.as_ref())
                .into_iter()
                .map(|s| s.title().to_string())
                .collect(),
        }
    }
}

/// Formatter trait for the output formats.
pub trait Formatter {
    fn format_equipment(&self, items: &[Equipment]) -> Result<String>;

    fn format_history(&self, items: &[MaintenanceHistory]) -> Result<String>;

    fn format_tasks(&self, items: &[MaintenanceTask]) -> Result<String>;

    fn format_task_logs(&self, items: &[TaskLog]) -> Result<String>;

    fn format_attachments(&self, items: &[Attachment]) -> Result<String>;

    fn format_users(&self, items: &[User]) -> Result<String>;

    fn format_session(&self, session: &SessionView) -> Result<String>;
}

/// Get a formatter for the specified output format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
