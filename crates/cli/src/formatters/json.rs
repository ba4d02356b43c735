//! JSON formatter.

use anyhow::Result;
use maintdesk_client::{
    Attachment, Equipment, MaintenanceHistory, MaintenanceTask, TaskLog, User,
};
use serde::Serialize;

use super::{Formatter, SessionView};

/// JSON formatter.
pub struct JsonFormatter;

fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

impl Formatter for JsonFormatter {
    fn format_equipment(&self, items: &[Equipment]) -> Result<String> {
        pretty(items)
    }

    fn format_history(&self, items: &[MaintenanceHistory]) -> Result<String> {
        pretty(items)
    }

    fn format_tasks(&self, items: &[MaintenanceTask]) -> Result<String> {
        pretty(items)
    }

    fn format_task_logs(&self, items: &[TaskLog]) -> Result<String> {
        pretty(items)
    }

    fn format_attachments(&self, items: &[Attachment]) -> Result<String> {
        pretty(items)
    }

    fn format_users(&self, items: &[User]) -> Result<String> {
        pretty(items)
    }

    fn format_session(&self, session: &SessionView) -> Result<String> {
        pretty(session)
    }
}
