//! Table formatter.
//!
//! Fixed-width columns with a `====` underline row, one line per item.

use anyhow::Result;
use maintdesk_client::{
    Attachment, Equipment, MaintenanceHistory, MaintenanceTask, TaskLog, User,
};
use std::fmt::Write;

use super::common::{format_missing, format_missing_display, truncate};
use super::{Formatter, SessionView};

/// Table formatter.
pub struct TableFormatter;

fn empty_state(resource: &str) -> String {
    format!("No {} found.\n", resource)
}

impl Formatter for TableFormatter {
    fn format_equipment(&self, items: &[Equipment]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("equipment"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<6} {:<30} {:<18} {:<20} {:<12}",
            "ID", "NAME", "SERIAL", "LOCATION", "STATUS"
        )?;
        writeln!(
            output,
            "{:<6} {:<30} {:<18} {:<20} {:<12}",
            "==", "====", "======", "========", "======"
        )?;
        for item in items {
            writeln!(
                output,
                "{:<6} {:<30} {:<18} {:<20} {:<12}",
                item.id,
                truncate(&item.name, 30),
                format_missing(item.serial_number.as_deref()),
                truncate(format_missing(item.location.as_deref()), 20),
                format_missing(item.status.as_deref()),
            )?;
        }
        Ok(output)
    }

    fn format_history(&self, items: &[MaintenanceHistory]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("maintenance history"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<6} {:<10} {:<12} {:<20} {:<10} {}",
            "ID", "EQUIPMENT", "DATE", "PERFORMED BY", "COST", "SUMMARY"
        )?;
        writeln!(
            output,
            "{:<6} {:<10} {:<12} {:<20} {:<10} {}",
            "==", "=========", "====", "============", "====", "======="
        )?;
        for item in items {
            let cost = item
                .cost
                .map(|c| format!("{c:.2}"))
                .unwrap_or_else(|| format_missing(None).to_string());
            writeln!(
                output,
                "{:<6} {:<10} {:<12} {:<20} {:<10} {}",
                item.id,
                item.equipment_id,
                format_missing(item.performed_on.as_deref()),
                truncate(format_missing(item.performed_by.as_deref()), 20),
                cost,
                format_missing(item.summary.as_deref()),
            )?;
        }
        Ok(output)
    }

    fn format_tasks(&self, items: &[MaintenanceTask]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("tasks"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<6} {:<36} {:<10} {:<12} {:<12} {:<20}",
            "ID", "TITLE", "EQUIPMENT", "STATUS", "DUE", "ASSIGNED TO"
        )?;
        writeln!(
            output,
            "{:<6} {:<36} {:<10} {:<12} {:<12} {:<20}",
            "==", "=====", "=========", "======", "===", "==========="
        )?;
        for task in items {
            writeln!(
                output,
                "{:<6} {:<36} {:<10} {:<12} {:<12} {:<20}",
                task.id,
                truncate(&task.title, 36),
                format_missing_display(task.equipment_id),
                task.status.as_str(),
                format_missing(task.due_date.as_deref()),
                format_missing(task.assigned_to.as_deref()),
            )?;
        }
        Ok(output)
    }

    fn format_task_logs(&self, items: &[TaskLog]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("task logs"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<6} {:<6} {:<25} {:<20} {}",
            "ID", "TASK", "CREATED", "BY", "MESSAGE"
        )?;
        writeln!(
            output,
            "{:<6} {:<6} {:<25} {:<20} {}",
            "==", "====", "=======", "==", "======="
        )?;
        for log in items {
            writeln!(
                output,
                "{:<6} {:<6} {:<25} {:<20} {}",
                log.id,
                log.task_id,
                format_missing(log.created_at.as_deref()),
                format_missing(log.created_by.as_deref()),
                log.message,
            )?;
        }
        Ok(output)
    }

    fn format_attachments(&self, items: &[Attachment]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("attachments"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<6} {:<32} {:<6} {:<10} {:<24} {:<10}",
            "ID", "FILE", "TASK", "EQUIPMENT", "TYPE", "SIZE"
        )?;
        writeln!(
            output,
            "{:<6} {:<32} {:<6} {:<10} {:<24} {:<10}",
            "==", "====", "====", "=========", "====", "===="
        )?;
        for item in items {
            writeln!(
                output,
                "{:<6} {:<32} {:<6} {:<10} {:<24} {:<10}",
                item.id,
                truncate(&item.file_name, 32),
                format_missing_display(item.task_id),
                format_missing_display(item.equipment_id),
                format_missing(item.content_type.as_deref()),
                format_missing_display(item.size),
            )?;
        }
        Ok(output)
    }

    fn format_users(&self, items: &[User]) -> Result<String> {
        if items.is_empty() {
            return Ok(empty_state("users"));
        }

        let mut output = String::new();
        writeln!(
            output,
            "{:<10} {:<24} {:<32} {:<12}",
            "ID", "NAME", "EMAIL", "ROLE"
        )?;
        writeln!(
            output,
            "{:<10} {:<24} {:<32} {:<12}",
            "==", "====", "=====", "===="
        )?;
        for user in items {
            writeln!(
                output,
                "{:<10} {:<24} {:<32} {:<12}",
                user.id,
                truncate(&user.name, 24),
                user.email,
                format_missing_display(user.role.as_ref()),
            )?;
        }
        Ok(output)
    }

    fn format_session(&self, session: &SessionView) -> Result<String> {
        if !session.authenticated {
            return Ok("Not logged in.\n".to_string());
        }

        let mut output = String::new();
        writeln!(output, "User:      {}", format_missing(session.name.as_deref()))?;
        writeln!(output, "User ID:   {}", format_missing(session.user_id.as_deref()))?;
        writeln!(output, "Role:      {}", format_missing_display(session.role.as_ref()))?;
        writeln!(output, "Expires:   {}", format_missing(session.expiry.as_deref()))?;
        writeln!(
            output,
            "Refresh:   {}",
            if session.can_refresh { "available" } else { "none" }
        )?;
        if session.sections.is_empty() {
            writeln!(output, "Sections:  none")?;
        } else {
            writeln!(output, "Sections:  {}", session.sections.join(", "))?;
        }
        Ok(output)
    }
}
