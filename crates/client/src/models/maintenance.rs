//! Maintenance history, task and task log models.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Resource;

/// A completed maintenance record for a piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceHistory {
    pub id: i64,
    pub equipment_id: i64,
    pub performed_on: Option<String>,
    pub performed_by: Option<String>,
    pub summary: Option<String>,
    pub cost: Option<f64>,
}

impl Resource for MaintenanceHistory {
    const PATH: &'static str = "/MaintenanceHistory";
    const NAME: &'static str = "maintenance history";
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Lifecycle state of a maintenance task.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Open => "Open",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn parse(value: &str) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "open" => TaskStatus::Open,
            "inprogress" => TaskStatus::InProgress,
            "completed" | "done" => TaskStatus::Completed,
            "cancelled" | "canceled" => TaskStatus::Cancelled,
            _ => TaskStatus::Other(value.to_string()),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TaskStatus::parse(&raw))
    }
}

/// A scheduled maintenance task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: i64,
    pub equipment_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub priority: Option<String>,
}

impl Resource for MaintenanceTask {
    const PATH: &'static str = "/Tasks";
    const NAME: &'static str = "task";
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// A log entry recorded against a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskLog {
    pub id: i64,
    pub task_id: i64,
    #[serde(default)]
    pub message: String,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
}

impl Resource for TaskLog {
    const PATH: &'static str = "/TaskLogs";
    const NAME: &'static str = "task log";
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLogParams {
    pub task_id: i64,
    pub message: String,
}
