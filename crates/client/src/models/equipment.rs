//! Equipment models.

use serde::{Deserialize, Serialize};

use super::Resource;

/// A tracked piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub installed_on: Option<String>,
    pub description: Option<String>,
}

impl Resource for Equipment {
    const PATH: &'static str = "/Equipment";
    const NAME: &'static str = "equipment";
}

/// Body for creating or updating equipment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
