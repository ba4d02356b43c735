//! Roles and the navigation sections each role may open.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Technician,
    /// Role name not known to this client.
    Other(String),
}

impl Role {
    /// Parse a role name as stored or returned by the API (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "technician" => Role::Technician,
            _ => Role::Other(name.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "Admin",
            Role::Technician => "Technician",
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Role::from_name(&name))
    }
}

/// Dashboard navigation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Dashboard,
    Equipment,
    MaintenanceHistory,
    Tasks,
    TaskLogs,
    Attachments,
    Users,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Dashboard,
        Section::Equipment,
        Section::MaintenanceHistory,
        Section::Tasks,
        Section::TaskLogs,
        Section::Attachments,
        Section::Users,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Equipment => "Equipment",
            Section::MaintenanceHistory => "Maintenance History",
            Section::Tasks => "Tasks",
            Section::TaskLogs => "Task Logs",
            Section::Attachments => "Attachments",
            Section::Users => "Users",
        }
    }

    /// Whether a user with `role` may open this section.
    pub fn is_allowed_for(self, role: &Role) -> bool {
        match (self, role) {
            (Section::Users, Role::Admin) => true,
            (Section::Users, _) => false,
            (_, Role::Admin | Role::Technician) => true,
            (_, Role::Other(_)) => false,
        }
    }

    /// Sections reachable with the given role. No role means none.
    pub fn allowed_for(role: Option<&Role>) -> Vec<Section> {
        match role {
            Some(role) => Self::ALL
                .into_iter()
                .filter(|s| s.is_allowed_for(role))
                .collect(),
            None => Vec::new(),
        }
    }
}
