//! Authentication payloads.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

/// Credential bundle returned by login and token refresh.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthBundle {
    pub token: String,
    pub refresh_token: String,
    #[serde(deserialize_with = "crate::serde_helpers::timestamp")]
    pub access_token_expiry: DateTime<Utc>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

/// Body of `POST /Authentication/Login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
