//! User management models.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use super::{Resource, Role};

/// A dashboard user account.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "crate::serde_helpers::string_from_number_or_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Option<Role>,
}

impl Resource for User {
    const PATH: &'static str = "/Users";
    const NAME: &'static str = "user";
}

fn serialize_opt_secret<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}

fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Parameters for creating a user.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "serialize_secret")]
    pub password: SecretString,
    pub role: Role,
}

/// Parameters for updating a user. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_secret"
    )]
    pub password: Option<SecretString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_user() {
        let json = r#"{"id": 5, "name": "Ana", "email": "ana@example.com", "role": "Technician"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "5");
        assert_eq!(user.role, Some(Role::Technician));
    }

    #[test]
    fn test_deserialize_user_with_optional_fields_missing() {
        let user: User = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(user.id, "abc");
        assert!(user.name.is_empty());
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_update_params_only_send_set_fields() {
        let params = UpdateUserParams {
            password: Some(SecretString::new("n3w".to_string().into())),
            ..Default::default()
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, serde_json::json!({"password": "n3w"}));
        assert!(!format!("{params:?}").contains("n3w"));
    }

    #[test]
    fn test_create_params_serialize_role_name() {
        let params = CreateUserParams {
            name: "Lee".to_string(),
            email: "lee@example.com".to_string(),
            password: SecretString::new("pw".to_string().into()),
            role: Role::Admin,
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["role"], "Admin");
        assert_eq!(body["password"], "pw");
    }
}
