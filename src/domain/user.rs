//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_USER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity.
///
/// Serialized verbatim in responses: the stored row is the API record,
/// password included (credential handling is out of scope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    /// User display name
    pub name: String,
    /// User email address, unique across all users
    pub email: String,
    /// User password, stored as given
    pub password: String,
    /// Role, defaults to USER when not sent
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// User update data transfer object.
///
/// A field is applied iff the caller sent it; absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!(UserRole::User.to_string(), "USER");
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
        assert_eq!(UserRole::from("ADMIN"), UserRole::Admin);
        assert_eq!(UserRole::from("USER"), UserRole::User);
        // Unknown values fall back to the default role
        assert_eq!(UserRole::from("SUPERVISOR"), UserRole::User);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(
            serde_json::to_value(UserRole::Admin).unwrap(),
            serde_json::json!("ADMIN")
        );
        let role: UserRole = serde_json::from_value(serde_json::json!("USER")).unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn user_serializes_full_record() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
            role: UserRole::User,
        };

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], "test@example.com");
        assert_eq!(value["password"], "password123");
        assert_eq!(value["role"], "USER");
        assert!(!value["id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn create_user_role_defaults_to_none_when_absent() {
        let payload: CreateUser = serde_json::from_value(serde_json::json!({
            "name": "Test User",
            "email": "test@example.com",
            "password": "password123"
        }))
        .unwrap();

        assert!(payload.role.is_none());
        assert_eq!(payload.role.unwrap_or_default(), UserRole::User);
    }

    #[test]
    fn update_user_distinguishes_absent_from_sent() {
        let payload: UpdateUser =
            serde_json::from_value(serde_json::json!({ "name": "New Name" })).unwrap();

        assert_eq!(payload.name.as_deref(), Some("New Name"));
        assert!(payload.email.is_none());
        assert!(payload.password.is_none());
        assert!(payload.role.is_none());

        // An explicitly sent empty string counts as sent
        let payload: UpdateUser =
            serde_json::from_value(serde_json::json!({ "name": "" })).unwrap();
        assert_eq!(payload.name.as_deref(), Some(""));
    }
}
