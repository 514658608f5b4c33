//! User role and profile snapshot

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role claimed by the backend for the signed-in user
///
/// Only `admin` changes client behavior (the post-login destination).
/// Any other value is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Other(s) => s,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        // Exact match, as the backend sends it
        match value.as_str() {
            "admin" => Role::Admin,
            "user" => Role::User,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile snapshot returned by the Google exchange endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from("admin"), Role::Admin);
        assert_eq!(Role::from("user"), Role::User);
        assert_eq!(Role::from("seller"), Role::Other("seller".to_string()));
        // Case matters: only the exact "admin" claim is an admin
        assert!(!Role::from("Admin").is_admin());
    }

    #[test]
    fn test_role_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(role.as_str(), "seller");
    }

    #[test]
    fn test_profile_wire_names() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "user",
            "profileImage": "https://img.example.com/ada.png"
        }))
        .unwrap();

        assert_eq!(profile.id, "u1");
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.profile_image.as_deref(), Some("https://img.example.com/ada.png"));

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["_id"], "u1");
        assert_eq!(back["fullName"], "Ada Lovelace");
    }
}
