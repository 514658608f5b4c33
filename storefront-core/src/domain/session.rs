//! Persisted session record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{Role, UserProfile};

/// The client's one active session
///
/// Stored as a single document so token, role and profile are always
/// written together. Once stored it is what the client consults to decide
/// whether the user is signed in and which role they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
    pub saved_at: DateTime<Utc>,
}

impl Session {
    /// Session established by email/password login
    pub fn from_login(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role: Some(role),
            user: None,
            saved_at: Utc::now(),
        }
    }

    /// Session established by exchanging a third-party identity token
    ///
    /// The role mirrors the profile so later reads have a single place to look.
    pub fn from_identity(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            role: Some(user.role.clone()),
            user: Some(user),
            saved_at: Utc::now(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(Role::is_admin)
    }
}
