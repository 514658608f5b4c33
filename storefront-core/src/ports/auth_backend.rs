//! Authentication backend port
//!
//! Defines the three REST calls the client makes. The flows only see this
//! trait, so they can be driven by the HTTP adapter or by a test double.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Credentials, Registration, Role, UserProfile};

/// Body of a successful `POST /api/auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful `POST /api/auth/google`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityExchangeResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: UserProfile,
}

/// Error body the backend sends on failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Failure of a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The server answered with a non-success status
    #[error("Request rejected with HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body could not be read
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server, if there was one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { message, .. } => {
                message.as_deref().filter(|m| !m.is_empty())
            }
            _ => None,
        }
    }
}

/// Authentication REST backend
pub trait AuthBackend: Send + Sync {
    /// `POST /api/auth/login` with `{email, password}`
    fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError>;

    /// `POST /api/auth/register` with `{fullName, email, password, role}`
    ///
    /// The success body is opaque.
    fn register(&self, registration: &Registration) -> Result<(), BackendError>;

    /// `POST /api/auth/google` with `{token}`
    fn exchange_identity_token(
        &self,
        identity_token: &str,
    ) -> Result<IdentityExchangeResponse, BackendError>;
}
