//! Third-party identity provider port
//!
//! The identity SDK is handed to the signup flow as an explicit capability
//! instead of being looked up from ambient global state.

use serde::Serialize;

use crate::domain::result::Result;

/// Whether the provider's SDK can be used right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityAvailability {
    Available,
    Unavailable,
}

impl IdentityAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, IdentityAvailability::Available)
    }
}

/// Settings passed to the SDK's initialize call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    pub client_id: String,
    pub auto_select: bool,
    pub cancel_on_tap_outside: bool,
}

impl IdentitySettings {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            auto_select: false,
            cancel_on_tap_outside: true,
        }
    }
}

/// Result of asking the SDK to show its sign-in prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The user picked an account; carries the identity token
    Credential(String),
    /// The prompt could not be shown
    NotDisplayed(String),
    /// The user skipped or dismissed the prompt
    Skipped(String),
}

/// Identity provider SDK
pub trait IdentityProvider: Send + Sync {
    /// Provider name (e.g., "google")
    fn name(&self) -> &str;

    /// Presence check: is the SDK already loaded?
    fn availability(&self) -> IdentityAvailability;

    /// Load the SDK. Callers go through `GoogleSignIn::ensure_loaded`,
    /// which skips this when the SDK is already present.
    fn load(&self) -> Result<()>;

    /// Configure the SDK with the application's client id
    fn initialize(&self, settings: &IdentitySettings) -> Result<()>;

    /// Show the sign-in prompt
    fn prompt(&self) -> Result<PromptOutcome>;
}
