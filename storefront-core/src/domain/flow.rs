//! Presentational flow state
//!
//! None of these types are persisted.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::navigation::Navigation;

/// Lifecycle of a form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Lifecycle of the third-party identity sub-flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityState {
    #[default]
    Idle,
    Pending,
    Success,
    Failed,
}

/// Inline status shown next to a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowStatus {
    pub message: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

impl FlowStatus {
    /// The text to show, if any
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// What a submission resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowOutcome {
    pub state: FlowState,
    pub message: Option<String>,
    pub navigation: Option<Navigation>,
}

impl FlowOutcome {
    pub fn succeeded(&self) -> bool {
        self.state == FlowState::Success
    }
}

/// Social sign-in affordances shown on the signup page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    Facebook,
    Apple,
}

impl SocialProvider {
    /// Only Google has a backing operation; the others are placeholders
    pub fn is_enabled(&self) -> bool {
        matches!(self, SocialProvider::Google)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::Facebook => "Facebook",
            SocialProvider::Apple => "Apple",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(SocialProvider::Google),
            "facebook" => Ok(SocialProvider::Facebook),
            "apple" => Ok(SocialProvider::Apple),
            other => Err(format!(
                "Unknown provider: {}. Available: google, facebook, apple",
                other
            )),
        }
    }
}
