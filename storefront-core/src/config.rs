//! Configuration management
//!
//! Settings live in `settings.json` inside the storefront directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:5000", "requestTimeoutSecs": 30 },
//!   "auth": { "googleClientId": "...", "redirectDelayMs": 1500 },
//!   "routes": { "admin": "/admin", "home": "/", ... },
//!   "marquee": { "speed": 100 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::Routes;

/// Default backend, as the storefront pages ship it
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Grace period before redirecting after signup
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;

/// Marquee speed in columns per second
pub const DEFAULT_MARQUEE_SPEED: f64 = 100.0;

/// Environment variable overriding the backend base URL
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Environment variables holding the Google client id, in priority order
pub const GOOGLE_CLIENT_ID_ENVS: &[&str] = &["GOOGLE_CLIENT_ID", "REACT_APP_GOOGLE_CLIENT_ID"];

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(default)]
    routes: Routes,
    #[serde(default)]
    marquee: MarqueeSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSettings {
    #[serde(default)]
    google_client_id: Option<String>,
    #[serde(default)]
    redirect_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarqueeSettings {
    #[serde(default)]
    speed: Option<f64>,
}

/// Storefront client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// None means no client-side timeout (transport default only)
    pub request_timeout: Option<Duration>,
    pub google_client_id: Option<String>,
    pub redirect_delay: Duration,
    pub routes: Routes,
    pub marquee_speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            google_client_id: None,
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            routes: Routes::default(),
            marquee_speed: DEFAULT_MARQUEE_SPEED,
        }
    }
}

impl Config {
    /// Load config from the storefront directory
    ///
    /// Environment variables win over the settings file:
    /// - `STOREFRONT_API_URL` for the backend
    /// - `GOOGLE_CLIENT_ID` (or `REACT_APP_GOOGLE_CLIENT_ID`) for the identity SDK
    pub fn load(storefront_dir: &Path) -> Result<Self> {
        let settings_path = storefront_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {:?}", settings_path))?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let api_base_url = non_empty_env(API_URL_ENV)
            .or_else(|| raw.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let google_client_id = GOOGLE_CLIENT_ID_ENVS
            .iter()
            .find_map(|name| non_empty_env(name))
            .or_else(|| raw.auth.google_client_id.clone());

        let redirect_delay = Duration::from_millis(
            raw.auth.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
        );

        let marquee_speed = raw
            .marquee
            .speed
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_MARQUEE_SPEED);

        Ok(Self {
            api_base_url,
            request_timeout: raw.api.request_timeout_secs.map(Duration::from_secs),
            google_client_id,
            redirect_delay,
            routes: raw.routes,
            marquee_speed,
        })
    }

    /// Whether credentials would travel over an unencrypted connection
    pub fn is_insecure_transport(&self) -> bool {
        !self.api_base_url.trim_start().to_lowercase().starts_with("https://")
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
