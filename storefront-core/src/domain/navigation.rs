//! Navigation targets produced by the auth flows
//!
//! Flows never navigate themselves; they return a `Navigation` that the
//! caller acts on once the delay has elapsed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Destination pages known to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Admin,
    Home,
    Login,
    Dashboard,
}

/// Path for each route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub admin: String,
    pub home: String,
    pub login: String,
    pub dashboard: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            admin: "/admin".to_string(),
            home: "/".to_string(),
            login: "/login".to_string(),
            dashboard: "/dashboard".to_string(),
        }
    }
}

impl Routes {
    pub fn path(&self, route: Route) -> &str {
        match route {
            Route::Admin => &self.admin,
            Route::Home => &self.home,
            Route::Login => &self.login,
            Route::Dashboard => &self.dashboard,
        }
    }
}

/// A pending navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: Route,
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
}

impl Navigation {
    pub fn immediate(route: Route) -> Self {
        Self {
            route,
            delay: Duration::ZERO,
        }
    }

    pub fn after(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }
}

fn serialize_millis<S>(delay: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(delay.as_millis() as u64)
}
