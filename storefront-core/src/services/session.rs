//! Session service - inspect and clear the stored session

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Role, Route, Session, TokenClaims};
use crate::ports::SessionStore;

pub struct SessionService {
    sessions: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub fn current(&self) -> Result<Option<Session>> {
        self.sessions.load()
    }

    /// Summary of the stored session as of `now`
    pub fn summary(&self, now: DateTime<Utc>) -> Result<SessionSummary> {
        Ok(SessionSummary::from_session(self.sessions.load()?.as_ref(), now))
    }

    /// Forget the stored session locally. The server is not contacted.
    pub fn clear(&self) -> Result<bool> {
        let existed = self.sessions.load()?.is_some();
        self.sessions.clear()?;
        Ok(existed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub authenticated: bool,
    pub role: Option<String>,
    /// Where a fresh login with this role would land
    pub landing: Option<Route>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
    /// Unverified token claims, display only
    pub claims: Option<TokenClaims>,
    pub expires_at: Option<DateTime<Utc>>,
    pub expired: bool,
    /// The token claims a different role than the stored one
    pub role_mismatch: bool,
}

impl SessionSummary {
    pub fn from_session(session: Option<&Session>, now: DateTime<Utc>) -> Self {
        let Some(session) = session else {
            return Self::signed_out();
        };

        let claims = TokenClaims::peek(&session.token);
        let role = session.role.as_ref().map(|r| r.as_str().to_string());
        let landing = session.role.as_ref().map(|r| {
            if r.is_admin() {
                Route::Admin
            } else {
                Route::Home
            }
        });

        let role_mismatch = match (&claims, &session.role) {
            (Some(TokenClaims { role: Some(claimed), .. }), Some(stored)) => {
                Role::from(claimed.as_str()) != *stored
            }
            _ => false,
        };

        Self {
            authenticated: session.is_authenticated(),
            role,
            landing,
            full_name: session.user.as_ref().map(|u| u.full_name.clone()),
            email: session.user.as_ref().map(|u| u.email.clone()),
            saved_at: Some(session.saved_at),
            expires_at: claims.as_ref().and_then(TokenClaims::expires_at),
            expired: claims.as_ref().is_some_and(|c| c.is_expired_at(now)),
            claims,
            role_mismatch,
        }
    }

    fn signed_out() -> Self {
        Self {
            authenticated: false,
            role: None,
            landing: None,
            full_name: None,
            email: None,
            saved_at: None,
            claims: None,
            expires_at: None,
            expired: false,
            role_mismatch: false,
        }
    }
}
