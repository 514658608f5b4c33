//! Storefront REST backend client
//!
//! Handles communication with the storefront auth API
//! (`/api/auth/login`, `/api/auth/register`, `/api/auth/google`).

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::domain::{Credentials, Registration};
use crate::ports::{AuthBackend, BackendError, ErrorBody, IdentityExchangeResponse, LoginResponse};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const GOOGLE_PATH: &str = "/api/auth/google";

/// HTTP implementation of the auth backend
#[derive(Debug)]
pub struct HttpAuthBackend {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

#[derive(Serialize)]
struct IdentityTokenBody<'a> {
    token: &'a str,
}

impl HttpAuthBackend {
    /// Create a client for the given base URL
    ///
    /// `timeout` of None leaves requests unbounded on the client side.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            anyhow::bail!("Backend URL cannot be empty");
        }

        let parsed = Url::parse(trimmed).context("Invalid backend URL")?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Backend URL must use http or https, got {}", parsed.scheme());
        }

        // The blocking client defaults to 30s; None really means no limit
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send<B>(&self, path: &str, body: &B) -> std::result::Result<Response, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        self.client
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| self.map_request_error(e))
    }

    /// Map request errors to readable messages
    fn map_request_error(&self, error: reqwest::Error) -> BackendError {
        if error.is_timeout() {
            match self.timeout {
                Some(t) => BackendError::Transport(format!(
                    "Connection timed out after {} seconds",
                    t.as_secs()
                )),
                None => BackendError::Transport("Connection timed out".to_string()),
            }
        } else if error.is_connect() {
            BackendError::Transport(format!("Unable to connect to {}", self.base_url))
        } else {
            BackendError::Transport(format!("Request failed: {}", error))
        }
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> std::result::Result<T, BackendError> {
    response
        .json::<T>()
        .map_err(|e| BackendError::Decode(e.to_string()))
}

/// Turn a non-success status into `Rejected`, reading the `message` field
/// from the body when it is JSON
fn check_response_status(response: Response) -> std::result::Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .ok()
        .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
        .and_then(|body| body.message);

    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Like `check_response_status`, but the body of every response must be
/// JSON. An error body that is empty or not JSON is a `Decode` failure.
fn check_json_response_status(response: Response) -> std::result::Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response
        .text()
        .map_err(|e| BackendError::Decode(e.to_string()))?;
    let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        BackendError::Decode(format!("HTTP {} with unreadable body: {}", status.as_u16(), e))
    })?;

    let message = body
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string);

    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl AuthBackend for HttpAuthBackend {
    fn login(&self, credentials: &Credentials) -> std::result::Result<LoginResponse, BackendError> {
        let response = self.send(LOGIN_PATH, credentials)?;
        decode(check_json_response_status(response)?)
    }

    fn register(&self, registration: &Registration) -> std::result::Result<(), BackendError> {
        // Success body is opaque; only the status matters
        let response = self.send(REGISTER_PATH, registration)?;
        check_response_status(response).map(|_| ())
    }

    fn exchange_identity_token(
        &self,
        identity_token: &str,
    ) -> std::result::Result<IdentityExchangeResponse, BackendError> {
        let response = self.send(GOOGLE_PATH, &IdentityTokenBody { token: identity_token })?;
        decode(check_response_status(response)?)
    }
}
