//! Login flow - email/password sign-in
//!
//! `Idle -> Submitting -> {Success, Failed}`, back to `Idle` on the next
//! edit. There is no guard against resubmitting while a request is out.

use std::sync::Arc;

use crate::domain::result::Error;
use crate::domain::{
    Credentials, FlowOutcome, FlowState, FlowStatus, Navigation, Route, Session,
};
use crate::ports::{AuthBackend, BackendError, SessionStore};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};

/// Shown when the server rejects the login without a message
pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid credentials";

/// Shown for transport, parse and storage failures
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again.";

const FLOW: &str = "login";

pub struct LoginFlow {
    backend: Arc<dyn AuthBackend>,
    sessions: Arc<dyn SessionStore>,
    logger: Option<Arc<LoggingService>>,
    state: FlowState,
    status: FlowStatus,
}

impl LoginFlow {
    pub fn new(backend: Arc<dyn AuthBackend>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            backend,
            sessions,
            logger: None,
            state: FlowState::Idle,
            status: FlowStatus::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    /// The user changed a field. The last error stays visible until the
    /// next submission replaces it.
    pub fn edit(&mut self) {
        self.state = FlowState::Idle;
    }

    /// Submit the credentials
    ///
    /// On success the session (token + role) is stored and the navigation
    /// points at the admin page for `admin`, the home page otherwise. The
    /// role is taken from the server response as-is.
    pub fn submit(&mut self, credentials: &Credentials) -> FlowOutcome {
        if let Err(e) = credentials.validate() {
            let message = match e {
                Error::Validation(m) => m,
                other => other.to_string(),
            };
            return self.fail(message);
        }

        self.state = FlowState::Submitting;

        let response = match self.backend.login(credentials) {
            Ok(response) => response,
            Err(err) => return self.handle_backend_error(err),
        };

        let session = Session::from_login(response.token, response.role.clone());
        if let Err(e) = self.sessions.save(&session) {
            self.log(
                LogEvent::new("login_failed")
                    .with_flow(FLOW)
                    .with_error(e.to_string())
                    .with_error_details("session_write"),
            );
            return self.fail(GENERIC_FAILURE_MESSAGE);
        }

        let route = if response.role.is_admin() {
            Route::Admin
        } else {
            Route::Home
        };

        self.log(LogEvent::new("login_succeeded").with_flow(FLOW));

        self.state = FlowState::Success;
        self.status.error = None;

        FlowOutcome {
            state: self.state,
            message: None,
            navigation: Some(Navigation::immediate(route)),
        }
    }

    fn handle_backend_error(&mut self, err: BackendError) -> FlowOutcome {
        match &err {
            BackendError::Rejected { status, .. } => {
                let message = err
                    .server_message()
                    .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                    .to_string();
                self.log(
                    LogEvent::new("login_failed")
                        .with_flow(FLOW)
                        .with_status(Some(*status)),
                );
                self.fail(message)
            }
            BackendError::Transport(_) | BackendError::Decode(_) => {
                // Details go to diagnostics only
                self.log(
                    LogEvent::new("login_failed")
                        .with_flow(FLOW)
                        .with_error(err.to_string()),
                );
                self.fail(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> FlowOutcome {
        let message = message.into();
        self.state = FlowState::Failed;
        self.status.error = Some(message.clone());

        FlowOutcome {
            state: self.state,
            message: Some(message),
            navigation: None,
        }
    }

    fn log(&self, event: LogEvent) {
        log_quietly(self.logger.as_deref(), event);
    }
}
