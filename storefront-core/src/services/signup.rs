//! Signup flow - registration plus the Google identity sub-flow
//!
//! Registration: `Idle -> Submitting -> {Success, Failed}`. A duplicate
//! account (HTTP 409, or a message mentioning "already") is treated as a
//! soft success: the user is sent to the login page like after a real
//! signup.
//!
//! Google: `Idle -> Pending -> {Success, Failed}`, independent of the
//! registration state.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::result::Error;
use crate::domain::{
    FlowOutcome, FlowState, FlowStatus, IdentityState, Navigation, Registration, Route, Session,
    SocialProvider,
};
use crate::ports::{AuthBackend, BackendError, IdentityAvailability, PromptOutcome, SessionStore};
use crate::services::google_sign_in::GoogleSignIn;
use crate::services::logging::{log_quietly, LogEvent, LoggingService};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! Redirecting to login...";
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Signup failed!";
pub const GOOGLE_SUCCESS_MESSAGE: &str = "Google signup successful! Redirecting...";
pub const GOOGLE_FALLBACK_MESSAGE: &str = "Google signup failed!";
pub const GOOGLE_UNAVAILABLE_MESSAGE: &str = "Google Sign-In is not available. Please try again.";
pub const GOOGLE_NOT_DISPLAYED_PREFIX: &str = "Google Sign-In was not shown";

const FLOW: &str = "signup";
const GOOGLE_FLOW: &str = "google";

/// HTTP status the backend uses for an existing account
const CONFLICT_STATUS: u16 = 409;

/// Whether a failed registration means the account already exists
pub fn is_existing_account(status: Option<u16>, message: &str) -> bool {
    status == Some(CONFLICT_STATUS) || message.to_lowercase().contains("already")
}

pub struct SignupFlow {
    backend: Arc<dyn AuthBackend>,
    sessions: Arc<dyn SessionStore>,
    google: Option<GoogleSignIn>,
    logger: Option<Arc<LoggingService>>,
    redirect_delay: Duration,
    state: FlowState,
    identity_state: IdentityState,
    status: FlowStatus,
    google_loading: bool,
}

impl SignupFlow {
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        sessions: Arc<dyn SessionStore>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            backend,
            sessions,
            google: None,
            logger: None,
            redirect_delay,
            state: FlowState::Idle,
            identity_state: IdentityState::Idle,
            status: FlowStatus::default(),
            google_loading: false,
        }
    }

    /// Attach the Google identity capability
    pub fn with_google(mut self, google: GoogleSignIn) -> Self {
        self.google = Some(google);
        self
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn identity_state(&self) -> IdentityState {
        self.identity_state
    }

    pub fn status(&self) -> &FlowStatus {
        &self.status
    }

    /// Whether the primary submit control is disabled
    pub fn is_busy(&self) -> bool {
        self.status.loading
    }

    pub fn is_google_busy(&self) -> bool {
        self.google_loading
    }

    pub fn edit(&mut self) {
        if self.state != FlowState::Submitting {
            self.state = FlowState::Idle;
        }
    }

    /// Page mount: load and initialize the identity SDK once
    pub fn mount(&mut self) -> IdentityAvailability {
        match self.google.as_mut() {
            Some(google) => google.mount(),
            None => IdentityAvailability::Unavailable,
        }
    }

    /// Submit the registration form
    ///
    /// `&mut self` keeps a second submission out while a request is in
    /// flight, so `loading` is only observable from inside the call.
    pub fn submit(&mut self, registration: &Registration) -> FlowOutcome {
        if let Err(e) = registration.validate() {
            let message = match e {
                Error::Validation(m) => m,
                other => other.to_string(),
            };
            self.state = FlowState::Failed;
            self.status.message = Some(message.clone());
            return self.outcome(None);
        }

        self.state = FlowState::Submitting;
        self.status.loading = true;
        self.status.message = None;

        let result = self.backend.register(registration);
        self.status.loading = false;

        match result {
            Ok(()) => {
                self.log(LogEvent::new("signup_succeeded").with_flow(FLOW));
                self.state = FlowState::Success;
                self.status.message = Some(SIGNUP_SUCCESS_MESSAGE.to_string());
                self.outcome(Some(Navigation::after(Route::Login, self.redirect_delay)))
            }
            Err(err) => self.handle_register_error(err),
        }
    }

    fn handle_register_error(&mut self, err: BackendError) -> FlowOutcome {
        let message = err
            .server_message()
            .unwrap_or(SIGNUP_FALLBACK_MESSAGE)
            .to_string();
        self.status.message = Some(message.clone());

        if is_existing_account(err.status(), &message) {
            self.log(
                LogEvent::new("signup_conflict")
                    .with_flow(FLOW)
                    .with_status(err.status()),
            );
            self.state = FlowState::Success;
            return self.outcome(Some(Navigation::after(Route::Login, self.redirect_delay)));
        }

        let mut event = LogEvent::new("signup_failed")
            .with_flow(FLOW)
            .with_status(err.status());
        if err.status().is_none() {
            event = event.with_error(err.to_string());
        }
        self.log(event);

        self.state = FlowState::Failed;
        self.outcome(None)
    }

    /// Start a social sign-up from one of the provider buttons
    pub fn sign_up_with(&mut self, provider: SocialProvider) -> FlowOutcome {
        if !provider.is_enabled() {
            return FlowOutcome {
                state: self.state,
                message: Some(format!("Sign up with {} is coming soon", provider)),
                navigation: None,
            };
        }

        self.prompt_google()
    }

    /// The Google button: show the prompt and exchange whatever credential
    /// comes back
    pub fn prompt_google(&mut self) -> FlowOutcome {
        let prompt = self.google.as_ref().and_then(GoogleSignIn::prompt);

        match prompt {
            None => {
                self.status.message = Some(GOOGLE_UNAVAILABLE_MESSAGE.to_string());
                FlowOutcome {
                    state: FlowState::Failed,
                    message: self.status.message.clone(),
                    navigation: None,
                }
            }
            Some(PromptOutcome::Credential(token)) => self.google_sign_up(&token),
            // The reason goes to the caller only; the page status is untouched
            Some(PromptOutcome::NotDisplayed(reason)) => FlowOutcome {
                state: FlowState::Idle,
                message: Some(format!("{}: {}", GOOGLE_NOT_DISPLAYED_PREFIX, reason)),
                navigation: None,
            },
            Some(PromptOutcome::Skipped(_)) => FlowOutcome {
                state: FlowState::Idle,
                message: None,
                navigation: None,
            },
        }
    }

    /// Exchange a Google identity token for a storefront session
    ///
    /// Also the target of the SDK's automatic callback.
    pub fn google_sign_up(&mut self, identity_token: &str) -> FlowOutcome {
        self.google_loading = true;
        self.identity_state = IdentityState::Pending;
        self.status.message = None;

        let result = self.backend.exchange_identity_token(identity_token);

        let outcome = match result {
            Ok(response) => {
                let session = Session::from_identity(response.token, response.user);
                match self.sessions.save(&session) {
                    Ok(()) => {
                        self.log(LogEvent::new("google_signup_succeeded").with_flow(GOOGLE_FLOW));
                        self.identity_state = IdentityState::Success;
                        self.status.message = Some(GOOGLE_SUCCESS_MESSAGE.to_string());
                        FlowOutcome {
                            state: FlowState::Success,
                            message: self.status.message.clone(),
                            navigation: Some(Navigation::after(
                                Route::Dashboard,
                                self.redirect_delay,
                            )),
                        }
                    }
                    Err(e) => {
                        self.log(
                            LogEvent::new("google_signup_failed")
                                .with_flow(GOOGLE_FLOW)
                                .with_error(e.to_string())
                                .with_error_details("session_write"),
                        );
                        self.google_failed(GOOGLE_FALLBACK_MESSAGE.to_string())
                    }
                }
            }
            Err(err) => {
                let mut event = LogEvent::new("google_signup_failed")
                    .with_flow(GOOGLE_FLOW)
                    .with_status(err.status());
                if err.status().is_none() {
                    event = event.with_error(err.to_string());
                }
                self.log(event);

                let message = err
                    .server_message()
                    .unwrap_or(GOOGLE_FALLBACK_MESSAGE)
                    .to_string();
                self.google_failed(message)
            }
        };

        self.google_loading = false;
        outcome
    }

    fn google_failed(&mut self, message: String) -> FlowOutcome {
        self.identity_state = IdentityState::Failed;
        self.status.message = Some(message);
        FlowOutcome {
            state: FlowState::Failed,
            message: self.status.message.clone(),
            navigation: None,
        }
    }

    fn outcome(&self, navigation: Option<Navigation>) -> FlowOutcome {
        FlowOutcome {
            state: self.state,
            message: self.status.message.clone(),
            navigation,
        }
    }

    fn log(&self, event: LogEvent) {
        log_quietly(self.logger.as_deref(), event);
    }
}
