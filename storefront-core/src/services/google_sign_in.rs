//! Google Sign-In wiring for the signup page
//!
//! Wraps an injected `IdentityProvider`: loads the SDK at most once,
//! initializes it once per mount and reports availability explicitly.

use std::sync::Arc;

use crate::domain::result::Result;
use crate::ports::{IdentityAvailability, IdentityProvider, IdentitySettings, PromptOutcome};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};

const FLOW: &str = "google";

pub struct GoogleSignIn {
    provider: Arc<dyn IdentityProvider>,
    client_id: Option<String>,
    logger: Option<Arc<LoggingService>>,
    initialized: bool,
    init_error: Option<String>,
}

impl GoogleSignIn {
    pub fn new(provider: Arc<dyn IdentityProvider>, client_id: Option<String>) -> Self {
        Self {
            provider,
            client_id,
            logger: None,
            initialized: false,
            init_error: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn availability(&self) -> IdentityAvailability {
        self.provider.availability()
    }

    /// Make sure the SDK is loaded
    ///
    /// Returns straight away when the SDK is already present, without
    /// loading it a second time.
    pub fn ensure_loaded(&self) -> Result<IdentityAvailability> {
        if self.provider.availability().is_available() {
            return Ok(IdentityAvailability::Available);
        }

        self.provider.load()?;
        Ok(self.provider.availability())
    }

    /// Load and initialize the SDK for this page
    ///
    /// Failures are logged and leave the SDK unavailable; they are not
    /// reported to the user here.
    pub fn mount(&mut self) -> IdentityAvailability {
        if self.initialized {
            return self.provider.availability();
        }

        let availability = match self.ensure_loaded() {
            Ok(a) => a,
            Err(e) => {
                self.log(
                    LogEvent::new("google_sdk_unavailable")
                        .with_flow(FLOW)
                        .with_error(e.to_string()),
                );
                return IdentityAvailability::Unavailable;
            }
        };

        if !availability.is_available() {
            return availability;
        }

        let client_id = self.client_id.clone().unwrap_or_default();
        match self.provider.initialize(&IdentitySettings::new(client_id)) {
            Ok(()) => {
                self.initialized = true;
                self.init_error = None;
            }
            Err(e) => {
                self.log(
                    LogEvent::new("google_init_failed")
                        .with_flow(FLOW)
                        .with_error(e.to_string()),
                );
                self.init_error = Some(e.to_string());
            }
        }

        availability
    }

    /// Show the provider's prompt
    ///
    /// `None` when the SDK is unavailable; the caller shows the message.
    /// When initialization failed the prompt is not shown and the outcome
    /// carries the initialization error.
    pub fn prompt(&self) -> Option<PromptOutcome> {
        if !self.provider.availability().is_available() {
            self.log(LogEvent::new("google_sdk_unavailable").with_flow(FLOW));
            return None;
        }

        if let Some(reason) = &self.init_error {
            self.log(
                LogEvent::new("google_prompt_skipped")
                    .with_flow(FLOW)
                    .with_error_details(reason.clone()),
            );
            return Some(PromptOutcome::NotDisplayed(reason.clone()));
        }

        match self.provider.prompt() {
            Ok(outcome) => {
                if let PromptOutcome::NotDisplayed(reason) | PromptOutcome::Skipped(reason) =
                    &outcome
                {
                    self.log(
                        LogEvent::new("google_prompt_skipped")
                            .with_flow(FLOW)
                            .with_error_details(reason.clone()),
                    );
                }
                Some(outcome)
            }
            Err(e) => {
                self.log(
                    LogEvent::new("google_prompt_failed")
                        .with_flow(FLOW)
                        .with_error(e.to_string()),
                );
                Some(PromptOutcome::NotDisplayed(e.to_string()))
            }
        }
    }

    fn log(&self, event: LogEvent) {
        log_quietly(self.logger.as_deref(), event);
    }
}
