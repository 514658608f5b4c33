//! Storefront Core - client-side auth flows for the storefront
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Credentials, Session, Role, Navigation, etc.)
//! - **ports**: Trait definitions for external dependencies (AuthBackend, SessionStore, IdentityProvider)
//! - **services**: Flow orchestration (login, signup, Google Sign-In, marquee)
//! - **adapters**: Concrete implementations (reqwest backend, session file, Google Identity Services)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::http_backend::HttpAuthBackend;
use adapters::session_file::FileSessionStore;
use config::Config;
use ports::{AuthBackend, IdentityProvider, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Credentials, FlowOutcome, FlowState, Navigation, Registration, Role, Route, Session,
    SocialProvider, UserProfile,
};

/// Main context for storefront operations
///
/// Holds the configuration and the port implementations, and hands out
/// flows wired to them.
pub struct StorefrontContext {
    pub config: Config,
    pub storefront_dir: PathBuf,
    pub backend: Arc<dyn AuthBackend>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_service: SessionService,
    logger: Option<Arc<LoggingService>>,
}

impl StorefrontContext {
    /// Create a context backed by HTTP and the session file in `storefront_dir`
    pub fn new(storefront_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(storefront_dir)
            .with_context(|| format!("Failed to create {:?}", storefront_dir))?;

        let config = Config::load(storefront_dir)?;
        let backend = Arc::new(HttpAuthBackend::new(
            &config.api_base_url,
            config.request_timeout,
        )?);
        let sessions = Arc::new(FileSessionStore::new(storefront_dir));

        Ok(Self::from_parts(
            storefront_dir.to_path_buf(),
            config,
            backend,
            sessions,
        ))
    }

    /// Assemble a context from explicit port implementations
    pub fn from_parts(
        storefront_dir: PathBuf,
        config: Config,
        backend: Arc<dyn AuthBackend>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let session_service = SessionService::new(Arc::clone(&sessions));
        Self {
            config,
            storefront_dir,
            backend,
            sessions,
            session_service,
            logger: None,
        }
    }

    /// Record flow events to this logger
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn logger(&self) -> Option<&Arc<LoggingService>> {
        self.logger.as_ref()
    }

    pub fn login_flow(&self) -> LoginFlow {
        let flow = LoginFlow::new(Arc::clone(&self.backend), Arc::clone(&self.sessions));
        match &self.logger {
            Some(logger) => flow.with_logger(Arc::clone(logger)),
            None => flow,
        }
    }

    /// Signup flow, optionally with a Google identity provider attached
    pub fn signup_flow(&self, identity: Option<Arc<dyn IdentityProvider>>) -> SignupFlow {
        let mut flow = SignupFlow::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.sessions),
            self.config.redirect_delay,
        );

        if let Some(provider) = identity {
            let mut google = GoogleSignIn::new(provider, self.config.google_client_id.clone());
            if let Some(logger) = &self.logger {
                google = google.with_logger(Arc::clone(logger));
            }
            flow = flow.with_google(google);
        }

        match &self.logger {
            Some(logger) => flow.with_logger(Arc::clone(logger)),
            None => flow,
        }
    }

    pub fn marquee(&self) -> Marquee {
        Marquee::default().with_speed(self.config.marquee_speed)
    }

    /// Path for a route, per the configured routes
    pub fn route_path(&self, route: Route) -> &str {
        self.config.routes.path(route)
    }
}
