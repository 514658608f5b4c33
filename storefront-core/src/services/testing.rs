//! Test doubles for the ports

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::result::{Error, Result};
use crate::domain::{Credentials, Registration, Role, UserProfile};
use crate::ports::{
    AuthBackend, BackendError, IdentityAvailability, IdentityExchangeResponse, IdentityProvider,
    IdentitySettings, LoginResponse, PromptOutcome,
};

fn not_stubbed<T>() -> std::result::Result<T, BackendError> {
    Err(BackendError::Transport("not stubbed".to_string()))
}

pub struct StubBackend {
    login: std::result::Result<LoginResponse, BackendError>,
    register: std::result::Result<(), BackendError>,
    exchange: std::result::Result<IdentityExchangeResponse, BackendError>,
    calls: Arc<AtomicUsize>,
    identity_tokens: Mutex<Vec<String>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            login: not_stubbed(),
            register: not_stubbed(),
            exchange: not_stubbed(),
            calls: Arc::new(AtomicUsize::new(0)),
            identity_tokens: Mutex::new(Vec::new()),
        }
    }
}

impl StubBackend {
    pub fn login_ok(token: &str, role: &str) -> Self {
        Self {
            login: Ok(LoginResponse {
                token: token.to_string(),
                role: Role::from(role),
                message: None,
            }),
            ..Default::default()
        }
    }

    pub fn login_rejected(status: u16, message: Option<&str>) -> Self {
        Self {
            login: Err(rejected(status, message)),
            ..Default::default()
        }
    }

    pub fn register_ok() -> Self {
        Self {
            register: Ok(()),
            ..Default::default()
        }
    }

    pub fn register_rejected(status: u16, message: Option<&str>) -> Self {
        Self {
            register: Err(rejected(status, message)),
            ..Default::default()
        }
    }

    pub fn exchange_ok(token: &str, user: UserProfile) -> Self {
        Self {
            exchange: Ok(IdentityExchangeResponse {
                token: token.to_string(),
                user,
            }),
            ..Default::default()
        }
    }

    pub fn exchange_rejected(status: u16, message: Option<&str>) -> Self {
        Self {
            exchange: Err(rejected(status, message)),
            ..Default::default()
        }
    }

    /// Every endpoint fails before reaching the server
    pub fn transport_error(message: &str) -> Self {
        let err = BackendError::Transport(message.to_string());
        Self {
            login: Err(err.clone()),
            register: Err(err.clone()),
            exchange: Err(err),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn identity_tokens(&self) -> Vec<String> {
        self.identity_tokens.lock().unwrap().clone()
    }
}

fn rejected(status: u16, message: Option<&str>) -> BackendError {
    BackendError::Rejected {
        status,
        message: message.map(str::to_string),
    }
}

impl AuthBackend for StubBackend {
    fn login(
        &self,
        _credentials: &Credentials,
    ) -> std::result::Result<LoginResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.login.clone()
    }

    fn register(&self, _registration: &Registration) -> std::result::Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.register.clone()
    }

    fn exchange_identity_token(
        &self,
        identity_token: &str,
    ) -> std::result::Result<IdentityExchangeResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.identity_tokens
            .lock()
            .unwrap()
            .push(identity_token.to_string());
        self.exchange.clone()
    }
}

/// Identity SDK double
pub struct StubIdentity {
    present: AtomicBool,
    load_fails: bool,
    pub load_count: AtomicUsize,
    pub settings: Mutex<Option<IdentitySettings>>,
    prompt: PromptOutcome,
}

impl StubIdentity {
    /// SDK not yet loaded; loading succeeds
    pub fn absent(prompt: PromptOutcome) -> Self {
        Self {
            present: AtomicBool::new(false),
            load_fails: false,
            load_count: AtomicUsize::new(0),
            settings: Mutex::new(None),
            prompt,
        }
    }

    /// SDK already present
    pub fn present(prompt: PromptOutcome) -> Self {
        let stub = Self::absent(prompt);
        stub.present.store(true, Ordering::SeqCst);
        stub
    }

    /// SDK cannot be loaded
    pub fn broken() -> Self {
        Self {
            load_fails: true,
            ..Self::absent(PromptOutcome::NotDisplayed("unavailable".to_string()))
        }
    }

    pub fn loads(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for StubIdentity {
    fn name(&self) -> &str {
        "stub"
    }

    fn availability(&self) -> IdentityAvailability {
        if self.present.load(Ordering::SeqCst) {
            IdentityAvailability::Available
        } else {
            IdentityAvailability::Unavailable
        }
    }

    fn load(&self) -> Result<()> {
        self.load_count.fetch_add(1, Ordering::SeqCst);
        if self.load_fails {
            return Err(Error::identity("script blocked"));
        }
        self.present.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn initialize(&self, settings: &IdentitySettings) -> Result<()> {
        if settings.client_id.is_empty() {
            return Err(Error::Config("Google client id is not configured".to_string()));
        }
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }

    fn prompt(&self) -> Result<PromptOutcome> {
        Ok(self.prompt.clone())
    }
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: "64f1c0ffee".to_string(),
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role: Role::User,
        profile_image: Some("https://img.example.com/ada.png".to_string()),
    }
}
