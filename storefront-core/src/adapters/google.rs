//! Google Identity Services adapter
//!
//! Loading the SDK means fetching the GSI client script once; the adapter
//! remembers that it succeeded. The prompt hands off to a credential
//! source supplied by the caller (the CLI asks the user to paste the ID
//! token issued by Google).

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::domain::result::{Error, Result};
use crate::ports::{
    IdentityAvailability, IdentityProvider, IdentitySettings, PromptOutcome,
};

/// Google Identity Services client script
pub const GSI_CLIENT_URL: &str = "https://accounts.google.com/gsi/client";

/// Where the prompt gets its credential from. `Ok(None)` means the user
/// dismissed the prompt.
pub type CredentialSource = Box<dyn Fn() -> Result<Option<String>> + Send + Sync>;

pub struct GoogleIdentityClient {
    script_url: String,
    loaded: AtomicBool,
    load_count: AtomicUsize,
    settings: Mutex<Option<IdentitySettings>>,
    credential_source: CredentialSource,
}

impl GoogleIdentityClient {
    pub fn new(credential_source: CredentialSource) -> Self {
        Self::with_script_url(GSI_CLIENT_URL, credential_source)
    }

    /// Use a different script location (mirrors, tests)
    pub fn with_script_url(script_url: &str, credential_source: CredentialSource) -> Self {
        Self {
            script_url: script_url.to_string(),
            loaded: AtomicBool::new(false),
            load_count: AtomicUsize::new(0),
            settings: Mutex::new(None),
            credential_source,
        }
    }

    /// How many times the script was actually fetched
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }

    fn is_initialized(&self) -> bool {
        self.settings.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}

impl IdentityProvider for GoogleIdentityClient {
    fn name(&self) -> &str {
        "google"
    }

    fn availability(&self) -> IdentityAvailability {
        if self.loaded.load(Ordering::SeqCst) {
            IdentityAvailability::Available
        } else {
            IdentityAvailability::Unavailable
        }
    }

    fn load(&self) -> Result<()> {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::identity(format!("Failed to create HTTP client: {}", e)))?;

        let response = client
            .get(&self.script_url)
            .send()
            .map_err(|e| Error::identity(format!("Failed to load Google Sign-In: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::identity(format!(
                "Failed to load Google Sign-In: HTTP {}",
                response.status().as_u16()
            )));
        }

        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn initialize(&self, settings: &IdentitySettings) -> Result<()> {
        if settings.client_id.trim().is_empty() {
            return Err(Error::Config("Google client id is not configured".to_string()));
        }

        let mut slot = self
            .settings
            .lock()
            .map_err(|e| Error::identity(format!("Lock poisoned: {}", e)))?;
        *slot = Some(settings.clone());
        Ok(())
    }

    fn prompt(&self) -> Result<PromptOutcome> {
        if !self.is_initialized() {
            return Ok(PromptOutcome::NotDisplayed(
                "Google Sign-In was not initialized".to_string(),
            ));
        }

        match (self.credential_source)()? {
            Some(credential) if !credential.trim().is_empty() => {
                Ok(PromptOutcome::Credential(credential.trim().to_string()))
            }
            _ => Ok(PromptOutcome::Skipped("No account was selected".to_string())),
        }
    }
}
