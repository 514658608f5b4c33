//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The flows depend
//! only on these traits, not on concrete implementations.

mod auth_backend;
mod identity;
mod session_store;

pub use auth_backend::{
    AuthBackend, BackendError, ErrorBody, IdentityExchangeResponse, LoginResponse,
};
pub use identity::{IdentityAvailability, IdentityProvider, IdentitySettings, PromptOutcome};
pub use session_store::SessionStore;
