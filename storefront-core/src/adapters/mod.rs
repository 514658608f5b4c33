//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the AuthBackend port
//! - JSON file (atomic replace + file lock) for the SessionStore port
//! - In-memory SessionStore for dry runs and tests
//! - Google Identity Services for the IdentityProvider port

pub mod google;
pub mod http_backend;
pub mod memory;
pub mod session_file;
