//! Session persistence port

use crate::domain::result::Result;
use crate::domain::Session;

/// Durable storage for the client's single active session
///
/// `save` replaces the whole record in one step; implementations must not
/// expose a half-written session to a later `load`.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, if any
    fn load(&self) -> Result<Option<Session>>;

    /// Replace the stored session
    fn save(&self, session: &Session) -> Result<()>;

    /// Remove the stored session (no-op when nothing is stored)
    fn clear(&self) -> Result<()>;
}
