//! In-memory session store
//!
//! Used when no durable storage is wanted (dry runs, tests).

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<Session>>,
    writes: Mutex<usize>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `save` calls
    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or_default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let session = self
            .session
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        Ok(session.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut slot = self
            .session
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        *slot = Some(session.clone());

        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .session
            .lock()
            .map_err(|e| Error::storage(format!("Lock poisoned: {}", e)))?;
        *slot = None;
        Ok(())
    }
}
