//! File-backed session store
//!
//! The session is one JSON document (`session.json`). Writes go to a temp
//! file in the same directory and are renamed over the target while an
//! exclusive lock is held on `session.lock`, so readers see either the old
//! record or the new one.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

const SESSION_FILE: &str = "session.json";
const LOCK_FILE: &str = "session.lock";

/// Session store living in the storefront directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn lock(&self) -> Result<File> {
        fs::create_dir_all(&self.dir)?;
        let lock = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(LOCK_FILE))?;
        lock.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock session: {}", e)))?;
        Ok(lock)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let lock = self.lock()?;
        let content = fs::read_to_string(&path)?;
        let _ = lock.unlock();

        let session = serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("Stored session is unreadable: {}", e)))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let lock = self.lock()?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer_pretty(&mut tmp, session)?;
        tmp.as_file_mut().flush()?;
        tmp.as_file().sync_all()?;
        restrict_permissions(tmp.path())?;

        tmp.persist(self.path())
            .map_err(|e| Error::storage(format!("Failed to write session: {}", e)))?;

        let _ = lock.unlock();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let lock = self.lock()?;
        match fs::remove_file(self.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let _ = lock.unlock();
        Ok(())
    }
}

/// Tokens are bearer credentials: keep the file owner-only
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
