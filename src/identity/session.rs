//! Client-side session store: at most one active credential, held in memory
//! behind a read-shared lock and mirrored to a single file so the session
//! survives restarts. Writes happen only through `establish` and `clear`,
//! both user-triggered and serialized by the shell.

use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

use super::claims::{decode, Claims};

pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<String>>,
}

impl SessionStore {
    /// Open a store over the given session file and restore any persisted
    /// credential. Malformed or unreadable storage is treated as absent;
    /// restore never fails.
    pub fn open(path: PathBuf) -> Self {
        let restored = Self::restore(&path);
        if restored.is_some() {
            info!(target: "shopfront", "session restored from {}", path.display());
        }
        Self { path, current: RwLock::new(restored) }
    }

    fn restore(path: &PathBuf) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() { None } else { Some(token.to_string()) }
            }
            Err(_) => None,
        }
    }

    /// Make a freshly issued credential the active session, replacing any
    /// prior one. Disk is written first; memory is only updated once the
    /// persisted copy is in place, so the two never disagree after return.
    pub fn establish(&self, credential: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, credential)?;
        *self.current.write() = Some(credential.to_string());
        debug!(target: "shopfront", "session established");
        Ok(())
    }

    /// Drop the active credential and its persisted copy. Clearing an
    /// already-empty session is a no-op.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::from(e)),
        }
        *self.current.write() = None;
        debug!(target: "shopfront", "session cleared");
        Ok(())
    }

    /// The in-memory active credential, if any.
    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Claims view of the active credential, recomputed on every call.
    pub fn claims(&self) -> Option<Claims> {
        self.current.read().as_deref().map(decode)
    }

    pub fn is_anonymous(&self) -> bool {
        self.current.read().is_none()
    }
}
