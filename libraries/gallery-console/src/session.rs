//! Session context.
//!
//! The session is created once at start-up with [`SessionContext::init`] and
//! handed to whoever needs it; there is no global session.

use chrono::{DateTime, Utc};
use gallery_core::{Result, Session};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    authenticated: bool,
    logged_in_at: DateTime<Utc>,
}

/// Boolean login state, optionally persisted to a JSON file.
#[derive(Debug)]
pub struct SessionContext {
    path: Option<PathBuf>,
    logged_in_at: RwLock<Option<DateTime<Utc>>>,
}

impl SessionContext {
    /// A session that lives only as long as this value
    pub fn in_memory() -> Self {
        Self {
            path: None,
            logged_in_at: RwLock::new(None),
        }
    }

    /// Restore the session stored at `path`. A missing file means logged out.
    pub fn init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let logged_in_at = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let persisted: PersistedSession = serde_json::from_str(&contents)?;
            persisted
                .authenticated
                .then_some(persisted.logged_in_at)
        } else {
            None
        };

        debug!(
            path = %path.display(),
            authenticated = logged_in_at.is_some(),
            "Session initialized"
        );

        Ok(Self {
            path: Some(path),
            logged_in_at: RwLock::new(logged_in_at),
        })
    }

    /// Where the session is persisted, if anywhere
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Mark the session as authenticated.
    ///
    /// Credential checks happen before this is called.
    pub fn login(&self) -> Result<()> {
        let now = Utc::now();
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let persisted = PersistedSession {
                authenticated: true,
                logged_in_at: now,
            };
            std::fs::write(path, serde_json::to_string_pretty(&persisted)?)?;
        }

        *self
            .logged_in_at
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(now);
        info!("Logged in");
        Ok(())
    }

    /// When the current session started
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        *self
            .logged_in_at
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Session for SessionContext {
    fn is_authenticated(&self) -> bool {
        self.logged_in_at().is_some()
    }

    fn logout(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.exists() {
                std::fs::remove_file(path)?;
            }
        }

        *self
            .logged_in_at
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_session() {
        let session = SessionContext::in_memory();
        assert!(!session.is_authenticated());

        session.login().unwrap();
        assert!(session.is_authenticated());
        assert!(session.logged_in_at().is_some());

        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_persisted_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        let session = SessionContext::init(&path).unwrap();
        assert!(!session.is_authenticated());
        session.login().unwrap();
        assert!(path.exists());

        let restored = SessionContext::init(&path).unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.logged_in_at(), session.logged_in_at());

        restored.logout().unwrap();
        assert!(!path.exists());
        assert!(!SessionContext::init(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_corrupt_session_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(SessionContext::init(&path).is_err());
    }
}
