//! Authenticated session
//!
//! The explicit authenticated-user context handed to the API client,
//! persisted between CLI runs as a small JSON file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::api::AuthUser;
use crate::config::SessionConfig;

/// Bearer token plus the user it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            token: token.into(),
            user,
            issued_at: Utc::now(),
        }
    }
}

/// Errors reading or writing the session file
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error on {path:?}: {error}")]
    Io { path: PathBuf, error: std::io::Error },

    #[error("Corrupt session file {path:?}: {error}")]
    Parse {
        path: PathBuf,
        error: serde_json::Error,
    },
}

/// File-backed session storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured (or default) location
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.resolved_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session, if any
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|error| SessionError::Io {
            path: self.path.clone(),
            error,
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|error| SessionError::Parse {
                path: self.path.clone(),
                error,
            })
    }

    /// Persist the session, creating parent directories as needed
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        let io_err = |error| SessionError::Io {
            path: self.path.clone(),
            error,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(session).map_err(|error| {
            SessionError::Parse {
                path: self.path.clone(),
                error,
            }
        })?;
        std::fs::write(&self.path, content).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .map_err(io_err)?;
        }

        tracing::debug!(path = ?self.path, "Session saved");
        Ok(())
    }

    /// Remove the saved session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(SessionError::Io {
                path: self.path.clone(),
                error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_session() -> Session {
        Session::new(
            "tok-123",
            AuthUser {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                profile_id: Some("p1".to_string()),
                role: None,
            },
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_none());

        let session = sample_session();
        store.save(&session).unwrap();

        let restored = store.load().unwrap().unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        assert!(!store.clear().unwrap());
        store.save(&sample_session()).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = SessionStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SessionError::Parse { .. }));
    }
}
