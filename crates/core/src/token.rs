//! Session token storage.
//!
//! The client persists exactly one piece of local state: the bearer token, stored under
//! [`AUTH_TOKEN_KEY`]. It is written by login, cleared by logout and read by every outgoing
//! request.

use crate::constants::AUTH_TOKEN_KEY;
use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Process-wide credential storage.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// Keeps the token for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Persists the token as a small JSON object (`{"auth_token": "..."}`) so a session survives
/// restarts of the CLI.
///
/// The file is read once by [`FileTokenStore::open`]; afterwards the in-memory copy is
/// authoritative and writes are best-effort.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    token: RwLock<Option<String>>,
}

impl FileTokenStore {
    /// Opens the store, loading a previously saved token if the file exists.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file exists but cannot be read or is not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(contents) => {
                let entries: BTreeMap<String, String> =
                    serde_json::from_str(&contents).map_err(ConfigError::TokenFileParse)?;
                entries.get(AUTH_TOKEN_KEY).cloned()
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(ConfigError::TokenFileRead(e)),
        };

        Ok(Self {
            path,
            token: RwLock::new(token),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => {
                let mut entries = BTreeMap::new();
                entries.insert(AUTH_TOKEN_KEY, token);
                serde_json::to_string(&entries)
                    .map_err(std::io::Error::other)
                    .and_then(|json| fs::write(&self.path, json))
            }
            None => match fs::remove_file(&self.path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };

        if let Err(e) = result {
            tracing::warn!("failed to persist session token to {}: {e}", self.path.display());
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        self.persist(Some(token));
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.persist(None);
    }
}
