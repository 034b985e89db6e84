//! Ambient token store - read-only capability handed to the gateway
//!
//! An external login flow owns the token; the gateway only ever reads
//! it, fresh on every call, since it may change between invocations.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::constants::{CONFIG_DIR, TOKEN_KEY};

/// Narrow read interface for the ambient auth token
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` before any login has happened
    fn get(&self) -> Option<String>;
}

/// Fixed token, for tests and embedding
#[derive(Clone, Debug, Default)]
pub struct StaticTokenSource {
    token: Option<String>,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        StaticTokenSource {
            token: Some(token.into()),
        }
    }

    pub fn empty() -> Self {
        StaticTokenSource { token: None }
    }
}

impl TokenSource for StaticTokenSource {
    fn get(&self) -> Option<String> {
        self.token.clone()
    }
}

/// Process-wide token slot. `set` belongs to the login flow; the
/// gateway side only sees the `TokenSource` read view.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        // Recover from poisoning; a panicked writer elsewhere must not
        // take the token slot down with it
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl TokenSource for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Persistent key-value token store backed by a YAML map on disk,
/// keyed by a configured token-key name. Reads go to disk on every
/// call so a token written by another process is picked up.
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
}

impl FileTokenStore {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR);
        FileTokenStore {
            path: config_dir.join("auth.yaml"),
            key: TOKEN_KEY.to_string(),
        }
    }

    /// Store reading the given file under the given key
    pub fn with_path(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        FileTokenStore {
            path: path.into(),
            key: key.into(),
        }
    }

    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let map: HashMap<String, String> = serde_yaml::from_str(&content)?;
        Ok(map.get(&self.key).cloned())
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for FileTokenStore {
    fn get(&self) -> Option<String> {
        match self.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read token store");
                None
            }
        }
    }
}
