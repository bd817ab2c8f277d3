//! Session identifier management
//!
//! Every request to the assistant service carries an opaque session id that
//! correlates the conversation server-side. The id is generated once per
//! profile and persisted in a [`SessionStore`] under a fixed key so that it
//! survives restarts.
//!
//! The resolved id is wrapped in a [`SessionContext`] and handed to the
//! conversation controller explicitly; nothing reads the store implicitly.

use crate::error::{AttrangiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

pub mod sqlite;
pub use sqlite::SqliteSessionStore;

/// Default key the session id is stored under
pub const DEFAULT_STORAGE_KEY: &str = "attrangi_session_id";

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random (UUID v4) identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Key/value persistence for the session identifier
///
/// Plays the role a browser's local storage plays for a web client.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store used by tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The session a controller talks on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    id: SessionId,
    created: bool,
}

impl SessionContext {
    /// Wrap an already-known session id
    pub fn new(id: SessionId) -> Self {
        Self { id, created: false }
    }

    /// Resolve the session id from `store`, creating it on first use
    ///
    /// Returns the stored id when one exists and is not blank; otherwise a
    /// new id is generated, persisted under `key`, and returned. Calling this
    /// repeatedly against the same store yields the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written
    ///
    /// # Examples
    ///
    /// ```
    /// use attrangi::session::{MemorySessionStore, SessionContext, DEFAULT_STORAGE_KEY};
    ///
    /// let store = MemorySessionStore::new();
    /// let first = SessionContext::initialize(&store, DEFAULT_STORAGE_KEY).unwrap();
    /// let second = SessionContext::initialize(&store, DEFAULT_STORAGE_KEY).unwrap();
    /// assert_eq!(first.id(), second.id());
    /// assert!(first.was_created());
    /// assert!(!second.was_created());
    /// ```
    pub fn initialize(store: &dyn SessionStore, key: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(AttrangiError::Config("Session storage key cannot be empty".into()).into());
        }

        if let Some(existing) = store.get(key)? {
            if !existing.trim().is_empty() {
                tracing::debug!(session_id = %existing, "Reusing stored session id");
                return Ok(Self {
                    id: SessionId::from(existing),
                    created: false,
                });
            }
            tracing::warn!(key = %key, "Stored session id is blank, generating a new one");
        }

        Self::create(store, key)
    }

    /// Replace the stored session id with a freshly generated one
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    pub fn rotate(store: &dyn SessionStore, key: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(AttrangiError::Config("Session storage key cannot be empty".into()).into());
        }
        Self::create(store, key)
    }

    fn create(store: &dyn SessionStore, key: &str) -> Result<Self> {
        let id = SessionId::generate();
        store.set(key, id.as_str())?;
        tracing::info!(session_id = %id, "Created new session id");
        Ok(Self { id, created: true })
    }

    /// The session identifier
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Whether this context generated a new id rather than reusing one
    pub fn was_created(&self) -> bool {
        self.created
    }
}
