use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::store::SessionStore;
use crate::{DETACHED_SESSION_ID, SESSION_STORAGE_KEY};

/// Opaque token correlating chat turns with server-side conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn detached() -> Self {
        Self(DETACHED_SESSION_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_detached(&self) -> bool {
        self.0 == DETACHED_SESSION_ID
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where identifiers may be persisted.
#[derive(Clone)]
pub enum StorageContext {
    /// No durable storage exists; a fixed sentinel is used and nothing is written
    Detached,
    Persistent(Arc<dyn SessionStore>),
}

/// Hands out the profile's session identifier.
///
/// Nothing is cached in memory: every call consults the store, so a working
/// store always yields the same value while a failing one yields a fresh
/// identifier per call.
#[derive(Clone)]
pub struct SessionIdProvider {
    context: StorageContext,
    key: String,
}

impl SessionIdProvider {
    pub fn new(context: StorageContext) -> Self {
        Self {
            context,
            key: SESSION_STORAGE_KEY.to_string(),
        }
    }

    pub fn detached() -> Self {
        Self::new(StorageContext::Detached)
    }

    pub fn persistent(store: Arc<dyn SessionStore>) -> Self {
        Self::new(StorageContext::Persistent(store))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Never fails; storage errors degrade to an unpersisted identifier.
    pub fn session_id(&self) -> SessionId {
        let store = match &self.context {
            StorageContext::Detached => return SessionId::detached(),
            StorageContext::Persistent(store) => store,
        };

        match store.get(&self.key) {
            Ok(Some(existing)) if !existing.is_empty() => return SessionId::new(existing),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Session store unreadable, using ephemeral id");
                return SessionId::generate();
            }
        }

        let id = SessionId::generate();
        match store.set(&self.key, id.as_str()) {
            Ok(()) => tracing::info!(session_id = %id, "Created new session id"),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Could not persist session id, using ephemeral id")
            }
        }
        id
    }
}
