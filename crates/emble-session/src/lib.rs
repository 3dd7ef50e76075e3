//! Session identity for correlating chat turns with server-side state.
//!
//! A [`SessionIdProvider`] hands out one identifier per storage profile. The
//! identifier is created lazily, persisted under [`SESSION_STORAGE_KEY`] and
//! reused for as long as the storage entry lives. Storage problems never
//! reach the caller: they degrade to an ephemeral identifier.

pub mod error;
pub mod provider;
pub mod store;

pub use error::SessionStoreError;
pub use provider::{SessionId, SessionIdProvider, StorageContext};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Storage key holding the persisted identifier
pub const SESSION_STORAGE_KEY: &str = "sie_session_id";

/// Returned when no durable storage exists at all (server-side rendering, headless runs)
pub const DETACHED_SESSION_ID: &str = "ssr";
