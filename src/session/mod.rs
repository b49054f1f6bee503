//! Storage for the signed-in user's credential.
//!
//! The store is injected into the API client and the route guard as an
//! `Arc<dyn SessionStore>`; login writes it, logout clears it and every
//! authenticated request reads it.

use thiserror::Error;

use crate::domain::credential::Credential;

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

pub trait SessionStore: Send + Sync {
    /// Returns the stored credential, if any.
    fn credential(&self) -> Option<Credential>;
    /// Replaces the stored credential.
    fn set_credential(&self, credential: Credential) -> SessionResult<()>;
    /// Removes the stored credential.
    fn clear(&self) -> SessionResult<()>;

    fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }
}
