use std::sync::RwLock;

use crate::domain::credential::Credential;
use crate::session::{SessionResult, SessionStore};

/// Process-local session kept only for the lifetime of the store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn credential(&self) -> Option<Credential> {
        match self.credential.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_credential(&self, credential: Credential) -> SessionResult<()> {
        match self.credential.write() {
            Ok(mut guard) => *guard = Some(credential),
            Err(poisoned) => *poisoned.into_inner() = Some(credential),
        }
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match self.credential.write() {
            Ok(mut guard) => *guard = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_and_clear() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());

        store.set_credential(Credential::new("a", "r")).unwrap();
        assert_eq!(store.credential(), Some(Credential::new("a", "r")));

        store.clear().unwrap();
        assert_eq!(store.credential(), None);
    }
}
