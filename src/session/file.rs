use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::credential::Credential;
use crate::session::{SessionResult, SessionStore};

/// On-disk layout: two string values under fixed keys.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Session persisted as a small JSON file so it survives between runs.
///
/// The file is re-read on every lookup; nothing is cached in memory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> SessionResult<Option<StoredSession>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn credential(&self) -> Option<Credential> {
        let stored = match self.read() {
            Ok(stored) => stored?,
            Err(err) => {
                warn!("Ignoring unreadable session file {}: {err}", self.path.display());
                return None;
            }
        };

        // The access token alone gates routes; a missing refresh token is tolerated.
        let access_token = stored.access_token.filter(|token| !token.is_empty())?;
        Some(Credential {
            access_token,
            refresh_token: stored.refresh_token.unwrap_or_default(),
        })
    }

    fn set_credential(&self, credential: Credential) -> SessionResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            access_token: Some(credential.access_token),
            refresh_token: Some(credential.refresh_token),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_under_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));

        store.set_credential(Credential::new("acc", "ref")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["accessToken"], "acc");
        assert_eq!(raw["refreshToken"], "ref");

        let reopened = FileSessionStore::new(store.path());
        assert_eq!(reopened.credential(), Some(Credential::new("acc", "ref")));
    }

    #[test]
    fn clear_removes_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.set_credential(Credential::new("acc", "ref")).unwrap();

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.credential().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn corrupted_file_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(FileSessionStore::new(&path).credential().is_none());
    }

    #[test]
    fn empty_access_token_reads_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"accessToken": "", "refreshToken": "r"}"#).unwrap();

        assert!(FileSessionStore::new(&path).credential().is_none());
    }
}
