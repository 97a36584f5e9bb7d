//! File-backed session storage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use spotdesk_core::{Error, Result, Session, SessionStore};

/// Overrides the session file location.
pub const SESSION_FILE_ENV: &str = "SPOTDESK_SESSION_FILE";

/// Stores the session as JSON in a single file.
///
/// Writes go to a sibling temp file created owner-only (Unix), which is then
/// renamed over the session file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at `$SPOTDESK_SESSION_FILE`, or in the platform data dir.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(SESSION_FILE_ENV) {
            return Ok(Self::new(path));
        }

        let dirs = ProjectDirs::from("", "", "spotdesk")
            .context("Could not determine data directory")?;
        Ok(Self::new(dirs.data_dir().join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Result<Option<Session>> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(e)),
        };

        let session = serde_json::from_str(&json).map_err(|e| Error::Storage {
            message: format!("invalid session file: {e}"),
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(storage_error)?;
        }

        let json = serde_json::to_vec_pretty(session).map_err(|e| Error::Storage {
            message: e.to_string(),
        })?;

        // The mode only applies on creation, so never reuse a leftover file.
        let temp = self.temp_path();
        remove_if_present(&temp).await?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(&temp).await.map_err(storage_error)?;
        file.write_all(&json).await.map_err(storage_error)?;
        file.sync_all().await.map_err(storage_error)?;
        drop(file);

        fs::rename(&temp, &self.path).await.map_err(storage_error)
    }

    async fn clear(&self) -> Result<()> {
        remove_if_present(&self.path).await
    }
}

async fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(storage_error(e)),
    }
}

fn storage_error(err: std::io::Error) -> Error {
    Error::Storage {
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotdesk_core::AccessToken;
    use tempfile::TempDir;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    #[tokio::test]
    async fn round_trips_and_clears() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load().await.unwrap().is_none());

        let session = Session {
            access_token: Some(AccessToken::new("A1")),
            ..Session::default()
        };
        store.save(&session).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert!(loaded.still_uses(&AccessToken::new("A1")));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn session_file_is_private() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.save(&Session::default()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn overwriting_a_readable_file_leaves_it_private() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileStore::new(&path);
        store.save(&Session::default()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(path).load().await.unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }
}
