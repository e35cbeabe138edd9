//! Stored credentials (`accessToken` and `email`)
//!
//! The store is injected wherever credentials are read or written so it can
//! be swapped for a fake in tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::Credentials;

#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> AppResult<Option<Credentials>>;
    fn set(&self, credentials: Credentials) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;

    fn token(&self) -> Option<String> {
        self.get().ok().flatten().map(|c| c.access_token)
    }

    fn email(&self) -> Option<String> {
        self.get().ok().flatten().map(|c| c.email)
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Process-local store; nothing survives a restart
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> AppResult<Option<Credentials>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| AppError::Storage("credential lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn set(&self, credentials: Credentials) -> AppResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| AppError::Storage("credential lock poisoned".to_string()))?;
        *guard = Some(credentials);
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| AppError::Storage("credential lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// JSON file store, the CLI's stand-in for browser local storage
pub struct FileCredentialStore {
    path: PathBuf,
    cached: MemoryCredentialStore,
}

impl FileCredentialStore {
    /// Open the store, loading any credentials already on disk
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let cached = match Self::read(&path)? {
            Some(credentials) => MemoryCredentialStore::with(credentials),
            None => MemoryCredentialStore::new(),
        };
        Ok(Self { path, cached })
    }

    fn read(path: &Path) -> AppResult<Option<Credentials>> {
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        match serde_json::from_slice(&bytes) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable credential file");
                Ok(None)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> AppResult<Option<Credentials>> {
        self.cached.get()
    }

    fn set(&self, credentials: Credentials) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(&credentials)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        fs::write(&self.path, bytes)?;
        self.cached.set(credentials)
    }

    fn clear(&self) -> AppResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.cached.clear()
    }
}
