//! Almacenamiento de credenciales
//!
//! Equivalente al `localStorage` del navegador: guarda el token bearer y el
//! último usuario conocido entre ejecuciones.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::user::User;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> AppResult<Option<StoredCredentials>>;
    fn save(&self, credentials: &StoredCredentials) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// Credenciales en un fichero JSON
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> AppResult<Option<StoredCredentials>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, credentials: &StoredCredentials) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(credentials)?)?;
        debug!("💾 Credenciales guardadas en {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Credenciales solo en memoria
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    pub fn with(credentials: StoredCredentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<StoredCredentials>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> AppResult<Option<StoredCredentials>> {
        Ok(self.slot().clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> AppResult<()> {
        *self.slot() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
