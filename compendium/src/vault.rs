use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("vault I/O failed: {0}")]
    Io(String),
}

/// The narrow storage capability consumed from the host. Paths are
/// vault-relative with `/` separators.
pub trait Vault: Send + Sync {
    fn read(&self, path: &str) -> Result<String, VaultError>;
    fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;
    fn modify(&self, path: &str, content: &str) -> Result<(), VaultError>;
    fn create_dir(&self, path: &str) -> Result<(), VaultError>;
    fn exists(&self, path: &str) -> bool;
}

/// Vault rooted at a real directory on disk.
pub struct DirectoryVault {
    root: PathBuf,
}

impl DirectoryVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, VaultError> {
        let relative = Path::new(path);
        // Only plain relative segments; anything else could leave the root.
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => return Err(VaultError::Io(format!("path escapes vault: {}", path))),
            }
        }
        Ok(self.root.join(relative))
    }
}

impl Vault for DirectoryVault {
    fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(VaultError::NotFound(path.to_string()));
        }
        fs::read_to_string(&full).map_err(|err| VaultError::Io(err.to_string()))
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        if full.exists() {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|err| VaultError::Io(err.to_string()))?;
        }
        fs::write(&full, content).map_err(|err| VaultError::Io(err.to_string()))
    }

    fn modify(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(VaultError::NotFound(path.to_string()));
        }
        fs::write(&full, content).map_err(|err| VaultError::Io(err.to_string()))
    }

    fn create_dir(&self, path: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        if full.is_dir() {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        fs::create_dir_all(&full).map_err(|err| VaultError::Io(err.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|full| full.exists()).unwrap_or(false)
    }
}

#[derive(Default)]
struct MemoryInner {
    files: HashMap<String, String>,
    dirs: HashSet<String>,
}

/// In-memory vault for tests and embedding.
#[derive(Default)]
pub struct MemoryVault {
    inner: Mutex<MemoryInner>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Raw stored text, for inspecting persisted documents in tests.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.lock().files.get(path).cloned()
    }
}

impl Vault for MemoryVault {
    fn read(&self, path: &str) -> Result<String, VaultError> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(path.to_string()))
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut inner = self.lock();
        if inner.files.contains_key(path) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        inner.files.insert(path.to_string(), content.to_string());
        Ok(())
    }

    fn modify(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut inner = self.lock();
        match inner.files.get_mut(path) {
            Some(slot) => {
                *slot = content.to_string();
                Ok(())
            }
            None => Err(VaultError::NotFound(path.to_string())),
        }
    }

    fn create_dir(&self, path: &str) -> Result<(), VaultError> {
        let mut inner = self.lock();
        if !inner.dirs.insert(path.to_string()) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let inner = self.lock();
        inner.files.contains_key(path) || inner.dirs.contains(path)
    }
}
