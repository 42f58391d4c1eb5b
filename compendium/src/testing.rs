//! Deterministic doubles for the vault and clock seams. Used by this
//! crate's tests and available to embedders wiring up harnesses.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::record::Clock;
use crate::vault::{MemoryVault, Vault, VaultError};

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::Relaxed);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

/// Memory vault whose writes fail on command; reads always pass through.
/// Rollback tests flip `fail_writes` between operations.
#[derive(Default)]
pub struct FailingVault {
    inner: MemoryVault,
    fail_writes: AtomicBool,
}

impl FailingVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Raw stored text, same as `MemoryVault::contents`.
    pub fn contents(&self, path: &str) -> Option<String> {
        self.inner.contents(path)
    }

    fn check_write(&self, path: &str) -> Result<(), VaultError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(VaultError::Io(format!("simulated write failure: {}", path)));
        }
        Ok(())
    }
}

impl Vault for FailingVault {
    fn read(&self, path: &str) -> Result<String, VaultError> {
        self.inner.read(path)
    }

    fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        self.check_write(path)?;
        self.inner.create(path, content)
    }

    fn modify(&self, path: &str, content: &str) -> Result<(), VaultError> {
        self.check_write(path)?;
        self.inner.modify(path, content)
    }

    fn create_dir(&self, path: &str) -> Result<(), VaultError> {
        self.check_write(path)?;
        self.inner.create_dir(path)
    }

    fn exists(&self, path: &str) -> bool {
        self.inner.exists(path)
    }
}
