use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::codec::{self, CodecError, Document};
use crate::record::RecordKind;
use crate::vault::{Vault, VaultError};

pub const STORAGE_DIR: &str = "storage";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Vault(#[from] VaultError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Vault-backed document persistence shared by the record stores.
pub struct DocumentStorage {
    vault: Arc<dyn Vault>,
}

impl DocumentStorage {
    pub fn new(vault: Arc<dyn Vault>) -> Self {
        Self { vault }
    }

    pub fn vault(&self) -> Arc<dyn Vault> {
        Arc::clone(&self.vault)
    }

    /// Load a collection document, recovering to an empty collection when the
    /// file is absent, unreadable, or malformed.
    pub fn load<R: DeserializeOwned>(&self, kind: RecordKind, now_ms: i64) -> Document<R> {
        let path = kind.document_path();
        let empty = || Document { records: Vec::new(), last_updated: now_ms };
        let text = match self.vault.read(path) {
            Ok(text) => text,
            Err(VaultError::NotFound(_)) => return empty(),
            Err(err) => {
                warn!(path, error = %err, "failed to read document, starting empty");
                return empty();
            }
        };
        match codec::decode_document(kind, &text) {
            Ok(document) => document,
            Err(err) => {
                warn!(path, error = %err, "failed to decode document, starting empty");
                empty()
            }
        }
    }

    /// Rewrite the full collection document.
    pub fn save<R: Serialize>(
        &self,
        kind: RecordKind,
        records: &[R],
        now_ms: i64,
    ) -> Result<(), StorageError> {
        let text = codec::encode_document(kind, records, now_ms)?;
        write_document(self.vault.as_ref(), kind.document_path(), &text)
    }
}

/// Ensure `storage/` exists, then create or rewrite the document file.
pub(crate) fn write_document(
    vault: &dyn Vault,
    path: &str,
    text: &str,
) -> Result<(), StorageError> {
    match vault.create_dir(STORAGE_DIR) {
        Ok(()) | Err(VaultError::AlreadyExists(_)) => {}
        Err(err) => return Err(err.into()),
    }
    if vault.exists(path) {
        vault.modify(path, text)?;
    } else {
        vault.create(path, text)?;
    }
    Ok(())
}
