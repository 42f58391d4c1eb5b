use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::record::{Clock, IdGenerator, Record};
use crate::storage::{DocumentStorage, StorageError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to persist {file}: {source}")]
    Save {
        file: &'static str,
        #[source]
        source: StorageError,
    },
}

/// One entity kind's collection: in-memory records mirrored to a single
/// vault document. Mutations edit memory first and persist the whole
/// collection; a failed persist is rolled back so memory and document never
/// stay divergent.
pub struct RecordStore<R: Record> {
    records: Vec<R>,
    storage: DocumentStorage,
    ids: IdGenerator,
    clock: Arc<dyn Clock>,
    loaded: bool,
}

impl<R: Record> RecordStore<R> {
    pub fn new(storage: DocumentStorage, clock: Arc<dyn Clock>) -> Self {
        Self::with_ids(storage, IdGenerator::from_entropy(), clock)
    }

    pub fn with_ids(storage: DocumentStorage, ids: IdGenerator, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            storage,
            ids,
            clock,
            loaded: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.loaded
    }

    /// Load the collection document. Idempotent; every CRUD operation runs it
    /// on demand, so callers rarely need to.
    pub fn initialize(&mut self) {
        if self.loaded {
            return;
        }
        let document = self.storage.load::<R>(R::KIND, self.clock.now_ms());
        self.records = document.records;
        for record in &mut self.records {
            record.normalize();
        }
        self.loaded = true;
        info!(
            collection = R::KIND.collection_key(),
            count = self.records.len(),
            "store initialized"
        );
    }

    /// Insert a new record: assigns an id and timestamps, appends, persists.
    /// A failed persist pops the appended record before the error returns.
    pub fn create(&mut self, mut record: R) -> Result<R, StoreError> {
        self.initialize();
        let now = self.clock.now_ms();
        let id = self.ids.next_id(R::KIND.id_prefix(), now);
        record.assign_identity(id, now);
        record.normalize();
        let stored = record.clone();
        self.records.push(record);
        if let Err(err) = self.persist(now) {
            self.records.pop();
            warn!(collection = R::KIND.collection_key(), error = %err, "create rolled back");
            return Err(err);
        }
        Ok(stored)
    }

    pub fn get(&mut self, id: &str) -> Option<&R> {
        self.initialize();
        self.records.iter().find(|record| record.id() == id)
    }

    /// Apply a typed partial update. Unknown ids return `Ok(None)`. A failed
    /// persist restores the previous record exactly.
    pub fn update(&mut self, id: &str, patch: R::Patch) -> Result<Option<R>, StoreError> {
        self.mutate(id, |record| record.apply_patch(patch))
    }

    /// Edit a record in place, advancing `updated` and persisting. This is
    /// the shared path for `update` and for callers editing nested state.
    pub fn mutate(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut R),
    ) -> Result<Option<R>, StoreError> {
        self.initialize();
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            return Ok(None);
        };
        let snapshot = self.records[index].clone();
        let now = self.clock.now_ms();
        {
            let record = &mut self.records[index];
            edit(record);
            record.touch(now);
            record.normalize();
        }
        if let Err(err) = self.persist(now) {
            self.records[index] = snapshot;
            warn!(collection = R::KIND.collection_key(), error = %err, "update rolled back");
            return Err(err);
        }
        Ok(Some(self.records[index].clone()))
    }

    /// Remove a record. Unknown ids return `Ok(false)`. A failed persist
    /// re-inserts the record at its original index.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        self.initialize();
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            return Ok(false);
        };
        let removed = self.records.remove(index);
        if let Err(err) = self.persist(self.clock.now_ms()) {
            self.records.insert(index, removed);
            warn!(collection = R::KIND.collection_key(), error = %err, "delete rolled back");
            return Err(err);
        }
        Ok(true)
    }

    /// Current in-memory records. Does not trigger a load.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self, now_ms: i64) -> Result<(), StoreError> {
        self.storage
            .save(R::KIND, &self.records, now_ms)
            .map_err(|source| StoreError::Save {
                file: R::KIND.document_path(),
                source,
            })
    }
}
