use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The three persisted collections.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Creature,
    Spell,
    Encounter,
}

impl RecordKind {
    /// Key of the record array inside the collection document.
    pub fn collection_key(self) -> &'static str {
        match self {
            RecordKind::Creature => "creatures",
            RecordKind::Spell => "spells",
            RecordKind::Encounter => "encounters",
        }
    }

    /// Prefix of generated record ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            RecordKind::Creature => "creature",
            RecordKind::Spell => "spell",
            RecordKind::Encounter => "enc",
        }
    }

    /// Vault path of the collection document.
    pub fn document_path(self) -> &'static str {
        match self {
            RecordKind::Creature => "storage/bestiary.json",
            RecordKind::Spell => "storage/spells.json",
            RecordKind::Encounter => "storage/encounters.json",
        }
    }
}

/// A persisted entity: identity, timestamps, and a typed partial update.
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Patch;

    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Called once at insertion with the generated id; sets both timestamps.
    fn assign_identity(&mut self, id: String, now_ms: i64);

    /// Advance `updated` after an edit.
    fn touch(&mut self, now_ms: i64);

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Re-derive stored computed fields and clamp out-of-range values.
    /// Runs on load and before every persist.
    fn normalize(&mut self) {}
}

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Produces `<prefix>_<ms>_<random base36 suffix>` ids, seedable for tests.
pub struct IdGenerator {
    rng: ChaCha8Rng,
}

impl IdGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }

    pub fn next_id(&mut self, prefix: &str, now_ms: i64) -> String {
        let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
        for _ in 0..ID_SUFFIX_LEN {
            let index = self.rng.gen_range(0..ID_ALPHABET.len());
            suffix.push(ID_ALPHABET[index] as char);
        }
        format!("{}_{}_{}", prefix, now_ms, suffix)
    }
}

/// Millisecond-epoch time source; a seam so tests can drive timestamps.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}
