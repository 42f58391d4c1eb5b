use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::content;
use crate::creature::Creature;
use crate::encounter::{Encounter, Participant, ParticipantPatch};
use crate::locale::LocaleContext;
use crate::record::{Clock, IdGenerator, SystemClock};
use crate::settings::SettingsStore;
use crate::spell::Spell;
use crate::storage::DocumentStorage;
use crate::store::{RecordStore, StoreError};
use crate::vault::Vault;

const PARTICIPANT_ID_PREFIX: &str = "part";

/// The embeddable plugin core: the three record stores, settings, and the
/// locale context, all over one vault handle.
pub struct Compendium {
    pub creatures: RecordStore<Creature>,
    pub spells: RecordStore<Spell>,
    pub encounters: RecordStore<Encounter>,
    pub settings: SettingsStore,
    pub locale: LocaleContext,
    clock: Arc<dyn Clock>,
    participant_ids: IdGenerator,
}

impl Compendium {
    pub fn new(vault: Arc<dyn Vault>) -> Self {
        Self::with_clock(vault, Arc::new(SystemClock))
    }

    pub fn with_clock(vault: Arc<dyn Vault>, clock: Arc<dyn Clock>) -> Self {
        Self {
            creatures: RecordStore::new(
                DocumentStorage::new(Arc::clone(&vault)),
                Arc::clone(&clock),
            ),
            spells: RecordStore::new(
                DocumentStorage::new(Arc::clone(&vault)),
                Arc::clone(&clock),
            ),
            encounters: RecordStore::new(
                DocumentStorage::new(Arc::clone(&vault)),
                Arc::clone(&clock),
            ),
            settings: SettingsStore::new(vault),
            locale: LocaleContext::default(),
            clock,
            participant_ids: IdGenerator::from_entropy(),
        }
    }

    /// Load settings and all three collections, logging per-store counts.
    pub fn initialize(&mut self) {
        self.settings.load();
        self.creatures.initialize();
        self.spells.initialize();
        self.encounters.initialize();
        info!(
            creatures = self.creatures.len(),
            spells = self.spells.len(),
            encounters = self.encounters.len(),
            "compendium initialized"
        );
    }

    /// Insert the starter content into every store that is still empty,
    /// through the normal create path. Returns how many records went in;
    /// a second call is a no-op.
    pub fn seed_builtins(&mut self) -> Result<usize> {
        self.creatures.initialize();
        self.spells.initialize();
        self.encounters.initialize();
        let mut inserted = 0;
        if self.creatures.is_empty() {
            for creature in content::starter_creatures()? {
                self.creatures.create(creature)?;
                inserted += 1;
            }
        }
        if self.spells.is_empty() {
            for spell in content::starter_spells()? {
                self.spells.create(spell)?;
                inserted += 1;
            }
        }
        if self.encounters.is_empty() {
            for encounter in content::starter_encounters()? {
                self.encounters.create(encounter)?;
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Append a participant to an encounter, assigning its encounter-scoped
    /// id. `Ok(None)` when the encounter is unknown.
    pub fn add_participant(
        &mut self,
        encounter_id: &str,
        mut participant: Participant,
    ) -> Result<Option<Participant>, StoreError> {
        if self.encounters.get(encounter_id).is_none() {
            return Ok(None);
        }
        let id = self
            .participant_ids
            .next_id(PARTICIPANT_ID_PREFIX, self.clock.now_ms());
        participant.id = id.clone();
        let updated = self.encounters.mutate(encounter_id, |encounter| {
            encounter.participants.push(participant);
        })?;
        Ok(updated.and_then(|encounter| encounter.participant(&id).cloned()))
    }

    /// Patch one participant. `Ok(None)` when either id is unknown; an
    /// unknown participant does not touch the encounter.
    pub fn update_participant(
        &mut self,
        encounter_id: &str,
        participant_id: &str,
        patch: ParticipantPatch,
    ) -> Result<Option<Participant>, StoreError> {
        if !self.participant_exists(encounter_id, participant_id) {
            return Ok(None);
        }
        let updated = self.encounters.mutate(encounter_id, |encounter| {
            if let Some(participant) = encounter.participant_mut(participant_id) {
                patch.apply(participant);
            }
        })?;
        Ok(updated.and_then(|encounter| encounter.participant(participant_id).cloned()))
    }

    /// Remove one participant. `Ok(false)` when either id is unknown.
    pub fn remove_participant(
        &mut self,
        encounter_id: &str,
        participant_id: &str,
    ) -> Result<bool, StoreError> {
        if !self.participant_exists(encounter_id, participant_id) {
            return Ok(false);
        }
        self.encounters.mutate(encounter_id, |encounter| {
            encounter.participants.retain(|p| p.id != participant_id);
        })?;
        Ok(true)
    }

    fn participant_exists(&mut self, encounter_id: &str, participant_id: &str) -> bool {
        self.encounters
            .get(encounter_id)
            .map(|encounter| encounter.participant(participant_id).is_some())
            .unwrap_or(false)
    }
}
