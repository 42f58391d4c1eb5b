use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterKind {
    #[default]
    Combat,
    Hazard,
    Chase,
    Random,
}

impl EncounterKind {
    pub const ALL: [EncounterKind; 4] = [
        EncounterKind::Combat,
        EncounterKind::Hazard,
        EncounterKind::Chase,
        EncounterKind::Random,
    ];

    /// Canonical lowercase key, as persisted and as used for localization.
    pub fn key(self) -> &'static str {
        match self {
            EncounterKind::Combat => "combat",
            EncounterKind::Hazard => "hazard",
            EncounterKind::Chase => "chase",
            EncounterKind::Random => "random",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "combat" => Some(EncounterKind::Combat),
            "hazard" => Some(EncounterKind::Hazard),
            "chase" => Some(EncounterKind::Chase),
            "random" => Some(EncounterKind::Random),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantKind {
    Pc,
    Npc,
    #[default]
    Monster,
    Trap,
}

impl ParticipantKind {
    pub fn key(self) -> &'static str {
        match self {
            ParticipantKind::Pc => "pc",
            ParticipantKind::Npc => "npc",
            ParticipantKind::Monster => "monster",
            ParticipantKind::Trap => "trap",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "pc" => Some(ParticipantKind::Pc),
            "npc" => Some(ParticipantKind::Npc),
            "monster" => Some(ParticipantKind::Monster),
            "trap" => Some(ParticipantKind::Trap),
            _ => None,
        }
    }
}

/// One combatant, hazard, or trap inside an encounter. Ids are unique within
/// their encounter only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParticipantKind,
    pub hp: i64,
    pub max_hp: i64,
    pub ac: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiative: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: EncounterKind,
    pub participants: Vec<Participant>,
    /// Combat only: easy, medium, hard, deadly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Combat only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    pub created: i64,
    pub updated: i64,
}

impl Encounter {
    pub fn new(name: impl Into<String>, kind: EncounterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn participant_mut(&mut self, id: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ParticipantKind>,
    pub hp: Option<i64>,
    pub max_hp: Option<i64>,
    pub ac: Option<i64>,
    pub initiative: Option<i64>,
    pub notes: Option<String>,
}

impl ParticipantPatch {
    pub fn apply(self, participant: &mut Participant) {
        if let Some(name) = self.name {
            participant.name = name;
        }
        if let Some(kind) = self.kind {
            participant.kind = kind;
        }
        if let Some(hp) = self.hp {
            participant.hp = hp;
        }
        if let Some(max_hp) = self.max_hp {
            participant.max_hp = max_hp;
        }
        if let Some(ac) = self.ac {
            participant.ac = ac;
        }
        if let Some(initiative) = self.initiative {
            participant.initiative = Some(initiative);
        }
        if let Some(notes) = self.notes {
            participant.notes = Some(notes);
        }
    }
}

/// Partial update. `participants` replaces the list wholesale; per-entry
/// edits go through the facade's participant operations instead.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EncounterKind>,
    pub participants: Option<Vec<Participant>>,
    pub difficulty: Option<String>,
    pub environment: Option<String>,
}

impl Record for Encounter {
    type Patch = EncounterPatch;

    const KIND: RecordKind = RecordKind::Encounter;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, now_ms: i64) {
        self.id = id;
        self.created = now_ms;
        self.updated = now_ms;
    }

    fn touch(&mut self, now_ms: i64) {
        self.updated = now_ms;
    }

    fn apply_patch(&mut self, patch: EncounterPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(participants) = patch.participants {
            self.participants = participants;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = Some(difficulty);
        }
        if let Some(environment) = patch.environment {
            self.environment = Some(environment);
        }
    }

    fn normalize(&mut self) {
        for participant in &mut self.participants {
            participant.max_hp = participant.max_hp.max(0);
            participant.hp = participant.hp.clamp(0, participant.max_hp);
        }
    }
}
