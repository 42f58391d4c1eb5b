use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};
use crate::{Ability, ability_mod, saving_throw_mod};

/// A bestiary entry. `initiative` and `saving_throws` are stored snapshots
/// of derived values; `normalize` recomputes them from the base scores so
/// the persisted form always matches a fresh computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Creature {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    pub alignment: String,
    pub ac: i64,
    pub hit_dice: String,
    pub speed: String,
    pub initiative: i64,
    pub proficiency_bonus: i64,
    /// Base ability scores in STR DEX CON INT WIS CHA order.
    pub characteristics: [i64; 6],
    pub saving_throws_proficiency: [bool; 6],
    pub saving_throws: [i64; 6],
    pub skills: String,
    pub senses: String,
    pub languages: String,
    pub habitat: String,
    pub traits: String,
    pub actions: String,
    #[serde(rename = "legendaryActions")]
    pub legendary_actions: String,
    pub notes: String,
    pub created: i64,
    pub updated: i64,
}

impl Default for Creature {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: String::new(),
            size: String::new(),
            alignment: String::new(),
            ac: 10,
            hit_dice: String::new(),
            speed: String::new(),
            initiative: 0,
            proficiency_bonus: 2,
            characteristics: [10; 6],
            saving_throws_proficiency: [false; 6],
            saving_throws: [0; 6],
            skills: String::new(),
            senses: String::new(),
            languages: String::new(),
            habitat: String::new(),
            traits: String::new(),
            actions: String::new(),
            legendary_actions: String::new(),
            notes: String::new(),
            created: 0,
            updated: 0,
        }
    }
}

impl Creature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn ability_score(&self, ability: Ability) -> i64 {
        self.characteristics[ability.index()]
    }

    pub fn ability_modifier(&self, ability: Ability) -> i64 {
        ability_mod(self.ability_score(ability))
    }

    pub fn saving_throw(&self, ability: Ability) -> i64 {
        saving_throw_mod(
            self.ability_score(ability),
            self.saving_throws_proficiency[ability.index()],
            self.proficiency_bonus,
        )
    }

    /// Initiative bonus: the Dexterity modifier.
    pub fn initiative_modifier(&self) -> i64 {
        self.ability_modifier(Ability::Dex)
    }

    /// Refresh the stored derived values from the base scores.
    pub fn recompute_derived(&mut self) {
        self.proficiency_bonus = self.proficiency_bonus.max(0);
        self.initiative = self.initiative_modifier();
        for ability in Ability::ALL {
            self.saving_throws[ability.index()] = self.saving_throw(ability);
        }
    }
}

/// Partial update; `None` fields keep their current value. Derived fields
/// are not patchable, they follow the base scores.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreaturePatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<String>,
    pub alignment: Option<String>,
    pub ac: Option<i64>,
    pub hit_dice: Option<String>,
    pub speed: Option<String>,
    pub proficiency_bonus: Option<i64>,
    pub characteristics: Option<[i64; 6]>,
    pub saving_throws_proficiency: Option<[bool; 6]>,
    pub skills: Option<String>,
    pub senses: Option<String>,
    pub languages: Option<String>,
    pub habitat: Option<String>,
    pub traits: Option<String>,
    pub actions: Option<String>,
    #[serde(rename = "legendaryActions")]
    pub legendary_actions: Option<String>,
    pub notes: Option<String>,
}

impl Record for Creature {
    type Patch = CreaturePatch;

    const KIND: RecordKind = RecordKind::Creature;

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

    fn apply_patch(&mut self, patch: CreaturePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(alignment) = patch.alignment {
            self.alignment = alignment;
        }
        if let Some(ac) = patch.ac {
            self.ac = ac;
        }
        if let Some(hit_dice) = patch.hit_dice {
            self.hit_dice = hit_dice;
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(proficiency_bonus) = patch.proficiency_bonus {
            self.proficiency_bonus = proficiency_bonus;
        }
        if let Some(characteristics) = patch.characteristics {
            self.characteristics = characteristics;
        }
        if let Some(proficiencies) = patch.saving_throws_proficiency {
            self.saving_throws_proficiency = proficiencies;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(senses) = patch.senses {
            self.senses = senses;
        }
        if let Some(languages) = patch.languages {
            self.languages = languages;
        }
        if let Some(habitat) = patch.habitat {
            self.habitat = habitat;
        }
        if let Some(traits) = patch.traits {
            self.traits = traits;
        }
        if let Some(actions) = patch.actions {
            self.actions = actions;
        }
        if let Some(legendary_actions) = patch.legendary_actions {
            self.legendary_actions = legendary_actions;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }

    fn normalize(&mut self) {
        self.recompute_derived();
    }
}
