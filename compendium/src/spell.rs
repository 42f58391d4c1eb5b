use serde::{Deserialize, Serialize};

use crate::record::{Record, RecordKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpellComponents {
    pub verbal: bool,
    pub verbal_description: String,
    pub somatic: bool,
    pub material: bool,
    pub material_description: String,
}

/// A spellbook entry. Identity fields sit at the end of the document form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spell {
    pub name: String,
    /// 0 through 9; 0 is a cantrip.
    pub level: u8,
    pub school: String,
    pub classes: Vec<String>,
    pub action_type: String,
    pub casting_trigger: String,
    pub casting_time: String,
    pub range: String,
    pub duration: String,
    pub concentration: bool,
    pub ritual: bool,
    pub components: SpellComponents,
    pub description: String,
    pub spell_upgrade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summon_creature: Option<bool>,
    pub summoned_creatures: Vec<String>,
    pub mana_cost: bool,
    pub id: String,
    pub created: i64,
    pub updated: i64,
}

impl Spell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellComponentsPatch {
    pub verbal: Option<bool>,
    pub verbal_description: Option<String>,
    pub somatic: Option<bool>,
    pub material: Option<bool>,
    pub material_description: Option<String>,
}

/// Partial update; the components sub-record merges field-by-field against
/// the current value rather than being replaced wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellPatch {
    pub name: Option<String>,
    pub level: Option<u8>,
    pub school: Option<String>,
    pub classes: Option<Vec<String>>,
    pub action_type: Option<String>,
    pub casting_trigger: Option<String>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub duration: Option<String>,
    pub concentration: Option<bool>,
    pub ritual: Option<bool>,
    pub components: Option<SpellComponentsPatch>,
    pub description: Option<String>,
    pub spell_upgrade: Option<String>,
    pub summon_creature: Option<bool>,
    pub summoned_creatures: Option<Vec<String>>,
    pub mana_cost: Option<bool>,
}

impl Record for Spell {
    type Patch = SpellPatch;

    const KIND: RecordKind = RecordKind::Spell;

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

    fn apply_patch(&mut self, patch: SpellPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(school) = patch.school {
            self.school = school;
        }
        if let Some(classes) = patch.classes {
            self.classes = classes;
        }
        if let Some(action_type) = patch.action_type {
            self.action_type = action_type;
        }
        if let Some(casting_trigger) = patch.casting_trigger {
            self.casting_trigger = casting_trigger;
        }
        if let Some(casting_time) = patch.casting_time {
            self.casting_time = casting_time;
        }
        if let Some(range) = patch.range {
            self.range = range;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(concentration) = patch.concentration {
            self.concentration = concentration;
        }
        if let Some(ritual) = patch.ritual {
            self.ritual = ritual;
        }
        if let Some(components) = patch.components {
            if let Some(verbal) = components.verbal {
                self.components.verbal = verbal;
            }
            if let Some(verbal_description) = components.verbal_description {
                self.components.verbal_description = verbal_description;
            }
            if let Some(somatic) = components.somatic {
                self.components.somatic = somatic;
            }
            if let Some(material) = components.material {
                self.components.material = material;
            }
            if let Some(material_description) = components.material_description {
                self.components.material_description = material_description;
            }
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(spell_upgrade) = patch.spell_upgrade {
            self.spell_upgrade = spell_upgrade;
        }
        if let Some(summon_creature) = patch.summon_creature {
            self.summon_creature = Some(summon_creature);
        }
        if let Some(summoned_creatures) = patch.summoned_creatures {
            self.summoned_creatures = summoned_creatures;
        }
        if let Some(mana_cost) = patch.mana_cost {
            self.mana_cost = mana_cost;
        }
    }

    fn normalize(&mut self) {
        self.level = self.level.min(9);
    }
}
