pub mod codec;
pub mod content;
pub mod creature;
pub mod encounter;
pub mod locale;
pub mod plugin;
pub mod query;
pub mod record;
pub mod settings;
pub mod spell;
pub mod storage;
pub mod store;
pub mod testing;
pub mod vault;

pub use codec::{CodecError, Document};
pub use creature::{Creature, CreaturePatch};
pub use encounter::{
    Encounter, EncounterKind, EncounterPatch, Participant, ParticipantKind, ParticipantPatch,
};
pub use locale::{GameCategory, Locale, LocaleContext, SubscriptionId};
pub use plugin::Compendium;
pub use record::{Clock, IdGenerator, Record, RecordKind, SystemClock};
pub use settings::{Settings, SettingsStore};
pub use spell::{Spell, SpellComponents, SpellComponentsPatch, SpellPatch};
pub use storage::{DocumentStorage, StorageError};
pub use store::{RecordStore, StoreError};
pub use vault::{DirectoryVault, MemoryVault, Vault, VaultError};

/// The six ability scores, in document order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    /// Position inside `characteristics` / `saving_throws` arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }
}

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i64) -> i64 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}

/// Saving-throw modifier: the ability modifier, plus the proficiency bonus
/// when proficient.
pub fn saving_throw_mod(score: i64, proficient: bool, proficiency_bonus: i64) -> i64 {
    ability_mod(score) + if proficient { proficiency_bonus } else { 0 }
}

/// `+N` for zero and positive modifiers, `-N` otherwise.
pub fn format_modifier(modifier: i64) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        format!("-{}", modifier.abs())
    }
}
