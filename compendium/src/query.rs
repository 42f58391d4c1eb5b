//! List-shaping helpers over the in-memory collections. Pure functions; the
//! caller borrows a store's records and renders the result.

use indexmap::IndexMap;

use crate::creature::Creature;
use crate::encounter::{Encounter, EncounterKind};
use crate::locale::SPELL_SCHOOLS;
use crate::spell::Spell;

/// Creatures of one type, in collection order.
pub fn creatures_by_type<'a>(creatures: &'a [Creature], kind: &str) -> Vec<&'a Creature> {
    creatures
        .iter()
        .filter(|creature| creature.kind.eq_ignore_ascii_case(kind))
        .collect()
}

/// Case-insensitive name substring filter.
pub fn filter_spells_by_name<'a>(spells: &'a [Spell], query: &str) -> Vec<&'a Spell> {
    let needle = query.to_lowercase();
    spells
        .iter()
        .filter(|spell| spell.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn spells_by_level(spells: &[Spell], level: u8) -> Vec<&Spell> {
    spells.iter().filter(|spell| spell.level == level).collect()
}

pub fn spells_by_school<'a>(spells: &'a [Spell], school: &str) -> Vec<&'a Spell> {
    spells
        .iter()
        .filter(|spell| spell.school.eq_ignore_ascii_case(school))
        .collect()
}

pub fn spells_by_class<'a>(spells: &'a [Spell], class: &str) -> Vec<&'a Spell> {
    spells
        .iter()
        .filter(|spell| spell.classes.iter().any(|c| c.eq_ignore_ascii_case(class)))
        .collect()
}

/// Level ascending (cantrips first), then case-insensitive name.
pub fn sorted_spells(spells: &[Spell]) -> Vec<&Spell> {
    let mut sorted: Vec<&Spell> = spells.iter().collect();
    sorted.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    sorted
}

/// Spells grouped by canonical school. Every school is present in canonical
/// order, empty groups included; spells with an unknown school are skipped.
pub fn spells_by_school_grouped(spells: &[Spell]) -> IndexMap<&'static str, Vec<&Spell>> {
    let mut groups: IndexMap<&'static str, Vec<&Spell>> = IndexMap::new();
    for school in SPELL_SCHOOLS {
        groups.insert(school, Vec::new());
    }
    for spell in spells {
        if let Some(group) = groups.get_mut(spell.school.to_lowercase().as_str()) {
            group.push(spell);
        }
    }
    groups
}

pub fn encounters_by_kind(encounters: &[Encounter], kind: EncounterKind) -> Vec<&Encounter> {
    encounters
        .iter()
        .filter(|encounter| encounter.kind == kind)
        .collect()
}
