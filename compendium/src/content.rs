use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::creature::Creature;
use crate::encounter::Encounter;
use crate::spell::Spell;

const CREATURES: [(&str, &str); 3] = [
    ("goblin", include_str!("../content/creatures/goblin.json")),
    ("skeleton", include_str!("../content/creatures/skeleton.json")),
    ("wolf", include_str!("../content/creatures/wolf.json")),
];

const SPELLS: [(&str, &str); 2] = [
    ("cure_wounds", include_str!("../content/spells/cure_wounds.json")),
    ("fire_bolt", include_str!("../content/spells/fire_bolt.json")),
];

const ENCOUNTERS: [(&str, &str); 1] = [(
    "goblin_ambush",
    include_str!("../content/encounters/goblin_ambush.json"),
)];

pub fn builtin_creatures() -> HashMap<&'static str, &'static str> {
    HashMap::from(CREATURES)
}

pub fn builtin_spells() -> HashMap<&'static str, &'static str> {
    HashMap::from(SPELLS)
}

pub fn builtin_encounters() -> HashMap<&'static str, &'static str> {
    HashMap::from(ENCOUNTERS)
}

/// Starter bestiary entries, in seed order. Ids and timestamps are assigned
/// by the store at insertion.
pub fn starter_creatures() -> Result<Vec<Creature>> {
    CREATURES
        .iter()
        .map(|(name, text)| parse_record(name, text))
        .collect()
}

pub fn starter_spells() -> Result<Vec<Spell>> {
    SPELLS
        .iter()
        .map(|(name, text)| parse_record(name, text))
        .collect()
}

pub fn starter_encounters() -> Result<Vec<Encounter>> {
    ENCOUNTERS
        .iter()
        .map(|(name, text)| parse_record(name, text))
        .collect()
}

fn parse_record<R: DeserializeOwned>(name: &str, text: &str) -> Result<R> {
    serde_json::from_str(text).with_context(|| format!("invalid builtin record: {}", name))
}
