use std::sync::Arc;

use compendium::codec::{decode_document, encode_document};
use compendium::query::{
    filter_spells_by_name, sorted_spells, spells_by_class, spells_by_level,
    spells_by_school_grouped,
};
use compendium::testing::ManualClock;
use compendium::{
    DocumentStorage, IdGenerator, MemoryVault, RecordKind, RecordStore, Spell,
    SpellComponentsPatch, SpellPatch,
};

fn spell_store(vault: Arc<MemoryVault>) -> RecordStore<Spell> {
    RecordStore::with_ids(
        DocumentStorage::new(vault),
        IdGenerator::from_seed(33),
        Arc::new(ManualClock::new(2_000)),
    )
}

fn spell(name: &str, level: u8, school: &str, classes: &[&str]) -> Spell {
    let mut spell = Spell::new(name);
    spell.level = level;
    spell.school = school.to_string();
    spell.classes = classes.iter().map(|c| c.to_string()).collect();
    spell
}

#[test]
fn create_clamps_levels_above_nine() {
    let mut store = spell_store(Arc::new(MemoryVault::new()));
    let stored = store.create(spell("Wish", 12, "conjuration", &["wizard"])).unwrap();
    assert_eq!(stored.level, 9);
    assert!(stored.id.starts_with("spell_2000_"));
}

#[test]
fn sparse_documents_decode_with_defaults() {
    let text = r#"{
  "spells": [
    {"name": "Mage Hand", "level": 0, "school": "conjuration", "id": "spell_1_aaaaaaaaa"}
  ],
  "lastUpdated": 10
}"#;
    let doc = decode_document::<Spell>(RecordKind::Spell, text).unwrap();
    let spell = &doc.records[0];
    assert!(spell.is_cantrip());
    assert!(!spell.components.verbal);
    assert_eq!(spell.components.material_description, "");
    assert!(spell.summon_creature.is_none());
    assert!(spell.summoned_creatures.is_empty());
    assert_eq!(spell.casting_trigger, "");
}

#[test]
fn summon_flag_is_omitted_until_set() {
    let mut fire_bolt = spell("Fire Bolt", 0, "evocation", &["wizard"]);
    fire_bolt.id = "spell_1_bbbbbbbbb".to_string();
    let text = encode_document(RecordKind::Spell, &[fire_bolt.clone()], 1).unwrap();
    assert!(!text.contains("summonCreature"));

    fire_bolt.summon_creature = Some(true);
    let text = encode_document(RecordKind::Spell, &[fire_bolt], 1).unwrap();
    assert!(text.contains("\"summonCreature\": true"));
}

#[test]
fn component_patch_merges_against_the_current_value() {
    let mut store = spell_store(Arc::new(MemoryVault::new()));
    let mut find_familiar = spell("Find Familiar", 1, "conjuration", &["wizard"]);
    find_familiar.components.verbal = true;
    find_familiar.components.somatic = true;
    find_familiar.components.material = true;
    find_familiar.components.material_description = "10 gp of charcoal".to_string();
    let stored = store.create(find_familiar).unwrap();

    let patch = SpellPatch {
        components: Some(SpellComponentsPatch {
            material_description: Some("10 gp of charcoal and incense".to_string()),
            ..SpellComponentsPatch::default()
        }),
        ..SpellPatch::default()
    };
    let updated = store.update(&stored.id, patch).unwrap().unwrap();

    // untouched component fields survive the merge
    assert!(updated.components.verbal);
    assert!(updated.components.somatic);
    assert!(updated.components.material);
    assert_eq!(
        updated.components.material_description,
        "10 gp of charcoal and incense"
    );
}

#[test]
fn sorted_spells_order_by_level_then_name() {
    let spells = vec![
        spell("shield", 1, "abjuration", &["wizard"]),
        spell("Fire Bolt", 0, "evocation", &["wizard"]),
        spell("Burning Hands", 1, "evocation", &["wizard"]),
        spell("Acid Splash", 0, "conjuration", &["wizard"]),
    ];
    let names: Vec<&str> = sorted_spells(&spells).iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Acid Splash", "Fire Bolt", "Burning Hands", "shield"]);
}

#[test]
fn name_filter_is_case_insensitive() {
    let spells = vec![
        spell("Fire Bolt", 0, "evocation", &["wizard"]),
        spell("Fireball", 3, "evocation", &["wizard"]),
        spell("Cure Wounds", 1, "abjuration", &["cleric"]),
    ];
    let hits = filter_spells_by_name(&spells, "FIRE");
    assert_eq!(hits.len(), 2);
    assert!(filter_spells_by_name(&spells, "wounds").len() == 1);
    assert!(filter_spells_by_name(&spells, "xyzzy").is_empty());
}

#[test]
fn level_and_class_filters() {
    let spells = vec![
        spell("Fire Bolt", 0, "evocation", &["sorcerer", "wizard"]),
        spell("Cure Wounds", 1, "abjuration", &["cleric", "druid"]),
    ];
    assert_eq!(spells_by_level(&spells, 0).len(), 1);
    assert_eq!(spells_by_class(&spells, "Wizard").len(), 1);
    assert_eq!(spells_by_class(&spells, "bard").len(), 0);
}

#[test]
fn school_grouping_keeps_every_school_in_canonical_order() {
    let spells = vec![
        spell("Fire Bolt", 0, "evocation", &["wizard"]),
        spell("Charm Person", 1, "Enchantment", &["bard"]),
        spell("Homebrew Blast", 1, "chronomancy", &["wizard"]),
    ];
    let groups = spells_by_school_grouped(&spells);

    let schools: Vec<&str> = groups.keys().copied().collect();
    assert_eq!(
        schools,
        vec![
            "abjuration",
            "conjuration",
            "divination",
            "enchantment",
            "evocation",
            "illusion",
            "necromancy",
            "transmutation"
        ]
    );
    assert_eq!(groups["evocation"].len(), 1);
    // school labels match case-insensitively
    assert_eq!(groups["enchantment"].len(), 1);
    // empty schools stay present, unknown schools are dropped
    assert!(groups["necromancy"].is_empty());
    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, 2);
}
