use compendium::codec::{CodecError, decode_document, encode_document, to_document_string};
use compendium::{Creature, RecordKind};
use proptest::prelude::*;
use serde_json::{Value, json};

#[test]
fn empty_document_layout() {
    let text = encode_document::<Creature>(RecordKind::Creature, &[], 0).unwrap();
    insta::assert_snapshot!(text, @r#"
{
  "creatures": [],
  "lastUpdated": 0
}
"#);
}

#[test]
fn creature_document_pins_the_exact_wire_text() {
    let mut goblin = Creature::new("Goblin");
    goblin.id = "creature_1000_0a1b2c3d4".to_string();
    goblin.kind = "humanoid".to_string();
    goblin.size = "small".to_string();
    goblin.alignment = "neutral_evil".to_string();
    goblin.ac = 15;
    goblin.hit_dice = "2d6".to_string();
    goblin.speed = "30 ft.".to_string();
    goblin.characteristics = [8, 14, 10, 10, 8, 8];
    goblin.skills = "Stealth +6".to_string();
    goblin.created = 1_000;
    goblin.updated = 1_000;
    goblin.recompute_derived();

    let text = encode_document(RecordKind::Creature, &[goblin], 1_000).unwrap();
    insta::assert_snapshot!(text, @r#"
{
  "creatures": [
    {
      "id": "creature_1000_0a1b2c3d4",
      "name": "Goblin",
      "type": "humanoid",
      "size": "small",
      "alignment": "neutral_evil",
      "ac": 15,
      "hit_dice": "2d6",
      "speed": "30 ft.",
      "initiative": 2,
      "proficiency_bonus": 2,
      "characteristics": [8, 14, 10, 10, 8, 8],
      "saving_throws_proficiency": [false, false, false, false, false, false],
      "saving_throws": [-1, 2, 0, 0, -1, -1],
      "skills": "Stealth +6",
      "senses": "",
      "languages": "",
      "habitat": "",
      "traits": "",
      "actions": "",
      "legendaryActions": "",
      "notes": "",
      "created": 1000,
      "updated": 1000
    }
  ],
  "lastUpdated": 1000
}
"#);
}

#[test]
fn scalar_arrays_stay_inline_and_object_arrays_break() {
    let value = json!({
        "tags": ["fire", "aoe"],
        "slots": [],
        "entries": [
            {"name": "first"},
            {"name": "second"}
        ],
        "count": 2
    });
    let text = to_document_string(&value).unwrap();
    insta::assert_snapshot!(text, @r#"
{
  "tags": ["fire", "aoe"],
  "slots": [],
  "entries": [
    {
      "name": "first"
    },
    {
      "name": "second"
    }
  ],
  "count": 2
}
"#);
}

#[test]
fn brackets_inside_strings_cannot_affect_the_layout() {
    let value = json!({
        "notes": ["contains { and [ tokens", "}]"],
        "name": "weird \"quoted\" name"
    });
    let text = to_document_string(&value).unwrap();
    insta::assert_snapshot!(text, @r#"
{
  "notes": ["contains { and [ tokens", "}]"],
  "name": "weird \"quoted\" name"
}
"#);
    // and the rendered text is still plain JSON
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, value);
}

#[test]
fn encode_decode_encode_is_identity() {
    let mut wolf = Creature::new("Wolf");
    wolf.id = "creature_500_zzzzzzzzz".to_string();
    wolf.characteristics = [12, 15, 12, 3, 12, 6];
    wolf.recompute_derived();

    let first = encode_document(RecordKind::Creature, &[wolf], 500).unwrap();
    let decoded = decode_document::<Creature>(RecordKind::Creature, &first).unwrap();
    let second =
        encode_document(RecordKind::Creature, &decoded.records, decoded.last_updated).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_collection_key_decodes_as_empty() {
    let doc =
        decode_document::<Creature>(RecordKind::Creature, r#"{"lastUpdated": 5}"#).unwrap();
    assert!(doc.records.is_empty());
    assert_eq!(doc.last_updated, 5);
}

#[test]
fn missing_last_updated_defaults_to_zero() {
    let doc =
        decode_document::<Creature>(RecordKind::Creature, r#"{"creatures": []}"#).unwrap();
    assert_eq!(doc.last_updated, 0);
}

#[test]
fn non_object_roots_are_rejected() {
    let err = decode_document::<Creature>(RecordKind::Creature, "[1, 2]").unwrap_err();
    assert!(matches!(err, CodecError::NotAnObject));
}

proptest! {
    #[test]
    fn rendered_documents_reparse_to_the_same_value(
        strings in proptest::collection::vec(".*", 0..6),
        stamp in 0i64..1_000_000_000_000i64,
    ) {
        let value = json!({ "spells": strings, "lastUpdated": stamp });
        let text = to_document_string(&value).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, value);
    }
}
