use std::sync::Arc;

use compendium::{ability_mod, Compendium, Creature, DirectoryVault, Encounter, Spell};
use jni::objects::{JClass, JString};
use jni::sys::{jint, jstring};
use jni::JNIEnv;
use serde_json::json;

fn ok(env: &JNIEnv, value: serde_json::Value) -> jstring {
    let payload = json!({ "ok": true, "result": value });
    env.new_string(serde_json::to_string(&payload).unwrap())
        .unwrap()
        .into_raw()
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    env.new_string(format!(r#"{{"ok":false,"error":"{}"}}"#, e))
        .unwrap()
        .into_raw()
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    env.new_string("compendium-ffi 0.1.0")
        .expect("new_string failed")
}

/// Ability modifier for a raw score, floor((score - 10) / 2).
#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_abilityModifier(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    score: jint,
) -> jint {
    ability_mod(score as i64) as jint
}

/// Derived stats for a creature JSON: initiative, per-ability modifiers, and
/// saving throws. Pure computation, no vault involved.
#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_creatureStatsJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match creature_stats_internal(&input) {
        Ok(stats) => ok(&env, stats),
        Err(e) => err(&env, e),
    }
}

/// Insert a creature into the vault at `vaultDir`; returns the stored record
/// with its assigned id and timestamps.
#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_createCreatureJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    json: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match create_creature_internal(&root, &input) {
        Ok(stored) => ok(&env, serde_json::to_value(stored).unwrap()),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_listCreaturesJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let creatures = list_creatures_internal(&root);
    ok(&env, serde_json::to_value(creatures).unwrap())
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_deleteCreatureJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    id: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let id: String = match env.get_string(&id) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match delete_creature_internal(&root, &id) {
        Ok(deleted) => ok(&env, json!({ "deleted": deleted })),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_createSpellJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    json: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match create_spell_internal(&root, &input) {
        Ok(stored) => ok(&env, serde_json::to_value(stored).unwrap()),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_listSpellsJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let spells = list_spells_internal(&root);
    ok(&env, serde_json::to_value(spells).unwrap())
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_deleteSpellJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    id: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let id: String = match env.get_string(&id) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match delete_spell_internal(&root, &id) {
        Ok(deleted) => ok(&env, json!({ "deleted": deleted })),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_createEncounterJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    json: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match create_encounter_internal(&root, &input) {
        Ok(stored) => ok(&env, serde_json::to_value(stored).unwrap()),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_listEncountersJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let encounters = list_encounters_internal(&root);
    ok(&env, serde_json::to_value(encounters).unwrap())
}

#[no_mangle]
pub extern "system" fn Java_com_compendium_Ffi_deleteEncounterJson(
    mut env: JNIEnv,
    _class: JClass,
    vault_dir: JString,
    id: JString,
) -> jstring {
    let root: String = match env.get_string(&vault_dir) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let id: String = match env.get_string(&id) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    match delete_encounter_internal(&root, &id) {
        Ok(deleted) => ok(&env, json!({ "deleted": deleted })),
        Err(e) => err(&env, e),
    }
}

// Internal functions for testing and embedding without JNI overhead.

pub fn creature_stats_internal(json: &str) -> Result<serde_json::Value, String> {
    let mut creature: Creature =
        serde_json::from_str(json).map_err(|e| format!("invalid_creature: {}", e))?;
    creature.recompute_derived();
    let modifiers: Vec<i64> = creature
        .characteristics
        .iter()
        .map(|score| ability_mod(*score))
        .collect();
    Ok(json!({
        "initiative": creature.initiative,
        "proficiencyBonus": creature.proficiency_bonus,
        "modifiers": modifiers,
        "savingThrows": creature.saving_throws,
    }))
}

pub fn create_creature_internal(vault_dir: &str, json: &str) -> Result<Creature, String> {
    let creature: Creature =
        serde_json::from_str(json).map_err(|e| format!("invalid_creature: {}", e))?;
    let mut app = open(vault_dir);
    app.creatures.create(creature).map_err(|e| e.to_string())
}

pub fn list_creatures_internal(vault_dir: &str) -> Vec<Creature> {
    let mut app = open(vault_dir);
    app.creatures.initialize();
    app.creatures.all().to_vec()
}

pub fn delete_creature_internal(vault_dir: &str, id: &str) -> Result<bool, String> {
    let mut app = open(vault_dir);
    app.creatures.delete(id).map_err(|e| e.to_string())
}

pub fn create_spell_internal(vault_dir: &str, json: &str) -> Result<Spell, String> {
    let spell: Spell = serde_json::from_str(json).map_err(|e| format!("invalid_spell: {}", e))?;
    let mut app = open(vault_dir);
    app.spells.create(spell).map_err(|e| e.to_string())
}

pub fn list_spells_internal(vault_dir: &str) -> Vec<Spell> {
    let mut app = open(vault_dir);
    app.spells.initialize();
    app.spells.all().to_vec()
}

pub fn delete_spell_internal(vault_dir: &str, id: &str) -> Result<bool, String> {
    let mut app = open(vault_dir);
    app.spells.delete(id).map_err(|e| e.to_string())
}

pub fn create_encounter_internal(vault_dir: &str, json: &str) -> Result<Encounter, String> {
    let encounter: Encounter =
        serde_json::from_str(json).map_err(|e| format!("invalid_encounter: {}", e))?;
    let mut app = open(vault_dir);
    app.encounters.create(encounter).map_err(|e| e.to_string())
}

pub fn list_encounters_internal(vault_dir: &str) -> Vec<Encounter> {
    let mut app = open(vault_dir);
    app.encounters.initialize();
    app.encounters.all().to_vec()
}

pub fn delete_encounter_internal(vault_dir: &str, id: &str) -> Result<bool, String> {
    let mut app = open(vault_dir);
    app.encounters.delete(id).map_err(|e| e.to_string())
}

fn open(vault_dir: &str) -> Compendium {
    Compendium::new(Arc::new(DirectoryVault::new(vault_dir)))
}
