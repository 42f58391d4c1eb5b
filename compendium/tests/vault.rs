use std::sync::Arc;

use compendium::testing::ManualClock;
use compendium::{Compendium, Creature, DirectoryVault, MemoryVault, Vault, VaultError};

#[test]
fn directory_vault_round_trips_files() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    assert!(!vault.exists("storage/bestiary.json"));
    vault.create("storage/bestiary.json", "{}").unwrap();
    assert!(vault.exists("storage/bestiary.json"));
    assert_eq!(vault.read("storage/bestiary.json").unwrap(), "{}");

    vault.modify("storage/bestiary.json", "{\"creatures\": []}").unwrap();
    assert_eq!(vault.read("storage/bestiary.json").unwrap(), "{\"creatures\": []}");
}

#[test]
fn directory_vault_create_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    vault.create("note.json", "a").unwrap();
    let err = vault.create("note.json", "b").unwrap_err();
    assert!(matches!(err, VaultError::AlreadyExists(_)));
    // the original content survives
    assert_eq!(vault.read("note.json").unwrap(), "a");
}

#[test]
fn directory_vault_modify_requires_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());
    let err = vault.modify("missing.json", "x").unwrap_err();
    assert!(matches!(err, VaultError::NotFound(_)));
}

#[test]
fn directory_vault_rejects_escaping_paths() {
    let dir = tempfile::tempdir().unwrap();
    let vault = DirectoryVault::new(dir.path());

    let err = vault.create("../outside.json", "x").unwrap_err();
    assert!(matches!(err, VaultError::Io(_)));
    assert!(err.to_string().contains("path escapes vault"));
    let err = vault.read("/etc/hostname").unwrap_err();
    assert!(matches!(err, VaultError::Io(_)));
    assert!(!vault.exists("../outside.json"));
}

#[test]
fn memory_vault_mirrors_the_directory_contract() {
    let vault = MemoryVault::new();

    vault.create("storage/spells.json", "{}").unwrap();
    assert!(matches!(
        vault.create("storage/spells.json", "{}").unwrap_err(),
        VaultError::AlreadyExists(_)
    ));
    assert!(matches!(
        vault.modify("storage/other.json", "{}").unwrap_err(),
        VaultError::NotFound(_)
    ));
    assert!(matches!(
        vault.read("storage/other.json").unwrap_err(),
        VaultError::NotFound(_)
    ));

    vault.create_dir("storage").unwrap();
    assert!(matches!(
        vault.create_dir("storage").unwrap_err(),
        VaultError::AlreadyExists(_)
    ));
    assert!(vault.exists("storage"));
    assert!(vault.exists("storage/spells.json"));
}

#[test]
fn compendium_persists_through_a_real_directory() {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(4_000));

    let id = {
        let vault = Arc::new(DirectoryVault::new(dir.path()));
        let mut compendium = Compendium::with_clock(vault, clock.clone());
        compendium.initialize();
        compendium.creatures.create(Creature::new("Owlbear")).unwrap().id
    };

    // a second instance over the same directory sees the record
    let vault = Arc::new(DirectoryVault::new(dir.path()));
    let mut reopened = Compendium::with_clock(vault, clock);
    reopened.initialize();
    assert_eq!(reopened.creatures.len(), 1);
    assert_eq!(reopened.creatures.get(&id).unwrap().name, "Owlbear");
    assert!(dir.path().join("storage/bestiary.json").is_file());
}
