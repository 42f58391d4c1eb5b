use std::sync::Arc;

use compendium::settings::SETTINGS_FILE;
use compendium::testing::FailingVault;
use compendium::{MemoryVault, Settings, SettingsStore, Vault};

#[test]
fn missing_document_yields_defaults() {
    let mut store = SettingsStore::new(Arc::new(MemoryVault::new()));
    store.load();
    assert_eq!(*store.get(), Settings::default());
    assert_eq!(store.get().default_hp, 100);
    assert!(store.get().auto_save);
    assert_eq!(store.get().round_timer, 60);
    assert_eq!(store.get().encounters_folder, "Encounters");
}

#[test]
fn partial_document_merges_over_defaults() {
    let vault = Arc::new(MemoryVault::new());
    vault
        .create(SETTINGS_FILE, r#"{"defaultHP": 25, "autoSave": false}"#)
        .unwrap();

    let mut store = SettingsStore::new(vault);
    store.load();
    assert_eq!(store.get().default_hp, 25);
    assert!(!store.get().auto_save);
    // untouched fields keep their defaults
    assert_eq!(store.get().round_timer, 60);
    assert_eq!(store.get().encounters_folder, "Encounters");
}

#[test]
fn corrupt_document_yields_defaults() {
    let vault = Arc::new(MemoryVault::new());
    vault.create(SETTINGS_FILE, "{broken").unwrap();

    let mut store = SettingsStore::new(vault);
    store.load();
    assert_eq!(*store.get(), Settings::default());
}

#[test]
fn set_persists_the_wire_keys() {
    let vault = Arc::new(MemoryVault::new());
    let mut store = SettingsStore::new(vault.clone());

    let mut settings = Settings::default();
    settings.default_hp = 50;
    settings.encounters_folder = "Sessions".to_string();
    store.set(settings.clone()).unwrap();
    assert_eq!(*store.get(), settings);

    let text = vault.contents(SETTINGS_FILE).unwrap();
    assert!(text.contains("\"defaultHP\": 50"));
    assert!(text.contains("\"autoSave\": true"));
    assert!(text.contains("\"roundTimer\": 60"));
    assert!(text.contains("\"encountersFolder\": \"Sessions\""));

    // a fresh store reads the same values back
    let mut reopened = SettingsStore::new(vault);
    reopened.load();
    assert_eq!(*reopened.get(), settings);
}

#[test]
fn failed_set_keeps_the_previous_settings() {
    let vault = Arc::new(FailingVault::new());
    let mut store = SettingsStore::new(vault.clone());
    store.load();

    vault.fail_writes(true);
    let mut settings = Settings::default();
    settings.default_hp = 1;
    assert!(store.set(settings).is_err());
    assert_eq!(store.get().default_hp, 100);
}
