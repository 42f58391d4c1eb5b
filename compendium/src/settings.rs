use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::{self, CodecError};
use crate::storage::{self, StorageError};
use crate::vault::{Vault, VaultError};

pub const SETTINGS_FILE: &str = "storage/settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(rename = "defaultHP")]
    pub default_hp: i64,
    pub auto_save: bool,
    pub round_timer: i64,
    pub encounters_folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_hp: 100,
            auto_save: true,
            round_timer: 60,
            encounters_folder: "Encounters".to_string(),
        }
    }
}

/// Plugin settings persisted as their own vault document. A partial document
/// merges over defaults; an absent or unreadable one yields pure defaults.
pub struct SettingsStore {
    vault: Arc<dyn Vault>,
    settings: Settings,
}

impl SettingsStore {
    pub fn new(vault: Arc<dyn Vault>) -> Self {
        Self {
            vault,
            settings: Settings::default(),
        }
    }

    pub fn load(&mut self) {
        let text = match self.vault.read(SETTINGS_FILE) {
            Ok(text) => text,
            Err(VaultError::NotFound(_)) => {
                self.settings = Settings::default();
                return;
            }
            Err(err) => {
                warn!(path = SETTINGS_FILE, error = %err, "failed to read settings, using defaults");
                self.settings = Settings::default();
                return;
            }
        };
        self.settings = match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(path = SETTINGS_FILE, error = %err, "failed to parse settings, using defaults");
                Settings::default()
            }
        };
    }

    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Persist first; memory only changes once the write succeeds.
    pub fn set(&mut self, settings: Settings) -> Result<(), StorageError> {
        let value = serde_json::to_value(&settings).map_err(CodecError::from)?;
        let text = codec::to_document_string(&value)?;
        storage::write_document(self.vault.as_ref(), SETTINGS_FILE, &text)?;
        self.settings = settings;
        Ok(())
    }
}
