//! Preference persistence — a JSON file standing in for localStorage.
//!
//! One small key-value file next to the executable, loaded once at startup
//! and written on every store (the only key today is the audio toggle).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use circle22_engine::PrefStore;

const PREFS_FILE: &str = "circle22_prefs.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefValues {
    #[serde(default)]
    entries: HashMap<String, String>,
}

/// File-backed preference store.
pub struct PrefsFile {
    path: PathBuf,
    values: PrefValues,
}

impl PrefsFile {
    /// Load preferences from `dir`, falling back to empty on any problem.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(PREFS_FILE);

        let values = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<PrefValues>(&json) {
                    Ok(values) => {
                        tracing::info!(
                            "Loaded {} preference(s) from {}",
                            values.entries.len(),
                            path.display()
                        );
                        values
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse preference file: {}", e);
                        PrefValues::default()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read preference file: {}", e);
                    PrefValues::default()
                }
            }
        } else {
            tracing::info!("No preference file found, starting fresh");
            PrefValues::default()
        };

        Self { path, values }
    }

    /// Write all preferences to disk.
    fn persist(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(json) => {
                if let Some(parent) = self.path.parent() {
                    if let Err(e) = std::fs::create_dir_all(parent) {
                        tracing::warn!(
                            "Failed to create preference directory {}: {}",
                            parent.display(),
                            e
                        );
                    }
                }
                match std::fs::write(&self.path, &json) {
                    Ok(_) => tracing::debug!("Preferences saved to {}", self.path.display()),
                    Err(e) => tracing::error!("Failed to save preferences: {}", e),
                }
            }
            Err(e) => tracing::error!("Failed to serialize preferences: {}", e),
        }
    }
}

impl PrefStore for PrefsFile {
    fn read(&self, key: &str) -> Option<String> {
        self.values.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.values
            .entries
            .insert(key.to_string(), value.to_string());
        self.persist();
    }
}
