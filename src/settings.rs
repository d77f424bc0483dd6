use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::wheel::spin::DEFAULT_REVOLUTIONS_PER_SPIN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpinSettings {
    /// Whole turns added per spin count, purely for show.
    pub revolutions_per_spin: u32,
    /// How long the wheel animates before the result is read off.
    pub transition_ms: u64,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            revolutions_per_spin: DEFAULT_REVOLUTIONS_PER_SPIN,
            transition_ms: 4000,
        }
    }
}

impl SpinSettings {
    pub fn validate(&self) -> Result<()> {
        if self.revolutions_per_spin == 0 {
            bail!("revolutions_per_spin must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct UserSettings {
    spin: SpinSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
    /// Transition time for this process only; never written to disk.
    transition_override: RwLock<Option<u64>>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let data: UserSettings = serde_json::from_str(&contents).unwrap_or_default();
            if let Err(err) = data.spin.validate() {
                log::warn!("Ignoring invalid spin settings in {}: {err}", path.display());
                UserSettings::default()
            } else {
                data
            }
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
            transition_override: RwLock::new(None),
        })
    }

    pub fn spin(&self) -> SpinSettings {
        let mut settings = match self.data.read() {
            Ok(guard) => guard.spin.clone(),
            Err(poisoned) => poisoned.into_inner().spin.clone(),
        };
        let transition_override = match self.transition_override.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        };
        if let Some(transition_ms) = transition_override {
            settings.transition_ms = transition_ms;
        }
        settings
    }

    /// Overrides the transition time until the store is dropped, without
    /// touching the settings file.
    pub fn override_transition(&self, transition_ms: Option<u64>) {
        let mut guard = match self.transition_override.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = transition_ms;
    }

    pub fn update_spin(&self, settings: SpinSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.spin = settings;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
