use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Connection details for the attendance service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    /// Request-forgery-protection token handed over by the hosting page.
    pub csrf_token: Option<String>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            csrf_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    backend: BackendSettings,
    /// Raw descriptor used for device-class classification.
    device_descriptor: Option<String>,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn backend(&self) -> BackendSettings {
        self.data.read().unwrap().backend.clone()
    }

    pub fn device_descriptor(&self) -> Option<String> {
        self.data.read().unwrap().device_descriptor.clone()
    }

    pub fn update_backend(&self, settings: BackendSettings) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.backend = settings;
        self.persist(&guard)
    }

    pub fn update_device_descriptor(&self, descriptor: Option<String>) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.device_descriptor = descriptor;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
