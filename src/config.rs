use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("vnetctl"))
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_mappings_path() -> String {
    "~/.config/vnetctl/mappings.json".to_string()
}

fn default_policies_path() -> String {
    "~/.config/vnetctl/policies.json".to_string()
}

fn default_peak_multiplier() -> f64 {
    2.0
}

/// Operator settings, stored as `settings.json` in the config dir.
///
/// The QoS peak bandwidth multiplier is read through [`Settings::load`] at
/// each resolution, never cached, so edits apply to the next resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the backend management API.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Path of the control-plane network mapping file.
    #[serde(default = "default_mappings_path")]
    pub mappings_path: String,

    /// Path of the logical QoS policy file.
    #[serde(default = "default_policies_path")]
    pub policies_path: String,

    /// Peak bandwidth is synthesized as `average * multiplier` because the
    /// backend shaping format carries a single bandwidth value.
    #[serde(default = "default_peak_multiplier")]
    pub qos_peak_bw_multiplier: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            mappings_path: default_mappings_path(),
            policies_path: default_policies_path(),
            qos_peak_bw_multiplier: default_peak_multiplier(),
        }
    }
}

impl Settings {
    /// Path of the settings file
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("settings.json"))
    }

    /// Load settings.json, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load settings from an explicit path (used by tests)
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid settings format in {}", path.display()))
    }

    /// Get expanded mapping file path
    pub fn mappings_file(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.mappings_path).as_ref())
    }

    /// Get expanded policy file path
    pub fn policies_file(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.policies_path).as_ref())
    }
}
