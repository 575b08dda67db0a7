//! Configuration file support for infucalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/infucalc/config.toml`.

use crate::{Error, InfusionType, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Prescription defaults used when the command line omits them
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub tepezza_dose_mg_per_kg: Option<f64>,

    #[serde(default)]
    pub remicade_dose_mg_per_kg: Option<f64>,

    #[serde(default = "default_remicade_infusion")]
    pub remicade_infusion: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tepezza_dose_mg_per_kg: None,
            remicade_dose_mg_per_kg: None,
            remicade_infusion: default_remicade_infusion(),
        }
    }
}

/// How results are printed
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_remicade_infusion() -> String {
    "standard".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("infucalc").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Default Remicade infusion protocol
    pub fn remicade_infusion(&self) -> Result<InfusionType> {
        self.defaults.remicade_infusion.parse()
    }

    /// Reject defaults that could never produce a valid calculation
    fn validate(&self) -> Result<()> {
        let doses = [
            ("tepezza_dose_mg_per_kg", self.defaults.tepezza_dose_mg_per_kg),
            ("remicade_dose_mg_per_kg", self.defaults.remicade_dose_mg_per_kg),
        ];
        for (key, dose) in doses {
            let Some(dose) = dose else { continue };
            if !(dose.is_finite() && dose > 0.0) {
                return Err(Error::Config(format!(
                    "defaults.{} must be greater than 0, got {}",
                    key, dose
                )));
            }
        }

        self.remicade_infusion()
            .map_err(|e| Error::Config(format!("defaults.remicade_infusion: {}", e)))?;
        Ok(())
    }
}
