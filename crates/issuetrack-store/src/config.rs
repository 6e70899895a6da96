use serde::{Deserialize, Serialize};

use crate::layout::DataLayout;
use crate::StoreError;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Redb,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub version: u32,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub backend: Backend,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bind: default_bind(),
            backend: Backend::default(),
        }
    }
}

pub fn write_default_config(layout: &DataLayout) -> Result<(), StoreError> {
    write_config(layout, &TrackerConfig::default())
}

pub fn write_config(layout: &DataLayout, config: &TrackerConfig) -> Result<(), StoreError> {
    let toml_str =
        toml::to_string_pretty(config).map_err(|e| StoreError::Config(e.to_string()))?;
    std::fs::write(layout.config_file(), toml_str)?;
    Ok(())
}

pub fn read_config(layout: &DataLayout) -> Result<TrackerConfig, StoreError> {
    let content = std::fs::read_to_string(layout.config_file())?;
    let config: TrackerConfig =
        toml::from_str(&content).map_err(|e| StoreError::Config(e.to_string()))?;
    Ok(config)
}

/// The stored config, or defaults when the directory has none yet.
pub fn read_config_or_default(layout: &DataLayout) -> Result<TrackerConfig, StoreError> {
    if layout.config_file().exists() {
        read_config(layout)
    } else {
        Ok(TrackerConfig::default())
    }
}
