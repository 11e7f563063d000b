use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use common::Result;

use crate::params::Preset;

/// Preset overlay file (TOML), one complete table per variant.
///
/// Example `config/presets.toml`:
/// ```toml
/// [breakout_bar]
/// lookback = 7
/// direction_opt = "Up"
/// bar_type_opt = "None"
/// # ... every other key of the schema ...
/// high_breakout_count_percent = 10.0
/// ```
///
/// A table missing any key, or carrying a key outside the schema, fails
/// to load.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PresetFileConfig {
    pub presets: BTreeMap<String, Preset>,
}

impl PresetFileConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::parse(&content)?;
        info!(path = %path.display(), presets = cfg.presets.len(), "Loaded preset file");
        Ok(cfg)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
