use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use common::{Error, Result};

use crate::config::PresetFileConfig;
use crate::params::Preset;
use crate::presets;

/// Bar-pattern variants that have a parameter preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarPattern {
    BreakoutBar,
    StopBar,
    ReversalBar,
    LoadedBar,
    StartBar,
}

impl BarPattern {
    pub const ALL: [BarPattern; 5] = [
        BarPattern::BreakoutBar,
        BarPattern::StopBar,
        BarPattern::ReversalBar,
        BarPattern::LoadedBar,
        BarPattern::StartBar,
    ];

    /// Strategy name used by routing and the detector.
    pub fn name(&self) -> &'static str {
        match self {
            BarPattern::BreakoutBar => "breakout_bar",
            BarPattern::StopBar => "stop_bar",
            BarPattern::ReversalBar => "reversal_bar",
            BarPattern::LoadedBar => "loaded_bar",
            BarPattern::StartBar => "start_bar",
        }
    }

    /// Built-in preset for this variant.
    pub fn preset(&self) -> Preset {
        match self {
            BarPattern::BreakoutBar => presets::breakout_bar(),
            BarPattern::StopBar => presets::stop_bar(),
            BarPattern::ReversalBar => presets::reversal_bar(),
            BarPattern::LoadedBar => presets::loaded_bar(),
            BarPattern::StartBar => presets::start_bar(),
        }
    }
}

impl std::fmt::Display for BarPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BarPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BarPattern::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Immutable lookup from variant to its active preset.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRegistry {
    presets: BTreeMap<BarPattern, Preset>,
}

impl PresetRegistry {
    /// Registry holding every built-in preset.
    pub fn builtin() -> Self {
        Self {
            presets: BarPattern::ALL.into_iter().map(|p| (p, p.preset())).collect(),
        }
    }

    /// Built-ins with the file's presets laid over them. Every file preset is
    /// validated before it replaces anything; one bad table rejects the file.
    pub fn with_file(file_cfg: &PresetFileConfig) -> Result<Self> {
        let mut registry = Self::builtin();

        for (name, preset) in &file_cfg.presets {
            let pattern: BarPattern = name.parse()?;
            preset.validate(name)?;
            registry.presets.insert(pattern, *preset);
            info!(name = %pattern, "Registered preset override");
        }

        Ok(registry)
    }

    pub fn get(&self, pattern: BarPattern) -> Preset {
        // every variant is inserted by `builtin`
        self.presets
            .get(&pattern)
            .copied()
            .unwrap_or_else(|| pattern.preset())
    }

    /// Lookup by strategy name. Unknown names yield `None`.
    pub fn get_by_name(&self, name: &str) -> Option<Preset> {
        name.parse::<BarPattern>().ok().map(|p| self.get(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BarPattern, Preset)> + '_ {
        self.presets.iter().map(|(p, preset)| (*p, *preset))
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
