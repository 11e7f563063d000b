use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use common::{Error, Result};

/// Every key a preset carries, in schema order. The detector indexes presets
/// by these names without defaults, so all of them must always be present.
pub const PARAM_KEYS: [&str; 29] = [
    "lookback",
    "direction_opt",
    "bar_type_opt",
    "spread_opt",
    "spread_std",
    "spread_abnormal_std",
    "momentum_opt",
    "momentum_std",
    "volume_opt",
    "volume_std",
    "volume_abnormal_std",
    "close_opt",
    "macro_opt",
    "macro_method",
    "v1_macro_short_lookback",
    "v1_macro_medium_lookback",
    "v1_macro_long_lookback",
    "v1_macro_percentile",
    "v2_macro_short_lookback",
    "v2_macro_medium_lookback",
    "v2_macro_long_lookback",
    "v2_macro_percentile",
    "use_breakout_close",
    "breakout_close_percent",
    "use_arctangent_ratio",
    "arctangent_ratio_threshold",
    "use_high_breakout",
    "high_breakout_lookback",
    "high_breakout_count_percent",
];

/// Declares a closed string option. The serialized label is what the
/// detector compares against, so it must match exactly.
macro_rules! param_option {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

param_option!(
    /// Required bar direction (close vs. open).
    Direction {
        Up => "Up",
        Down => "Down",
        None => "None",
    }
);

param_option!(
    /// Bar shape relative to the previous bar.
    BarType {
        NewHigh => "New High",
        NewLow => "New Low",
        OutsideBar => "Outside Bar",
        NotOutsideBar => "Not Outside Bar",
        InsideBar => "Inside Bar",
        NewHighOrOutsideBar => "New High or Outside Bar",
        NewLowOrOutsideBar => "New Low or Outside Bar",
        None => "None",
    }
);

param_option!(
    /// Bar range compared with its rolling distribution.
    SpreadLevel {
        Wide => "Wide",
        Narrow => "Narrow",
        Abnormal => "Abnormal",
        None => "None",
    }
);

param_option!(
    /// Close-to-close change compared with its rolling distribution.
    MomentumLevel {
        Wide => "Wide",
        Narrow => "Narrow",
        None => "None",
    }
);

param_option!(
    /// Volume compared with its rolling distribution.
    VolumeLevel {
        High => "High",
        Low => "Low",
        Abnormal => "Abnormal",
        None => "None",
    }
);

param_option!(
    /// Where the close sits inside the bar range.
    CloseLocation {
        InHighs => "In Highs",
        OffHighs => "Off Highs",
        InLows => "In Lows",
        OffLows => "Off Lows",
        /// Carried by presets; the detector applies no close filter for it.
        InMiddle => "In Middle",
        None => "None",
    }
);

param_option!(
    /// Which macro extreme the bar must print at.
    MacroExtreme {
        MacroLow => "Macro Low",
        MacroHigh => "Macro High",
        None => "None",
    }
);

param_option!(
    /// How short/medium/long macro windows are combined.
    MacroMethod {
        PriceBased => "Price Based (V1)",
        CountBased => "Count Based (V2)",
        /// Both V1 and V2 must agree.
        CombinedStrict => "Combined (Strict)",
        None => "None",
    }
);

/// One scalar in a preset map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(u32),
    Float(f64),
    Text(&'static str),
    Flag(bool),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<u32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'static str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(v) => Some(*v),
            _ => None,
        }
    }
}

/// Complete parameter set for one bar-pattern variant.
///
/// Every field is required when deserializing, so a partial preset can
/// never be constructed. The toggles `use_breakout_close`,
/// `use_arctangent_ratio` and `use_high_breakout` gate the fields that follow
/// them; those values are still carried when the toggle is off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    pub lookback: u32,
    pub direction_opt: Direction,
    pub bar_type_opt: BarType,
    pub spread_opt: SpreadLevel,
    pub spread_std: f64,
    pub spread_abnormal_std: f64,
    pub momentum_opt: MomentumLevel,
    pub momentum_std: f64,
    pub volume_opt: VolumeLevel,
    pub volume_std: f64,
    pub volume_abnormal_std: f64,
    pub close_opt: CloseLocation,

    pub macro_opt: MacroExtreme,
    pub macro_method: MacroMethod,

    // Price based (V1) macro windows
    pub v1_macro_short_lookback: u32,
    pub v1_macro_medium_lookback: u32,
    pub v1_macro_long_lookback: u32,
    pub v1_macro_percentile: f64,

    // Count based (V2) macro windows
    pub v2_macro_short_lookback: u32,
    pub v2_macro_medium_lookback: u32,
    pub v2_macro_long_lookback: u32,
    pub v2_macro_percentile: f64,

    pub use_breakout_close: bool,
    pub breakout_close_percent: f64,

    pub use_arctangent_ratio: bool,
    pub arctangent_ratio_threshold: f64,

    pub use_high_breakout: bool,
    pub high_breakout_lookback: u32,
    pub high_breakout_count_percent: f64,
}

impl Preset {
    /// Flat key -> value view, exactly `PARAM_KEYS`.
    pub fn to_map(&self) -> BTreeMap<&'static str, ParamValue> {
        use ParamValue::{Flag, Float, Int, Text};

        BTreeMap::from([
            ("lookback", Int(self.lookback)),
            ("direction_opt", Text(self.direction_opt.as_str())),
            ("bar_type_opt", Text(self.bar_type_opt.as_str())),
            ("spread_opt", Text(self.spread_opt.as_str())),
            ("spread_std", Float(self.spread_std)),
            ("spread_abnormal_std", Float(self.spread_abnormal_std)),
            ("momentum_opt", Text(self.momentum_opt.as_str())),
            ("momentum_std", Float(self.momentum_std)),
            ("volume_opt", Text(self.volume_opt.as_str())),
            ("volume_std", Float(self.volume_std)),
            ("volume_abnormal_std", Float(self.volume_abnormal_std)),
            ("close_opt", Text(self.close_opt.as_str())),
            ("macro_opt", Text(self.macro_opt.as_str())),
            ("macro_method", Text(self.macro_method.as_str())),
            ("v1_macro_short_lookback", Int(self.v1_macro_short_lookback)),
            ("v1_macro_medium_lookback", Int(self.v1_macro_medium_lookback)),
            ("v1_macro_long_lookback", Int(self.v1_macro_long_lookback)),
            ("v1_macro_percentile", Float(self.v1_macro_percentile)),
            ("v2_macro_short_lookback", Int(self.v2_macro_short_lookback)),
            ("v2_macro_medium_lookback", Int(self.v2_macro_medium_lookback)),
            ("v2_macro_long_lookback", Int(self.v2_macro_long_lookback)),
            ("v2_macro_percentile", Float(self.v2_macro_percentile)),
            ("use_breakout_close", Flag(self.use_breakout_close)),
            ("breakout_close_percent", Float(self.breakout_close_percent)),
            ("use_arctangent_ratio", Flag(self.use_arctangent_ratio)),
            ("arctangent_ratio_threshold", Float(self.arctangent_ratio_threshold)),
            ("use_high_breakout", Flag(self.use_high_breakout)),
            ("high_breakout_lookback", Int(self.high_breakout_lookback)),
            ("high_breakout_count_percent", Float(self.high_breakout_count_percent)),
        ])
    }

    /// Check every value against its domain. `name` is only used in the error.
    pub fn validate(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidPreset {
            name: name.to_string(),
            reason,
        };

        let lookbacks = [
            ("lookback", self.lookback),
            ("v1_macro_short_lookback", self.v1_macro_short_lookback),
            ("v1_macro_medium_lookback", self.v1_macro_medium_lookback),
            ("v1_macro_long_lookback", self.v1_macro_long_lookback),
            ("v2_macro_short_lookback", self.v2_macro_short_lookback),
            ("v2_macro_medium_lookback", self.v2_macro_medium_lookback),
            ("v2_macro_long_lookback", self.v2_macro_long_lookback),
            ("high_breakout_lookback", self.high_breakout_lookback),
        ];
        for (key, value) in lookbacks {
            if value == 0 {
                return Err(invalid(format!("{key} must be positive")));
            }
        }

        let multipliers = [
            ("spread_std", self.spread_std),
            ("spread_abnormal_std", self.spread_abnormal_std),
            ("momentum_std", self.momentum_std),
            ("volume_std", self.volume_std),
            ("volume_abnormal_std", self.volume_abnormal_std),
            ("arctangent_ratio_threshold", self.arctangent_ratio_threshold),
        ];
        for (key, value) in multipliers {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{key} must be a positive number, got {value}")));
            }
        }

        let percents = [
            ("v1_macro_percentile", self.v1_macro_percentile),
            ("v2_macro_percentile", self.v2_macro_percentile),
            ("breakout_close_percent", self.breakout_close_percent),
            ("high_breakout_count_percent", self.high_breakout_count_percent),
        ];
        for (key, value) in percents {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(format!("{key} must be within [0, 100], got {value}")));
            }
        }

        Ok(())
    }
}

/// Extra thresholds used only by the start-bar detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartBarParams {
    pub volume_lookback: u32,
    pub volume_percentile: f64,
    pub low_percentile: f64,
    pub range_percentile: f64,
    pub close_off_lows_percent: f64,
    pub prev_close_range: f64,
}

impl StartBarParams {
    pub fn validate(&self) -> Result<()> {
        if self.volume_lookback == 0 {
            return Err(Error::InvalidPreset {
                name: "start_bar".into(),
                reason: "volume_lookback must be positive".into(),
            });
        }
        let percents = [
            ("volume_percentile", self.volume_percentile),
            ("low_percentile", self.low_percentile),
            ("range_percentile", self.range_percentile),
            ("close_off_lows_percent", self.close_off_lows_percent),
            ("prev_close_range", self.prev_close_range),
        ];
        for (key, value) in percents {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidPreset {
                    name: "start_bar".into(),
                    reason: format!("{key} must be within [0, 100], got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Extra toggle used only by the loaded-bar detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadedBarParams {
    /// Close must land inside the previous bar's range (above its low).
    pub use_close_within_prev: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn map_keys_match_schema() {
        let map = presets::breakout_bar().to_map();
        let mut expected: Vec<&str> = PARAM_KEYS.to_vec();
        expected.sort_unstable();
        let keys: Vec<&str> = map.keys().copied().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn serialized_keys_match_schema() {
        let value = serde_json::to_value(presets::reversal_bar()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), PARAM_KEYS.len());
        for key in PARAM_KEYS {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn option_labels_serialize_verbatim() {
        assert_eq!(serde_json::to_value(CloseLocation::OffLows).unwrap(), "Off Lows");
        assert_eq!(serde_json::to_value(MacroMethod::CountBased).unwrap(), "Count Based (V2)");
        assert_eq!(
            serde_json::to_value(BarType::NewHighOrOutsideBar).unwrap(),
            "New High or Outside Bar"
        );
        assert_eq!(Direction::None.to_string(), "None");
    }

    #[test]
    fn map_values_carry_declared_types() {
        let map = presets::breakout_bar().to_map();
        assert_eq!(map["lookback"].as_int(), Some(7));
        assert_eq!(map["direction_opt"].as_text(), Some("Up"));
        assert_eq!(map["use_breakout_close"].as_flag(), Some(true));
        assert_eq!(map["v1_macro_percentile"].as_float(), Some(10.0));
        assert_eq!(map["lookback"].as_float(), None);
    }

    #[test]
    fn zero_lookback_is_invalid() {
        let preset = Preset {
            lookback: 0,
            ..presets::breakout_bar()
        };
        let err = preset.validate("custom").unwrap_err();
        assert!(err.to_string().contains("lookback"));
    }

    #[test]
    fn percentile_above_100_is_invalid() {
        let preset = Preset {
            v2_macro_percentile: 120.0,
            ..presets::reversal_bar()
        };
        assert!(preset.validate("custom").is_err());
    }

    #[test]
    fn macro_windows_need_not_be_ordered() {
        let preset = Preset {
            v2_macro_short_lookback: 5,
            v2_macro_medium_lookback: 21,
            v2_macro_long_lookback: 10,
            ..presets::breakout_bar()
        };
        preset.validate("custom").unwrap();
    }

    #[test]
    fn original_labels_deserialize() {
        let method: MacroMethod = serde_json::from_str("\"Combined (Strict)\"").unwrap();
        assert_eq!(method, MacroMethod::CombinedStrict);
        let close: CloseLocation = serde_json::from_str("\"In Middle\"").unwrap();
        assert_eq!(close, CloseLocation::InMiddle);
        assert_eq!(MacroMethod::ALL.len(), 4);
    }

    #[test]
    fn nan_multiplier_is_invalid() {
        let preset = Preset {
            volume_std: f64::NAN,
            ..presets::breakout_bar()
        };
        assert!(preset.validate("custom").is_err());
    }
}
