use proptest::prelude::*;
use strategy::{presets, BarPattern, Preset, PresetFileConfig, PresetRegistry, PARAM_KEYS};

proptest! {
    /// Validation on arbitrary numeric inputs must never panic.
    #[test]
    fn validate_never_panics(
        lookback in any::<u32>(),
        spread_std in any::<f64>(),
        percentile in any::<f64>(),
        close_percent in any::<f64>(),
    ) {
        let preset = Preset {
            lookback,
            spread_std,
            v1_macro_percentile: percentile,
            breakout_close_percent: close_percent,
            ..presets::breakout_bar()
        };
        let _ = preset.validate("fuzz");
    }

    /// Percentiles outside [0, 100] are always rejected.
    #[test]
    fn out_of_range_percentile_rejected(
        over in 100.0001f64..1e9,
        under in -1e9f64..-0.0001,
    ) {
        for value in [over, under] {
            let preset = Preset { v2_macro_percentile: value, ..presets::reversal_bar() };
            prop_assert!(preset.validate("fuzz").is_err());
        }
    }

    /// Any in-domain override registers and is returned unchanged.
    #[test]
    fn valid_override_is_registered(
        lookback in 1u32..500,
        percentile in 0.0f64..=100.0,
        threshold in 0.01f64..10.0,
    ) {
        let custom = Preset {
            lookback,
            v1_macro_percentile: percentile,
            arctangent_ratio_threshold: threshold,
            ..presets::breakout_bar()
        };
        let mut file = PresetFileConfig::default();
        file.presets.insert("breakout_bar".into(), custom);

        let registry = PresetRegistry::with_file(&file).unwrap();
        prop_assert_eq!(registry.get(BarPattern::BreakoutBar), custom);
        prop_assert_eq!(registry.get(BarPattern::BreakoutBar).to_map().len(), PARAM_KEYS.len());
    }
}
