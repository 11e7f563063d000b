//! Built-in parameter presets, one per bar-pattern variant.

use crate::params::{
    BarType, CloseLocation, Direction, LoadedBarParams, MacroExtreme, MacroMethod, MomentumLevel,
    Preset, SpreadLevel, StartBarParams, VolumeLevel,
};

/// Wide, high-volume up bar closing off its lows near a macro low.
pub const BREAKOUT_BAR: Preset = Preset {
    lookback: 7,
    direction_opt: Direction::Up,
    bar_type_opt: BarType::None,
    spread_opt: SpreadLevel::Wide,
    spread_std: 0.5,
    spread_abnormal_std: 4.0,
    momentum_opt: MomentumLevel::Wide,
    momentum_std: 0.75,
    volume_opt: VolumeLevel::High,
    volume_std: 0.5,
    volume_abnormal_std: 3.0,
    close_opt: CloseLocation::OffLows,

    macro_opt: MacroExtreme::MacroLow,
    macro_method: MacroMethod::PriceBased,

    v1_macro_short_lookback: 7,
    v1_macro_medium_lookback: 23,
    v1_macro_long_lookback: 50,
    v1_macro_percentile: 10.0,

    v2_macro_short_lookback: 8,
    v2_macro_medium_lookback: 28,
    v2_macro_long_lookback: 48,
    v2_macro_percentile: 25.0,

    use_breakout_close: true,
    breakout_close_percent: 30.0,

    use_arctangent_ratio: false,
    arctangent_ratio_threshold: 1.0,

    use_high_breakout: true,
    high_breakout_lookback: 10,
    high_breakout_count_percent: 10.0,
};

/// Bar at the extreme highs that made a new high (or engulfed the previous
/// bar) and closed in its lows on wide spread and high volume. Direction and
/// momentum are ignored.
pub const REVERSAL_BAR: Preset = Preset {
    lookback: 14,
    direction_opt: Direction::None,
    bar_type_opt: BarType::NewHighOrOutsideBar,
    spread_opt: SpreadLevel::Wide,
    spread_std: 0.5,
    spread_abnormal_std: 4.0,
    momentum_opt: MomentumLevel::None,
    momentum_std: 0.5,
    volume_opt: VolumeLevel::High,
    volume_std: 0.5,
    volume_abnormal_std: 3.0,
    close_opt: CloseLocation::InLows,

    macro_opt: MacroExtreme::MacroHigh,
    macro_method: MacroMethod::CountBased,

    v1_macro_short_lookback: 14,
    v1_macro_medium_lookback: 34,
    v1_macro_long_lookback: 50,
    v1_macro_percentile: 5.0,

    v2_macro_short_lookback: 8,
    v2_macro_medium_lookback: 28,
    v2_macro_long_lookback: 48,
    v2_macro_percentile: 20.0,

    use_breakout_close: false,
    breakout_close_percent: 30.0,

    use_arctangent_ratio: false,
    arctangent_ratio_threshold: 1.0,

    use_high_breakout: false,
    high_breakout_lookback: 20,
    high_breakout_count_percent: 80.0,
};

/// Low-volume up bar making a new high near a macro high, closing in the
/// middle of its range. V1 and V2 macro checks must both agree.
pub const STOP_BAR: Preset = Preset {
    lookback: 14,
    direction_opt: Direction::Up,
    bar_type_opt: BarType::NewHigh,
    spread_opt: SpreadLevel::None,
    spread_std: 0.5,
    spread_abnormal_std: 3.0,
    momentum_opt: MomentumLevel::None,
    momentum_std: 0.5,
    volume_opt: VolumeLevel::Low,
    volume_std: 0.5,
    volume_abnormal_std: 3.0,
    close_opt: CloseLocation::InMiddle,

    macro_opt: MacroExtreme::MacroHigh,
    macro_method: MacroMethod::CombinedStrict,

    v1_macro_short_lookback: 5,
    v1_macro_medium_lookback: 21,
    v1_macro_long_lookback: 21,
    v1_macro_percentile: 10.0,

    v2_macro_short_lookback: 5,
    v2_macro_medium_lookback: 21,
    v2_macro_long_lookback: 10,
    v2_macro_percentile: 25.0,

    use_breakout_close: true,
    breakout_close_percent: 80.0,

    use_arctangent_ratio: false,
    arctangent_ratio_threshold: 1.0,

    use_high_breakout: false,
    high_breakout_lookback: 20,
    high_breakout_count_percent: 80.0,
};

/// High-volume bar at a macro low that undercut the previous low (or
/// engulfed it) and closed in its highs.
pub const LOADED_BAR: Preset = Preset {
    lookback: 23,
    direction_opt: Direction::None,
    bar_type_opt: BarType::NewLowOrOutsideBar,
    spread_opt: SpreadLevel::None,
    spread_std: 0.5,
    spread_abnormal_std: 4.0,
    momentum_opt: MomentumLevel::None,
    momentum_std: 0.5,
    volume_opt: VolumeLevel::High,
    volume_std: 1.5,
    volume_abnormal_std: 4.5,
    close_opt: CloseLocation::InHighs,

    macro_opt: MacroExtreme::MacroLow,
    macro_method: MacroMethod::CountBased,

    v1_macro_short_lookback: 7,
    v1_macro_medium_lookback: 23,
    v1_macro_long_lookback: 50,
    v1_macro_percentile: 10.0,

    v2_macro_short_lookback: 7,
    v2_macro_medium_lookback: 13,
    v2_macro_long_lookback: 23,
    v2_macro_percentile: 15.0,

    use_breakout_close: false,
    breakout_close_percent: 30.0,

    use_arctangent_ratio: false,
    arctangent_ratio_threshold: 1.0,

    use_high_breakout: false,
    high_breakout_lookback: 10,
    high_breakout_count_percent: 10.0,
};

pub const LOADED_BAR_EXTENSION: LoadedBarParams = LoadedBarParams {
    use_close_within_prev: true,
};

/// The start-bar detector runs on `START_BAR_EXTENSION`; every generic option
/// is switched off. Thresholds with no option driving them are inherited
/// from `BREAKOUT_BAR` so the preset stays complete.
pub const START_BAR: Preset = Preset {
    lookback: 5,
    direction_opt: Direction::None,
    bar_type_opt: BarType::None,
    spread_opt: SpreadLevel::None,
    momentum_opt: MomentumLevel::None,
    volume_opt: VolumeLevel::None,
    close_opt: CloseLocation::None,
    macro_opt: MacroExtreme::None,
    macro_method: MacroMethod::None,
    use_breakout_close: false,
    use_arctangent_ratio: false,
    arctangent_ratio_threshold: 1.0,
    use_high_breakout: true,
    high_breakout_lookback: 20,
    high_breakout_count_percent: 80.0,
    ..BREAKOUT_BAR
};

pub const START_BAR_EXTENSION: StartBarParams = StartBarParams {
    volume_lookback: 30,
    volume_percentile: 50.0,
    low_percentile: 75.0,
    range_percentile: 75.0,
    close_off_lows_percent: 50.0,
    prev_close_range: 75.0,
};

pub fn breakout_bar() -> Preset {
    BREAKOUT_BAR
}

pub fn reversal_bar() -> Preset {
    REVERSAL_BAR
}

pub fn stop_bar() -> Preset {
    STOP_BAR
}

pub fn loaded_bar() -> Preset {
    LOADED_BAR
}

pub fn loaded_bar_extension() -> LoadedBarParams {
    LOADED_BAR_EXTENSION
}

pub fn start_bar() -> Preset {
    START_BAR
}

pub fn start_bar_extension() -> StartBarParams {
    START_BAR_EXTENSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PARAM_KEYS;

    #[test]
    fn builtin_presets_are_valid() {
        breakout_bar().validate("breakout_bar").unwrap();
        reversal_bar().validate("reversal_bar").unwrap();
        start_bar().validate("start_bar").unwrap();
        stop_bar().validate("stop_bar").unwrap();
        loaded_bar().validate("loaded_bar").unwrap();
        start_bar_extension().validate().unwrap();
    }

    #[test]
    fn builtin_presets_are_complete() {
        for preset in [breakout_bar(), reversal_bar(), stop_bar(), loaded_bar(), start_bar()] {
            let map = preset.to_map();
            assert_eq!(map.len(), PARAM_KEYS.len());
            assert!(PARAM_KEYS.iter().all(|k| map.contains_key(k)));
        }
    }

    #[test]
    fn breakout_is_directional_and_reversal_is_not() {
        assert_eq!(breakout_bar().direction_opt, Direction::Up);
        assert_eq!(reversal_bar().direction_opt, Direction::None);
        assert_eq!(reversal_bar().close_opt, CloseLocation::InLows);
        assert_eq!(reversal_bar().macro_opt, MacroExtreme::MacroHigh);
    }

    #[test]
    fn start_bar_switches_off_every_option() {
        let p = start_bar();
        assert_eq!(p.lookback, 5);
        assert_eq!(p.spread_opt, SpreadLevel::None);
        assert_eq!(p.macro_method, MacroMethod::None);
        assert!(!p.use_breakout_close);
        assert!(p.use_high_breakout);
    }

    #[test]
    fn stop_bar_uses_combined_macro_and_middle_close() {
        let p = stop_bar();
        assert_eq!(p.macro_method, MacroMethod::CombinedStrict);
        assert_eq!(p.close_opt, CloseLocation::InMiddle);
        assert_eq!(p.volume_opt, VolumeLevel::Low);
        assert_eq!(
            (p.v2_macro_short_lookback, p.v2_macro_medium_lookback, p.v2_macro_long_lookback),
            (5, 21, 10)
        );
    }

    #[test]
    fn loaded_bar_closes_within_previous_range() {
        assert!(loaded_bar_extension().use_close_within_prev);
        assert_eq!(loaded_bar().close_opt, CloseLocation::InHighs);
        assert_eq!(loaded_bar().lookback, 23);
    }

    #[test]
    fn accessors_are_idempotent() {
        assert_eq!(breakout_bar(), breakout_bar());
        assert_eq!(reversal_bar().to_map(), reversal_bar().to_map());
    }
}
