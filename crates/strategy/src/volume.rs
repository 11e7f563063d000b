use common::Timeframe;

/// Minimum USD volume used when a timeframe has no dedicated threshold.
pub const FALLBACK_MIN_VOLUME_USD: f64 = 50_000.0;

/// Minimum traded volume (USD) a pair needs before the scanner looks at it.
pub fn min_volume_usd(timeframe: Timeframe) -> f64 {
    match timeframe {
        Timeframe::OneWeek => 500_000.0,
        Timeframe::FourDays => 300_000.0,
        Timeframe::ThreeDays => 200_000.0,
        Timeframe::TwoDays => 150_000.0,
        Timeframe::OneDay => 75_000.0,
        Timeframe::FourHours => 40_000.0,
    }
}

/// Same as [`min_volume_usd`] for a raw timeframe label; unknown labels get
/// [`FALLBACK_MIN_VOLUME_USD`].
pub fn min_volume_usd_for(label: &str) -> f64 {
    label
        .parse::<Timeframe>()
        .map(min_volume_usd)
        .unwrap_or(FALLBACK_MIN_VOLUME_USD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_timeframes_have_thresholds() {
        assert_eq!(min_volume_usd_for("1w"), 500_000.0);
        assert_eq!(min_volume_usd_for("1d"), 75_000.0);
        assert_eq!(min_volume_usd_for("4h"), 40_000.0);
    }

    #[test]
    fn unknown_timeframe_falls_back() {
        assert_eq!(min_volume_usd_for("15m"), FALLBACK_MIN_VOLUME_USD);
        assert_eq!(min_volume_usd_for(""), FALLBACK_MIN_VOLUME_USD);
    }

    #[test]
    fn longer_timeframes_need_more_volume() {
        let mut previous = 0.0;
        for tf in Timeframe::ALL {
            let threshold = min_volume_usd(tf);
            assert!(threshold > previous, "{tf} threshold not increasing");
            previous = threshold;
        }
    }
}
