use serde::{Deserialize, Serialize};

use crate::Error;

/// Candle timeframe the scanner runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "2d")]
    TwoDays,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "4d")]
    FourDays,
    #[serde(rename = "1w")]
    OneWeek,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::FourHours,
        Timeframe::OneDay,
        Timeframe::TwoDays,
        Timeframe::ThreeDays,
        Timeframe::FourDays,
        Timeframe::OneWeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::FourHours => "4h",
            Timeframe::OneDay => "1d",
            Timeframe::TwoDays => "2d",
            Timeframe::ThreeDays => "3d",
            Timeframe::FourDays => "4d",
            Timeframe::OneWeek => "1w",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| Error::Config(format!("unknown timeframe '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeframe_parses_its_own_display() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn unknown_timeframe_is_rejected() {
        assert!("15m".parse::<Timeframe>().is_err());
    }
}
