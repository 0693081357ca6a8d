//! Readings and trend codes - one glucose observation from the feed.

/// A single glucose observation fetched from the feed.
///
/// Immutable once parsed from a feed response. All fields are guaranteed
/// present: the feed client signals no-data instead of constructing a
/// partial reading.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Glucose value in mg/dL.
    pub glucose_mgdl: f64,
    /// Directional trend of the glucose change rate.
    pub direction: TrendCode,
    /// Change since the previous reading, in mg/dL.
    pub delta_mgdl: f64,
    /// Observation time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl Reading {
    /// Seconds elapsed between this reading and `now_ms`, rounded toward
    /// negative infinity.
    ///
    /// Negative when the reading is timestamped in the future (clock skew).
    pub fn elapsed_secs(&self, now_ms: i64) -> i64 {
        (now_ms - self.timestamp_ms).div_euclid(1000)
    }
}

/// Directional trend indicator of glucose change rate.
///
/// The feed reports trends as strings; [`TrendCode::from_name`] maps them
/// into this closed enum, with unrecognized names becoming
/// [`TrendCode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrendCode {
    DoubleDown,
    DoubleUp,
    SingleDown,
    SingleUp,
    FortyFiveDown,
    FortyFiveUp,
    Flat,
    TripleDown,
    TripleUp,
    /// Trend reported by the feed but not recognized.
    Unknown,
}

impl TrendCode {
    /// All trend codes, in declaration order.
    pub const ALL: [TrendCode; 10] = [
        TrendCode::DoubleDown,
        TrendCode::DoubleUp,
        TrendCode::SingleDown,
        TrendCode::SingleUp,
        TrendCode::FortyFiveDown,
        TrendCode::FortyFiveUp,
        TrendCode::Flat,
        TrendCode::TripleDown,
        TrendCode::TripleUp,
        TrendCode::Unknown,
    ];

    /// Parse a feed direction string.
    pub fn from_name(name: &str) -> Self {
        match name {
            "DoubleDown" => TrendCode::DoubleDown,
            "DoubleUp" => TrendCode::DoubleUp,
            "SingleDown" => TrendCode::SingleDown,
            "SingleUp" => TrendCode::SingleUp,
            "FortyFiveDown" => TrendCode::FortyFiveDown,
            "FortyFiveUp" => TrendCode::FortyFiveUp,
            "Flat" => TrendCode::Flat,
            "TripleDown" => TrendCode::TripleDown,
            "TripleUp" => TrendCode::TripleUp,
            _ => TrendCode::Unknown,
        }
    }

    /// Returns the arrow glyph for this trend.
    ///
    /// Total mapping; [`TrendCode::Unknown`] yields the empty string.
    pub fn glyph(&self) -> &'static str {
        match self {
            TrendCode::DoubleDown | TrendCode::TripleDown => "⇊",
            TrendCode::DoubleUp | TrendCode::TripleUp => "⇈",
            TrendCode::SingleDown => "↓",
            TrendCode::SingleUp => "↑",
            TrendCode::FortyFiveDown => "↘",
            TrendCode::FortyFiveUp => "↗",
            TrendCode::Flat => "→",
            TrendCode::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_trend_has_a_glyph() {
        for code in TrendCode::ALL {
            if code == TrendCode::Unknown {
                assert_eq!(code.glyph(), "");
            } else {
                assert!(!code.glyph().is_empty(), "{:?} has no glyph", code);
            }
        }
    }

    #[test]
    fn glyph_table() {
        assert_eq!(TrendCode::DoubleDown.glyph(), "⇊");
        assert_eq!(TrendCode::TripleDown.glyph(), "⇊");
        assert_eq!(TrendCode::DoubleUp.glyph(), "⇈");
        assert_eq!(TrendCode::TripleUp.glyph(), "⇈");
        assert_eq!(TrendCode::Flat.glyph(), "→");
        assert_eq!(TrendCode::FortyFiveDown.glyph(), "↘");
        assert_eq!(TrendCode::FortyFiveUp.glyph(), "↗");
        assert_eq!(TrendCode::SingleDown.glyph(), "↓");
        assert_eq!(TrendCode::SingleUp.glyph(), "↑");
    }

    #[test]
    fn from_name_round_trips_known_codes() {
        assert_eq!(TrendCode::from_name("Flat"), TrendCode::Flat);
        assert_eq!(TrendCode::from_name("DoubleDown"), TrendCode::DoubleDown);
        assert_eq!(TrendCode::from_name("FortyFiveUp"), TrendCode::FortyFiveUp);
    }

    #[test]
    fn from_name_unrecognized_is_unknown() {
        assert_eq!(TrendCode::from_name("NOT COMPUTABLE"), TrendCode::Unknown);
        assert_eq!(TrendCode::from_name(""), TrendCode::Unknown);
        assert_eq!(TrendCode::from_name("flat"), TrendCode::Unknown);
    }

    #[test]
    fn elapsed_secs_floors_toward_negative_infinity() {
        let reading = Reading {
            glucose_mgdl: 100.0,
            direction: TrendCode::Flat,
            delta_mgdl: 0.0,
            timestamp_ms: 10_000,
        };
        assert_eq!(reading.elapsed_secs(710_500), 700);
        assert_eq!(reading.elapsed_secs(10_999), 0);
        // Reading from the future: negative, never "stale"
        assert_eq!(reading.elapsed_secs(9_001), -1);
    }
}
