//! Alerting thresholds.

use std::time::Duration;

/// Thresholds for display styling and alert evaluation.
///
/// Glucose and delta values are in mg/dL regardless of the configured
/// display unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Delta at or above which a rising-fast alert fires.
    pub delta_up: f64,
    /// Delta at or below which a falling-fast alert fires.
    pub delta_down: f64,
    /// Glucose value above which the high alert fires.
    pub high: f64,
    /// Glucose value below which the low alert fires.
    pub low: f64,
    /// Age at which a reading counts as stale.
    pub stale_after: Duration,
    /// Minimum time between repeated alerts of the same condition.
    pub alert_cooldown: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            delta_up: 20.0,
            delta_down: -20.0,
            high: 180.0,
            low: 80.0,
            stale_after: Duration::from_secs(600),
            alert_cooldown: Duration::from_secs(600),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Thresholds::default();
        assert_eq!(t.delta_up, 20.0);
        assert_eq!(t.delta_down, -20.0);
        assert_eq!(t.high, 180.0);
        assert_eq!(t.low, 80.0);
        assert_eq!(t.stale_after, Duration::from_secs(600));
        assert_eq!(t.alert_cooldown, Duration::from_secs(600));
    }
}
