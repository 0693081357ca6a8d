//! Threshold evaluation and rate-limited alerting.

use glucowatch_types::{
    AlertCondition, AlertEvent, DisplayState, Reading, StyleClass, Thresholds, Unit,
};

use super::SuppressionState;

/// The outcome of evaluating one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// What the presentation layer should show.
    pub display: DisplayState,
    /// Alerts that fired this cycle, in evaluation order.
    pub alerts: Vec<AlertEvent>,
}

/// Evaluates readings against thresholds and suppresses repeat alerts.
///
/// The engine owns the per-condition [`SuppressionState`]; it is mutated
/// only from within [`AlertEngine::evaluate`], which the poller calls from
/// a single task.
#[derive(Debug)]
pub struct AlertEngine {
    thresholds: Thresholds,
    suppression: SuppressionState,
}

impl AlertEngine {
    /// Create an engine with empty suppression state.
    pub fn new(thresholds: Thresholds) -> Self {
        Self::with_suppression(thresholds, SuppressionState::new())
    }

    /// Create an engine with pre-seeded suppression state.
    pub fn with_suppression(thresholds: Thresholds, suppression: SuppressionState) -> Self {
        Self { thresholds, suppression }
    }

    /// The current suppression state.
    pub fn suppression(&self) -> &SuppressionState {
        &self.suppression
    }

    /// Evaluate one reading at wall-clock time `now_ms`.
    ///
    /// All five conditions are checked each cycle. Staleness sets the base
    /// style; low/high overwrite it; rising/falling only raise alerts.
    pub fn evaluate(&mut self, reading: &Reading, unit: Unit, now_ms: i64) -> Evaluation {
        let glucose = unit.display_glucose(reading.glucose_mgdl);
        let delta = unit.display_delta(reading.delta_mgdl);
        let text = format!("{} {}", glucose, reading.direction.glyph());

        let mut alerts = Vec::new();

        let elapsed_secs = reading.elapsed_secs(now_ms);
        let mut style = if elapsed_secs >= self.thresholds.stale_after.as_secs() as i64 {
            if self.try_fire(AlertCondition::Missing, now_ms) {
                alerts.push(AlertEvent::new(
                    AlertCondition::Missing,
                    "Missing readings",
                    format!(
                        "There have been no new readings since {} minutes ago",
                        elapsed_secs / 60
                    ),
                ));
            }
            StyleClass::Expired
        } else {
            StyleClass::Fresh
        };

        if reading.glucose_mgdl < self.thresholds.low {
            style = StyleClass::Low;
            if self.try_fire(AlertCondition::Low, now_ms) {
                alerts.push(AlertEvent::new(
                    AlertCondition::Low,
                    "Blood glucose is low!",
                    format!("Your glucose is now {} {}", glucose, unit),
                ));
            }
        } else if reading.glucose_mgdl > self.thresholds.high {
            style = StyleClass::High;
            if self.try_fire(AlertCondition::High, now_ms) {
                alerts.push(AlertEvent::new(
                    AlertCondition::High,
                    "Blood glucose is high!",
                    format!("Your glucose is now {} {}", glucose, unit),
                ));
            }
        }

        if reading.delta_mgdl >= self.thresholds.delta_up {
            if self.try_fire(AlertCondition::RisingFast, now_ms) {
                alerts.push(AlertEvent::new(
                    AlertCondition::RisingFast,
                    "Blood glucose rising quickly",
                    format!("Your glucose has risen {} {} since the last reading", delta, unit),
                ));
            }
        } else if reading.delta_mgdl <= self.thresholds.delta_down
            && self.try_fire(AlertCondition::FallingFast, now_ms)
        {
            alerts.push(AlertEvent::new(
                AlertCondition::FallingFast,
                "Blood glucose falling quickly",
                format!("Your glucose has fallen {} {} since the last reading", delta, unit),
            ));
        }

        Evaluation {
            display: DisplayState::new(text, style),
            alerts,
        }
    }

    /// Apply the cooldown rule for one condition, recording the firing if
    /// it goes through.
    fn try_fire(&mut self, condition: AlertCondition, now_ms: i64) -> bool {
        let cooldown_ms = self.thresholds.alert_cooldown.as_millis() as i64;
        let fire = match self.suppression.last_fired(condition) {
            None => true,
            Some(last) => now_ms - last > cooldown_ms,
        };
        if fire {
            self.suppression.record_fired(condition, now_ms);
        }
        fire
    }
}
