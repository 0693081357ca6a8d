//! Per-condition alert suppression state.

use glucowatch_types::AlertCondition;

/// Last-fired timestamps for each alert condition.
///
/// Owned by the alert engine and mutated only when an alert of the matching
/// condition fires. Never reset except at process start, when every slot is
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionState {
    last_fired: [Option<i64>; AlertCondition::ALL.len()],
}

impl Default for SuppressionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SuppressionState {
    /// Create a state with no recorded firings.
    pub fn new() -> Self {
        Self {
            last_fired: [None; AlertCondition::ALL.len()],
        }
    }

    /// Seed a prior firing, for constructing test scenarios.
    pub fn with_last_fired(mut self, condition: AlertCondition, timestamp_ms: i64) -> Self {
        self.last_fired[index(condition)] = Some(timestamp_ms);
        self
    }

    /// When the given condition last fired, if ever.
    pub fn last_fired(&self, condition: AlertCondition) -> Option<i64> {
        self.last_fired[index(condition)]
    }

    /// Record a firing of the given condition.
    pub fn record_fired(&mut self, condition: AlertCondition, timestamp_ms: i64) {
        self.last_fired[index(condition)] = Some(timestamp_ms);
    }
}

fn index(condition: AlertCondition) -> usize {
    AlertCondition::ALL
        .iter()
        .position(|c| *c == condition)
        .expect("AlertCondition::ALL covers every condition")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_slot_empty() {
        let state = SuppressionState::new();
        for condition in AlertCondition::ALL {
            assert_eq!(state.last_fired(condition), None);
        }
    }

    #[test]
    fn records_per_condition() {
        let mut state = SuppressionState::new();
        state.record_fired(AlertCondition::Low, 1_000);
        state.record_fired(AlertCondition::Missing, 2_000);

        assert_eq!(state.last_fired(AlertCondition::Low), Some(1_000));
        assert_eq!(state.last_fired(AlertCondition::Missing), Some(2_000));
        assert_eq!(state.last_fired(AlertCondition::High), None);
    }

    #[test]
    fn seeded_state_for_tests() {
        let state = SuppressionState::new()
            .with_last_fired(AlertCondition::RisingFast, 42)
            .with_last_fired(AlertCondition::FallingFast, 43);

        assert_eq!(state.last_fired(AlertCondition::RisingFast), Some(42));
        assert_eq!(state.last_fired(AlertCondition::FallingFast), Some(43));
    }
}
