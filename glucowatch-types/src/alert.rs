//! Alert conditions and the events emitted to the notification sink.

/// A threshold condition that can raise an alert.
///
/// Each condition is rate-limited independently: the engine tracks the last
/// firing per condition and suppresses repeats within the cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertCondition {
    /// No new reading within the staleness window.
    Missing,
    /// Glucose below the low threshold.
    Low,
    /// Glucose above the high threshold.
    High,
    /// Delta at or above the rising threshold.
    RisingFast,
    /// Delta at or below the falling threshold.
    FallingFast,
}

impl AlertCondition {
    /// All conditions, in evaluation order.
    pub const ALL: [AlertCondition; 5] = [
        AlertCondition::Missing,
        AlertCondition::Low,
        AlertCondition::High,
        AlertCondition::RisingFast,
        AlertCondition::FallingFast,
    ];

    /// Short name for logging.
    pub fn label(&self) -> &'static str {
        match self {
            AlertCondition::Missing => "missing",
            AlertCondition::Low => "low",
            AlertCondition::High => "high",
            AlertCondition::RisingFast => "rising-fast",
            AlertCondition::FallingFast => "falling-fast",
        }
    }
}

/// Hint for an action the presentation layer may attach to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionHint {
    /// Open the configuration surface (bad URL or credentials).
    #[cfg_attr(feature = "serde", serde(rename = "open-settings"))]
    OpenSettings,
}

/// A user-visible alert produced by one poll cycle.
///
/// Events carrying a [`AlertCondition`] are subject to per-condition
/// cooldown suppression; untracked events (connectivity, authorization)
/// fire every cycle the problem persists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertEvent {
    /// The condition that fired, if this event is cooldown-tracked.
    pub condition: Option<AlertCondition>,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Optional action the sink may offer.
    pub action_hint: Option<ActionHint>,
}

impl AlertEvent {
    /// Create a cooldown-tracked alert for a condition.
    pub fn new(
        condition: AlertCondition,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            condition: Some(condition),
            title: title.into(),
            body: body.into(),
            action_hint: None,
        }
    }

    /// Create an alert outside cooldown tracking.
    pub fn untracked(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            condition: None,
            title: title.into(),
            body: body.into(),
            action_hint: None,
        }
    }

    /// Attach an action hint.
    pub fn with_action(mut self, hint: ActionHint) -> Self {
        self.action_hint = Some(hint);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_event_carries_condition() {
        let event = AlertEvent::new(AlertCondition::Low, "Low", "60 mg/dL");
        assert_eq!(event.condition, Some(AlertCondition::Low));
        assert!(event.action_hint.is_none());
    }

    #[test]
    fn untracked_event_has_no_condition() {
        let event = AlertEvent::untracked("Feed", "unreachable")
            .with_action(ActionHint::OpenSettings);
        assert_eq!(event.condition, None);
        assert_eq!(event.action_hint, Some(ActionHint::OpenSettings));
    }

    #[test]
    fn condition_labels_are_distinct() {
        let labels: std::collections::BTreeSet<_> =
            AlertCondition::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), AlertCondition::ALL.len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn action_hint_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ActionHint::OpenSettings).unwrap(),
            "\"open-settings\""
        );
    }
}
