//! Display state - the derived text/style the presentation layer shows.

/// Style classification for the status display.
///
/// Recomputed on every cycle; the presentation layer maps each class to its
/// own visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleClass {
    /// Reading is current and in range.
    Fresh,
    /// Reading is older than the staleness window.
    Expired,
    /// Glucose below the low threshold.
    Low,
    /// Glucose above the high threshold.
    High,
    /// No cycle has completed yet.
    Loading,
    /// The feed returned nothing usable.
    NoData,
    /// Polling is switched off.
    Disabled,
}

impl StyleClass {
    /// CSS-style class name for presentation layers keyed on strings.
    pub fn css_class(&self) -> &'static str {
        match self {
            StyleClass::Fresh => "fresh-data",
            StyleClass::Expired => "expired-data",
            StyleClass::Low => "low-glucose",
            StyleClass::High => "high-glucose",
            StyleClass::Loading => "loading",
            StyleClass::NoData => "no-data",
            StyleClass::Disabled => "disabled",
        }
    }
}

/// The derived output of one poll cycle: what to show and how to style it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayState {
    /// Text to render, e.g. `"85 →"`.
    pub text: String,
    /// Style classification.
    pub style: StyleClass,
}

impl DisplayState {
    /// Create a display state.
    pub fn new(text: impl Into<String>, style: StyleClass) -> Self {
        Self { text: text.into(), style }
    }

    /// The state shown before the first cycle completes.
    pub fn loading() -> Self {
        Self::new("Loading...", StyleClass::Loading)
    }

    /// The state shown when the feed yields no usable entry.
    pub fn no_data() -> Self {
        Self::new("No Data", StyleClass::NoData)
    }

    /// The state shown while polling is switched off.
    pub fn disabled() -> Self {
        Self::new("Disabled", StyleClass::Disabled)
    }
}
