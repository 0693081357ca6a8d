//! Poll configuration - the externally supplied settings read each cycle.

use crate::Unit;

/// Configuration consumed by the poller on every cycle.
///
/// Supplied by an external settings store; any change triggers an immediate
/// re-poll. The URL is kept opaque here - the feed client rewrites it into
/// an entries request, preserving whatever query string it carries.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollConfig {
    /// Base URL of the glucose feed.
    pub url: String,
    /// Unit used to render values.
    pub unit: Unit,
    /// Whether polling is switched on.
    pub active: bool,
}
