//! Alert evaluation - thresholds, display styling and cooldown suppression.
//!
//! This module turns one [`Reading`](glucowatch_types::Reading) into the
//! display state and alert events for a cycle:
//!
//! ```text
//! Reading + Thresholds + now
//!        │
//!        ▼
//! AlertEngine::evaluate()
//!        │
//!        ├──▶ DisplayState (text + style class)
//!        │
//!        └──▶ AlertEvent* (gated by SuppressionState cooldowns)
//! ```
//!
//! Evaluation is pure and synchronous; the engine never touches the clock
//! or the network itself.

mod alerts;
mod suppression;

pub use alerts::{AlertEngine, Evaluation};
pub use suppression::SuppressionState;
