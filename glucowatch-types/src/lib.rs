//! # glucowatch-types
//!
//! Core types for glucose feed monitoring. This crate defines the data model
//! shared by the feed client and the polling engine: readings, trend codes,
//! display units, thresholds and alert events.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the data model works without any
//!   serialization framework
//! - **Optional serialization**: enable the `serde` feature as needed
//! - **Closed enums**: trend codes, units, style classes and alert conditions
//!   are exhaustive, so downstream matches are checked at compile time
//! - **Pure conversions**: unit conversion and trend-glyph mapping are total
//!   functions with no error cases
//!
//! ## Example
//!
//! ```rust
//! use glucowatch_types::{Reading, TrendCode, Unit};
//!
//! let reading = Reading {
//!     glucose_mgdl: 85.0,
//!     direction: TrendCode::Flat,
//!     delta_mgdl: 2.0,
//!     timestamp_ms: 1703160000000,
//! };
//!
//! // 85 mg/dL renders as 4.7 in mmol/L (one decimal for glucose values)
//! let display = Unit::MmolPerL.display_glucose(reading.glucose_mgdl);
//! assert_eq!(display.to_string(), "4.7");
//! assert_eq!(reading.direction.glyph(), "→");
//! ```

mod alert;
mod config;
mod display;
mod reading;
mod thresholds;
mod unit;

pub use alert::*;
pub use config::*;
pub use display::*;
pub use reading::*;
pub use thresholds::*;
pub use unit::*;
