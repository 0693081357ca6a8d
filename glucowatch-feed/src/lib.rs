//! # glucowatch-feed
//!
//! HTTP client for Nightscout-style glucose feeds.
//!
//! The client takes a configured base URL, rewrites it into a single-entry
//! request against the feed's entries endpoint, and classifies the outcome
//! into a small error taxonomy the poller can act on.
//!
//! ## Example
//!
//! ```rust,no_run
//! use glucowatch_feed::FeedClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::builder().build();
//!
//!     let reading = client
//!         .fetch_latest("https://cgm.example.com/site?token=abc")
//!         .await?;
//!
//!     println!("{} mg/dL {}", reading.glucose_mgdl, reading.direction.glyph());
//!     Ok(())
//! }
//! ```

mod error;
mod nightscout;

pub use error::FeedError;
pub use nightscout::{FeedClient, FeedClientBuilder};
