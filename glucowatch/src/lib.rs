//! # glucowatch
//!
//! Polling and alerting engine for Nightscout-style glucose feeds.
//!
//! The engine fetches the latest reading on a fixed interval, derives a
//! display state from it, and raises threshold alerts with per-condition
//! cooldown suppression. Presentation (panel widgets, notification trays)
//! is left to the embedding host; this crate only emits display states and
//! alert events.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                         Poller                             │
//! │  ┌──────────┐     ┌──────────┐     ┌───────────────────┐   │
//! │  │  source  │────▶│  engine  │────▶│ DisplayState watch│   │
//! │  │ (fetch)  │     │ (alerts) │     │ NotificationSink  │   │
//! │  └────┬─────┘     └──────────┘     └───────────────────┘   │
//! │       │                 ▲                                  │
//! │       │                 │                                  │
//! │  ┌────┴─────┐     ┌─────┴─────┐                            │
//! │  │ interval │     │ settings  │◀── file + environment      │
//! │  │  timer   │     │  (watch)  │                            │
//! │  └──────────┘     └───────────┘                            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`FeedSource`] trait over the HTTP feed client
//! - **[`engine`]**: threshold evaluation and cooldown suppression
//! - **[`poller`]**: the cycle loop - one in-flight fetch, immediate
//!   re-poll on configuration changes, supersede semantics for stale
//!   results
//! - **[`settings`]**: settings file + environment, re-emitted as
//!   [`PollConfig`](glucowatch_types::PollConfig) changes
//! - **[`sink`]**: where alert events go
//!
//! ## Usage
//!
//! ```no_run
//! use glucowatch::{Poller, SettingsStore, LogSink};
//! use glucowatch_feed::FeedClient;
//!
//! # tokio_test::block_on(async {
//! let store = SettingsStore::load(None).unwrap();
//! let client = FeedClient::builder().build();
//!
//! let handle = Poller::builder(Box::new(client), store.config())
//!     .sink(Box::new(LogSink))
//!     .build()
//!     .start();
//!
//! let mut display = handle.display();
//! // ... render display states, stop on shutdown ...
//! handle.stop().await;
//! # });
//! ```

pub mod engine;
pub mod poller;
pub mod settings;
pub mod sink;
pub mod source;

// Re-export main types for convenience
pub use engine::{AlertEngine, Evaluation, SuppressionState};
pub use poller::{Poller, PollerBuilder, PollerHandle, DEFAULT_INTERVAL};
pub use settings::{Settings, SettingsStore};
pub use sink::{ChannelSink, LogSink, NotificationSink};
pub use source::FeedSource;
