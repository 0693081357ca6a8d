//! The poll loop - drives the feed client and alert engine on an interval.
//!
//! One cycle fetches the latest reading, evaluates it, publishes the
//! resulting [`DisplayState`] over a watch channel and hands alert events
//! to the configured [`NotificationSink`]. Cycles run on a fixed interval
//! and immediately after any configuration change.
//!
//! Exactly one fetch is ever in flight. A configuration change observed
//! mid-fetch supersedes the cycle: the in-flight request is dropped (its
//! result discarded) and a fresh cycle starts against the new
//! configuration. Interval ticks that land mid-cycle are delayed, never
//! stacked.

use std::ops::ControlFlow;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use glucowatch_feed::FeedError;
use glucowatch_types::{ActionHint, AlertEvent, DisplayState, PollConfig, Reading, Thresholds};

use crate::engine::AlertEngine;
use crate::sink::{LogSink, NotificationSink};
use crate::source::FeedSource;

/// Default poll interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Title used for feed-level (untracked) alerts.
const FEED_ALERT_TITLE: &str = "Glucose feed";

/// The polling engine, ready to be started.
pub struct Poller {
    feed: Box<dyn FeedSource>,
    engine: AlertEngine,
    config_rx: watch::Receiver<PollConfig>,
    display_tx: watch::Sender<DisplayState>,
    sink: Box<dyn NotificationSink>,
    interval: Duration,
}

impl Poller {
    /// Create a builder from the two required collaborators: a feed source
    /// and a configuration subscription.
    pub fn builder(feed: Box<dyn FeedSource>, config: watch::Receiver<PollConfig>) -> PollerBuilder {
        PollerBuilder {
            feed,
            config,
            sink: None,
            thresholds: Thresholds::default(),
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Start polling in a background task.
    pub fn start(self) -> PollerHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let display_rx = self.display_tx.subscribe();
        let task = tokio::spawn(self.run(stop_rx));

        PollerHandle {
            stop_tx,
            display_rx,
            task,
        }
    }

    async fn run(mut self, mut stop_rx: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Once the configuration channel closes, keep polling on the
        // interval with the last known configuration.
        let mut config_open = true;

        debug!(source = self.feed.description(), "poller started");

        loop {
            tokio::select! {
                biased;

                changed = stop_rx.changed() => {
                    // A dropped handle counts as a stop request
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                }

                changed = self.config_rx.changed(), if config_open => {
                    if changed.is_err() {
                        config_open = false;
                        continue;
                    }
                    debug!("configuration changed, polling now");
                    if self.cycle(&mut stop_rx, &mut config_open).await.is_break() {
                        break;
                    }
                }

                _ = ticker.tick() => {
                    if self.cycle(&mut stop_rx, &mut config_open).await.is_break() {
                        break;
                    }
                }
            }
        }

        debug!("poller stopped");
    }

    /// Run one poll cycle, restarting it if the configuration changes while
    /// the fetch is in flight.
    async fn cycle(
        &mut self,
        stop_rx: &mut watch::Receiver<bool>,
        config_open: &mut bool,
    ) -> ControlFlow<()> {
        loop {
            // Configuration is read fresh on every cycle
            let config = self.config_rx.borrow_and_update().clone();

            if !config.active {
                debug!("polling disabled");
                self.publish(DisplayState::disabled());
                return ControlFlow::Continue(());
            }

            let outcome = {
                let mut fetch = self.feed.fetch_latest(&config.url);

                tokio::select! {
                    biased;

                    _ = stop_rx.changed() => FetchOutcome::Stopped,

                    changed = self.config_rx.changed(), if *config_open => {
                        if changed.is_err() {
                            *config_open = false;
                        } else {
                            debug!("configuration changed mid-fetch, discarding in-flight request");
                        }
                        FetchOutcome::Superseded
                    }

                    result = &mut fetch => FetchOutcome::Settled(result),
                }
            };

            match outcome {
                FetchOutcome::Settled(result) => {
                    self.settle(result, &config).await;
                    return ControlFlow::Continue(());
                }
                FetchOutcome::Superseded => continue,
                FetchOutcome::Stopped => return ControlFlow::Break(()),
            }
        }
    }

    /// Turn one fetch result into display state and alerts.
    async fn settle(&mut self, result: Result<Reading, FeedError>, config: &PollConfig) {
        match result {
            Ok(reading) => {
                let evaluation = self.engine.evaluate(&reading, config.unit, now_ms());
                debug!(
                    text = %evaluation.display.text,
                    style = ?evaluation.display.style,
                    alerts = evaluation.alerts.len(),
                    "cycle complete"
                );
                self.publish(evaluation.display);
                for alert in &evaluation.alerts {
                    self.sink.notify(alert).await;
                }
            }
            Err(FeedError::NoData) => {
                self.publish(DisplayState::no_data());
            }
            Err(FeedError::MalformedResponse(detail)) => {
                // Logged and shown as plain no-data, never as an error state
                warn!(%detail, "discarding malformed feed response");
                self.publish(DisplayState::no_data());
            }
            Err(FeedError::Unauthorized) => {
                let alert = AlertEvent::untracked(
                    FEED_ALERT_TITLE,
                    "Unable to retrieve data: authorization failed",
                )
                .with_action(ActionHint::OpenSettings);
                self.sink.notify(&alert).await;
            }
            Err(FeedError::ConnectionFailed(detail)) => {
                warn!(%detail, "feed fetch failed");
                let alert = AlertEvent::untracked(
                    FEED_ALERT_TITLE,
                    "Unable to retrieve data: please check your internet connection",
                );
                self.sink.notify(&alert).await;
            }
        }
    }

    fn publish(&self, display: DisplayState) {
        let _ = self.display_tx.send(display);
    }
}

enum FetchOutcome {
    Settled(Result<Reading, FeedError>),
    Superseded,
    Stopped,
}

/// Builder for configuring a [`Poller`].
pub struct PollerBuilder {
    feed: Box<dyn FeedSource>,
    config: watch::Receiver<PollConfig>,
    sink: Option<Box<dyn NotificationSink>>,
    thresholds: Thresholds,
    interval: Duration,
}

impl PollerBuilder {
    /// Set the notification sink (default: [`LogSink`]).
    pub fn sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the alerting thresholds (default: [`Thresholds::default`]).
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the poll interval (default: 60 seconds).
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Build the poller.
    pub fn build(self) -> Poller {
        let (display_tx, _) = watch::channel(DisplayState::loading());
        Poller {
            feed: self.feed,
            engine: AlertEngine::new(self.thresholds),
            config_rx: self.config,
            display_tx,
            sink: self.sink.unwrap_or_else(|| Box::new(LogSink)),
            interval: self.interval,
        }
    }
}

/// Handle for observing and stopping a running poller.
pub struct PollerHandle {
    stop_tx: watch::Sender<bool>,
    display_rx: watch::Receiver<DisplayState>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Subscribe to display-state updates.
    ///
    /// The receiver starts at the current state (`Loading...` until the
    /// first cycle completes).
    pub fn display(&self) -> watch::Receiver<DisplayState> {
        self.display_rx.clone()
    }

    /// Stop polling and wait for the task to finish.
    ///
    /// Any in-flight fetch is abandoned and its result discarded.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        let _ = self.task.await;
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
