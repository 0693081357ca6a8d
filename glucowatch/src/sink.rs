//! Notification sinks - where alert events go.
//!
//! The presentation layer supplies a sink that renders events as
//! user-visible notifications. A logging sink is the default; a
//! channel-backed sink is provided for embedders and tests.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use glucowatch_types::AlertEvent;

/// Renders alert events as user-visible notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one alert event.
    async fn notify(&self, event: &AlertEvent);
}

/// Sink that emits alerts through `tracing`.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, event: &AlertEvent) {
        let condition = event.condition.map(|c| c.label()).unwrap_or("untracked");
        info!(condition, title = %event.title, "{}", event.body);
    }
}

/// Sink that forwards alerts through an mpsc channel.
///
/// Sends are best effort: if the receiver lags and the buffer fills, the
/// event is dropped rather than stalling the poll cycle.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::Sender<AlertEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver for its events.
    pub fn create(buffer: usize) -> (Self, mpsc::Receiver<AlertEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn notify(&self, event: &AlertEvent) {
        let _ = self.tx.try_send(event.clone());
    }
}
