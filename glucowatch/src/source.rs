//! Feed source abstraction.
//!
//! The poller depends on this trait rather than on a concrete HTTP client,
//! so tests can script readings and failures without a network.

use async_trait::async_trait;

use glucowatch_feed::{FeedClient, FeedError};
use glucowatch_types::Reading;

/// Source of the latest glucose reading.
///
/// Implementations must not retry internally; the poll interval is the
/// retry mechanism.
#[async_trait]
pub trait FeedSource: Send {
    /// Fetch the most recent reading from the feed at `base_url`.
    ///
    /// The URL is passed on every call because configuration is re-read
    /// each cycle.
    async fn fetch_latest(&self, base_url: &str) -> Result<Reading, FeedError>;

    /// Human-readable description of the source, for logging.
    fn description(&self) -> &str {
        "feed"
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_latest(&self, base_url: &str) -> Result<Reading, FeedError> {
        FeedClient::fetch_latest(self, base_url).await
    }

    fn description(&self) -> &str {
        "nightscout"
    }
}
