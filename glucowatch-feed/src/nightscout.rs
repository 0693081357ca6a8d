//! Nightscout feed client.
//!
//! Fetches the most recent entry from a feed's entries endpoint. The
//! configured base URL may point anywhere inside the site and carry an
//! access token in its query string; the client rewrites the path and
//! prepends `count=1` so exactly one entry is requested regardless of
//! caller-supplied query noise.
//!
//! The client never retries: the poll interval is the retry mechanism.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use glucowatch_types::{Reading, TrendCode};

use crate::FeedError;

/// Path of the entries endpoint, substituted for whatever path the
/// configured URL carries.
const ENTRIES_PATH: &str = "/api/v1/entries.json";

/// Client for fetching the latest reading from a glucose feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::default()
    }

    /// Fetch the most recent reading from the feed at `base_url`.
    ///
    /// The base URL is re-read on every call, so configuration changes take
    /// effect without rebuilding the client.
    pub async fn fetch_latest(&self, base_url: &str) -> Result<Reading, FeedError> {
        let url = entries_url(base_url)?;

        let response = self.client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(FeedError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(FeedError::ConnectionFailed(format!(
                "feed returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_latest(&body)
    }
}

/// Rewrite the configured base URL into a single-entry request.
///
/// Scheme, userinfo, host, port and fragment are preserved verbatim; the
/// path becomes [`ENTRIES_PATH`] and the query becomes `count=1` followed
/// by the original query, if any.
fn entries_url(base: &str) -> Result<Url, FeedError> {
    let mut url = Url::parse(base)
        .map_err(|e| FeedError::ConnectionFailed(format!("invalid feed url: {e}")))?;

    let query = match url.query() {
        Some(q) if !q.is_empty() => format!("count=1&{q}"),
        _ => String::from("count=1"),
    };

    url.set_path(ENTRIES_PATH);
    url.set_query(Some(&query));

    Ok(url)
}

/// Parse a response body into the newest reading.
fn parse_latest(body: &str) -> Result<Reading, FeedError> {
    let entries: Vec<Entry> =
        serde_json::from_str(body).map_err(|e| FeedError::MalformedResponse(e.to_string()))?;

    entries
        .into_iter()
        .next()
        .and_then(Entry::into_reading)
        .ok_or(FeedError::NoData)
}

/// Builder for [`FeedClient`].
#[derive(Debug, Default)]
pub struct FeedClientBuilder {
    timeout: Option<Duration>,
}

impl FeedClientBuilder {
    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> FeedClient {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        FeedClient { client }
    }
}

/// One entry from the feed's entries endpoint.
///
/// Every field is optional at the wire level; an entry missing any of them
/// never becomes a [`Reading`].
#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    sgv: Option<f64>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    delta: Option<f64>,
    #[serde(default)]
    date: Option<i64>,
}

impl Entry {
    fn into_reading(self) -> Option<Reading> {
        Some(Reading {
            glucose_mgdl: self.sgv?,
            direction: TrendCode::from_name(self.direction.as_deref()?),
            delta_mgdl: self.delta?,
            timestamp_ms: self.date?,
        })
    }
}
