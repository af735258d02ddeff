//! Quote retrieval with bounded, linearly increasing retry.
//!
//! [`QuoteSource`] is the seam the polling loop fetches through.
//! [`VpsQuoteSource`] is the HTTP implementation; its retry behaviour lives
//! in [`fetch_with_retry`] so it can be exercised without a network.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::Result;
use crate::models::{QuoteRecord, QuoteSnapshot};

/// Anything that can produce the latest snapshot for a symbol.
pub trait QuoteSource: Send + Sync {
    /// Fetches one symbol's snapshot, retrying internally as needed.
    ///
    /// # Errors
    ///
    /// Returns [`LimitwatchError::FetchUnavailable`](crate::LimitwatchError::FetchUnavailable)
    /// once retries are exhausted.
    fn fetch_quote(&self, symbol: &str) -> impl Future<Output = Result<QuoteSnapshot>> + Send;
}

/// How many times to try a fetch and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Attempt `n` failing waits `base_delay * n` before attempt `n + 1`.
    pub base_delay: Duration,
    /// Upper bound on a single attempt, including reading the body.
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(2),
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Runs `attempt` until it yields a snapshot or the policy is exhausted.
///
/// An attempt fails when it errors, returns `Ok(None)` (empty record list),
/// or exceeds `attempt_timeout`. No delay follows the final attempt.
///
/// # Errors
///
/// Returns [`LimitwatchError::FetchUnavailable`](crate::LimitwatchError::FetchUnavailable)
/// when every attempt failed.
pub async fn fetch_with_retry<F, Fut>(
    symbol: &str,
    policy: &RetryPolicy,
    mut attempt: F,
) -> Result<QuoteSnapshot>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<QuoteSnapshot>>>,
{
    for n in 1..=policy.max_attempts {
        match tokio::time::timeout(policy.attempt_timeout, attempt()).await {
            Ok(Ok(Some(snapshot))) => {
                debug!(%symbol, attempt = n, "Fetched quote");
                return Ok(snapshot);
            }
            Ok(Ok(None)) => warn!(%symbol, attempt = n, "Quote source returned no records"),
            Ok(Err(e)) => warn!(%symbol, attempt = n, "Quote fetch failed: {e}"),
            Err(_) => warn!(%symbol, attempt = n, "Quote fetch timed out"),
        }

        if n < policy.max_attempts {
            let delay = policy.delay_for(n);
            debug!(%symbol, delay_ms = delay.as_millis() as u64, "Backing off before retry");
            tokio::time::sleep(delay).await;
        }
    }

    Err(crate::LimitwatchError::FetchUnavailable {
        symbol: symbol.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Fetches quotes from the `getliststockdata` REST endpoint.
#[derive(Debug, Clone)]
pub struct VpsQuoteSource {
    client: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
}

impl VpsQuoteSource {
    /// Creates a source rooted at `base_url` (scheme and host, no path).
    ///
    /// # Errors
    ///
    /// Returns [`LimitwatchError::Http`](crate::LimitwatchError::Http) if the
    /// HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(policy.attempt_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            policy,
        })
    }

    /// Full request URL for `symbol`.
    pub fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/getliststockdata/{symbol}",
            self.base_url.trim_end_matches('/')
        )
    }

    /// One attempt: `Ok(None)` when the array is empty.
    async fn fetch_once(&self, symbol: &str) -> Result<Option<QuoteSnapshot>> {
        let response = self
            .client
            .get(self.quote_url(symbol))
            .send()
            .await?
            .error_for_status()?;
        let records: Vec<serde_json::Value> = response.json().await?;
        first_snapshot(records)
    }
}

/// Decodes the first element of a `getliststockdata` response, if any.
///
/// # Errors
///
/// Returns [`LimitwatchError::Json`](crate::LimitwatchError::Json) if the
/// first record lacks one of the price fields.
pub fn first_snapshot(records: Vec<serde_json::Value>) -> Result<Option<QuoteSnapshot>> {
    match records.into_iter().next() {
        Some(first) => {
            let record: QuoteRecord = serde_json::from_value(first)?;
            Ok(Some(record.into()))
        }
        None => Ok(None),
    }
}

impl QuoteSource for VpsQuoteSource {
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        fetch_with_retry(symbol, &self.policy, || self.fetch_once(symbol)).await
    }
}
