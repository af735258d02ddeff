//! Shared test doubles and helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_decimal::Decimal;

use limitwatch::config::WatchConfig;
use limitwatch::fetcher::{QuoteSource, RetryPolicy, fetch_with_retry};
use limitwatch::gate::GatePolicy;
use limitwatch::models::QuoteSnapshot;
use limitwatch::notifier::Notifier;
use limitwatch::{LimitwatchError, Result};

/// Builds a snapshot from `(last, reference, ceiling, floor)`.
pub fn quote(last: Decimal, reference: Decimal, ceiling: Decimal, floor: Decimal) -> QuoteSnapshot {
    QuoteSnapshot {
        last_price: last,
        reference,
        ceiling,
        floor,
    }
}

/// Retry policy short enough for tests.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(1),
        attempt_timeout: Duration::from_millis(200),
    }
}

/// Quote source backed by an in-memory map. Symbols not in the map fail
/// every attempt and come back as unavailable.
#[derive(Clone, Default)]
pub struct FakeSource {
    quotes: Arc<Mutex<HashMap<String, QuoteSnapshot>>>,
    attempts: Arc<Mutex<HashMap<String, u32>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
}

impl FakeSource {
    pub fn set(&self, symbol: &str, snapshot: QuoteSnapshot) {
        self.quotes
            .lock()
            .unwrap()
            .insert(symbol.to_string(), snapshot);
    }

    /// Makes every fetch of `symbol` take at least `delay`.
    pub fn delay(&self, symbol: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(symbol.to_string(), delay);
    }

    pub fn remove(&self, symbol: &str) {
        self.quotes.lock().unwrap().remove(symbol);
    }

    pub fn attempts(&self, symbol: &str) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(symbol)
            .copied()
            .unwrap_or(0)
    }

    fn lookup(&self, symbol: &str) -> Option<QuoteSnapshot> {
        *self
            .attempts
            .lock()
            .unwrap()
            .entry(symbol.to_string())
            .or_default() += 1;
        self.quotes.lock().unwrap().get(symbol).copied()
    }
}

impl QuoteSource for FakeSource {
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteSnapshot> {
        let delay = self.delays.lock().unwrap().get(symbol).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        fetch_with_retry(symbol, &fast_retry(), || {
            let found = self.lookup(symbol);
            async move { Ok(found) }
        })
        .await
    }
}

/// Notifier that records every message, optionally failing each send.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        if *self.fail.lock().unwrap() {
            return Err(LimitwatchError::SendFailed("endpoint down".to_string()));
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Writes `contents` as the symbol list at `path`, replacing any old list.
pub fn write_symbols(path: &Path, contents: &str) {
    let mut file = std::fs::File::create(path).expect("failed to create symbol list");
    file.write_all(contents.as_bytes())
        .expect("failed to write symbol list");
}

pub fn watch_config(symbols_file: &Path, gate: GatePolicy) -> WatchConfig {
    WatchConfig {
        symbols_file: symbols_file.to_path_buf(),
        check_interval: Duration::from_secs(60),
        gate,
        fetch_concurrency: 4,
    }
}
