//! The polling loop.
//!
//! Each cycle runs `load symbols -> gate -> fetch all -> detect -> aggregate
//! -> notify`, then the loop sleeps for the configured interval. Fetch time
//! is not subtracted from the sleep, so the period is interval plus fetch
//! time. No error stops the loop.

use chrono::Timelike;
use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, error, info, warn};

use crate::config::WatchConfig;
use crate::detector::ChangeDetector;
use crate::fetcher::QuoteSource;
use crate::gate::{GateDecision, SessionFlags};
use crate::message::MessageAggregator;
use crate::notifier::Notifier;
use crate::symbols::load_symbols;

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The symbol list could not be read; nothing else ran.
    Skipped,
    /// Nothing was reported, or sending is closed for this hour.
    Quiet { reported: usize },
    /// A message with `reported` lines was delivered.
    Sent { reported: usize },
    /// A message was built but delivery failed.
    SendFailed { reported: usize },
}

/// Owns all cross-cycle state: the change detector and the session flags.
pub struct PollingLoop<S, N> {
    config: WatchConfig,
    source: S,
    notifier: N,
    detector: ChangeDetector,
    flags: SessionFlags,
}

impl<S: QuoteSource, N: Notifier> PollingLoop<S, N> {
    #[must_use]
    pub fn new(config: WatchConfig, source: S, notifier: N) -> Self {
        let detector = ChangeDetector::new(config.gate.diff_mode());
        Self {
            config,
            source,
            notifier,
            detector,
            flags: SessionFlags::default(),
        }
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Runs cycles forever, reading the hour from the local clock.
    pub async fn run(mut self) {
        info!(
            symbols_file = %self.config.symbols_file.display(),
            interval_secs = self.config.check_interval.as_secs(),
            gate = ?self.config.gate,
            "Polling loop started"
        );

        loop {
            let hour = chrono::Local::now().hour();
            let outcome = self.run_cycle(hour).await;
            debug!(?outcome, "Cycle finished");
            tokio::time::sleep(self.config.check_interval).await;
        }
    }

    /// Runs one cycle as if it started at local `hour`.
    pub async fn run_cycle(&mut self, hour: u32) -> CycleOutcome {
        let symbols = match load_symbols(&self.config.symbols_file) {
            Ok(symbols) => symbols,
            Err(e) => {
                error!("Skipping cycle: {e}");
                return CycleOutcome::Skipped;
            }
        };

        let gate = self.gate(hour);

        // Fetches run concurrently; `buffered` yields results in list order
        // and detection below stays single-writer.
        let source = &self.source;
        let results: Vec<_> = stream::iter(symbols)
            .map(|symbol| async move {
                let result = source.fetch_quote(&symbol).await;
                (symbol, result)
            })
            .buffered(self.config.fetch_concurrency.max(1))
            .collect()
            .await;

        let mut aggregator = MessageAggregator::new();
        for (symbol, result) in results {
            let snapshot = match result {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!(%symbol, "Skipping symbol this cycle: {e}");
                    continue;
                }
            };

            if self.detector.observe(&symbol, &snapshot, &gate) {
                aggregator.push_report(&symbol, &snapshot);
            }
            aggregator.note_limits(&symbol, &snapshot);
        }

        let reported = aggregator.report_count();
        let Some(text) = aggregator.finish() else {
            return CycleOutcome::Quiet { reported };
        };
        if !gate.allow_send {
            debug!(reported, hour, "Outside sending window, message dropped");
            return CycleOutcome::Quiet { reported };
        }

        match self.notifier.send(&text).await {
            Ok(()) => CycleOutcome::Sent { reported },
            Err(e) => {
                error!("Notification not delivered: {e}");
                CycleOutcome::SendFailed { reported }
            }
        }
    }

    /// Evaluates the gate and applies its side effects on owned state.
    fn gate(&mut self, hour: u32) -> GateDecision {
        let decision = self.config.gate.evaluate(hour, self.flags);
        if decision.daily_reset {
            // Fires on every cycle of the reset hour.
            debug!(tracked = self.detector.len(), "Daily reset of tracked quotes");
            self.detector.reset();
        }
        if decision.full_snapshot {
            info!(hour, "Full snapshot cycle");
        }
        self.flags = decision.flags;
        decision
    }
}
