//! Change detection against the last reported state.

use std::collections::HashMap;

use crate::gate::GateDecision;
use crate::models::QuoteSnapshot;

/// Which fields count as a change worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Last price, change, ceiling, reference and floor.
    AllFields,
    /// Last price only.
    LastPriceOnly,
}

/// Holds the last reported snapshot per symbol.
///
/// Owned by the polling loop, which is the only writer.
#[derive(Debug)]
pub struct ChangeDetector {
    mode: DiffMode,
    previous: HashMap<String, QuoteSnapshot>,
}

impl ChangeDetector {
    #[must_use]
    pub fn new(mode: DiffMode) -> Self {
        Self {
            mode,
            previous: HashMap::new(),
        }
    }

    /// Decides whether `symbol` is reported this cycle and, if so, records
    /// `current` as its last reported state.
    ///
    /// A symbol is reported on a full snapshot cycle, when it has never been
    /// reported, or when sending is allowed and it differs from its previous
    /// state.
    pub fn observe(&mut self, symbol: &str, current: &QuoteSnapshot, gate: &GateDecision) -> bool {
        let report = match self.previous.get(symbol) {
            None => true,
            Some(previous) => {
                gate.full_snapshot || (gate.allow_send && self.differs(previous, current))
            }
        };

        if report {
            self.previous.insert(symbol.to_string(), *current);
        }
        report
    }

    fn differs(&self, previous: &QuoteSnapshot, current: &QuoteSnapshot) -> bool {
        match self.mode {
            // change is derived from last_price and reference, so comparing
            // the four stored prices covers it.
            DiffMode::AllFields => previous != current,
            DiffMode::LastPriceOnly => previous.last_price != current.last_price,
        }
    }

    /// Forgets every symbol, so each is treated as first seen again.
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    pub fn previous(&self, symbol: &str) -> Option<&QuoteSnapshot> {
        self.previous.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.previous.len()
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }
}
