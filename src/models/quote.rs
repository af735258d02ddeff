use rust_decimal::Decimal;
use serde::Deserialize;

/// One element of the JSON array returned by `getliststockdata/{symbol}`.
///
/// The endpoint sends many more fields; only the four prices the watcher
/// needs are decoded. A record missing any of them fails to deserialize and
/// the fetch attempt counts as failed.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRecord {
    #[serde(rename = "lastPrice")]
    pub last_price: Decimal,
    /// Reference (previous close) price.
    #[serde(rename = "r")]
    pub reference: Decimal,
    /// Ceiling price for the session.
    #[serde(rename = "c")]
    pub ceiling: Decimal,
    /// Floor price for the session.
    #[serde(rename = "f")]
    pub floor: Decimal,
}

/// Latest quoted state of one symbol, valid for a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteSnapshot {
    pub last_price: Decimal,
    pub reference: Decimal,
    pub ceiling: Decimal,
    pub floor: Decimal,
}

impl QuoteSnapshot {
    /// Difference between the last traded price and the reference price.
    ///
    /// Normalized so an unchanged price never renders as `-0.00`.
    pub fn change(&self) -> Decimal {
        (self.last_price - self.reference).normalize()
    }

    pub fn is_limit_up(&self) -> bool {
        self.last_price == self.ceiling
    }

    pub fn is_limit_down(&self) -> bool {
        self.last_price == self.floor
    }
}

impl From<QuoteRecord> for QuoteSnapshot {
    fn from(record: QuoteRecord) -> Self {
        Self {
            last_price: record.last_price,
            reference: record.reference,
            ceiling: record.ceiling,
            floor: record.floor,
        }
    }
}
