//! Status classification for a quote snapshot.

use std::fmt;

use rust_decimal::Decimal;

use super::QuoteSnapshot;

/// Human-facing marker describing where the last price sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMarker {
    LimitUp,
    AtReference,
    LimitDown,
    Up,
    Down,
    Flat,
}

impl StatusMarker {
    /// Returns the glyph used at the start of a report line.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusMarker::LimitUp => "😈",
            StatusMarker::AtReference => "😳",
            StatusMarker::LimitDown => "🥶",
            StatusMarker::Up => "🤢",
            StatusMarker::Down => "😡",
            StatusMarker::Flat => "⚪",
        }
    }

    /// Classifies a snapshot using its own derived change.
    pub fn of(snapshot: &QuoteSnapshot) -> Self {
        classify(
            snapshot.last_price,
            snapshot.change(),
            snapshot.reference,
            snapshot.ceiling,
            snapshot.floor,
        )
    }
}

impl fmt::Display for StatusMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps prices to a [`StatusMarker`]. First match wins, in this order:
/// ceiling, reference, floor, positive change, negative change.
///
/// Comparisons are exact; no tolerance is applied.
pub fn classify(
    last_price: Decimal,
    change: Decimal,
    reference: Decimal,
    ceiling: Decimal,
    floor: Decimal,
) -> StatusMarker {
    if last_price == ceiling {
        StatusMarker::LimitUp
    } else if last_price == reference {
        StatusMarker::AtReference
    } else if last_price == floor {
        StatusMarker::LimitDown
    } else if change > Decimal::ZERO {
        StatusMarker::Up
    } else if change < Decimal::ZERO {
        StatusMarker::Down
    } else {
        StatusMarker::Flat
    }
}
