//! Builds the single outbound message for a cycle.

use crate::models::{QuoteSnapshot, StatusMarker};

const LIMIT_UP_PREFIX: &str = "💜 MÃ TRẦN: ";
const LIMIT_DOWN_PREFIX: &str = "🩵 MÃ SÀN: ";

/// Formats one symbol's report line, e.g.
/// `😳 AAA: 10 (+0.00), T:11, TC:10, S:9`.
pub fn format_report_line(symbol: &str, snapshot: &QuoteSnapshot) -> String {
    format!(
        "{} {}: {} ({:+.2}), T:{}, TC:{}, S:{}",
        StatusMarker::of(snapshot),
        symbol,
        snapshot.last_price,
        snapshot.change().round_dp(2),
        snapshot.ceiling,
        snapshot.reference,
        snapshot.floor,
    )
}

/// Collects report lines and limit roll-ups in symbol-list order.
#[derive(Debug, Default)]
pub struct MessageAggregator {
    lines: Vec<String>,
    limit_up: Vec<String>,
    limit_down: Vec<String>,
}

impl MessageAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the report line for `symbol`.
    pub fn push_report(&mut self, symbol: &str, snapshot: &QuoteSnapshot) {
        self.lines.push(format_report_line(symbol, snapshot));
    }

    /// Records `symbol` in the roll-ups it belongs to, whether or not it
    /// was reported.
    pub fn note_limits(&mut self, symbol: &str, snapshot: &QuoteSnapshot) {
        if snapshot.is_limit_up() {
            self.limit_up.push(symbol.to_string());
        }
        if snapshot.is_limit_down() {
            self.limit_down.push(symbol.to_string());
        }
    }

    /// Number of report lines queued so far.
    pub fn report_count(&self) -> usize {
        self.lines.len()
    }

    /// Joins the report lines and trailing roll-ups into one text block.
    ///
    /// Returns `None` when no symbol was reported; roll-ups alone never
    /// make a message.
    pub fn finish(self) -> Option<String> {
        let Self {
            mut lines,
            limit_up,
            limit_down,
        } = self;

        if lines.is_empty() {
            return None;
        }
        if !limit_up.is_empty() {
            lines.push(format!("{LIMIT_UP_PREFIX}{}", limit_up.join(", ")));
        }
        if !limit_down.is_empty() {
            lines.push(format!("{LIMIT_DOWN_PREFIX}{}", limit_down.join(", ")));
        }
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(last: rust_decimal::Decimal) -> QuoteSnapshot {
        QuoteSnapshot {
            last_price: last,
            reference: dec!(10),
            ceiling: dec!(10.7),
            floor: dec!(9.3),
        }
    }

    #[test]
    fn report_line_format() {
        let line = format_report_line("HPG", &quote(dec!(10.25)));
        assert_eq!(line, "🤢 HPG: 10.25 (+0.25), T:10.7, TC:10, S:9.3");

        let line = format_report_line("VNM", &quote(dec!(9.5)));
        assert_eq!(line, "😡 VNM: 9.5 (-0.50), T:10.7, TC:10, S:9.3");
    }

    #[test]
    fn empty_aggregate_yields_nothing() {
        assert_eq!(MessageAggregator::new().finish(), None);
    }

    #[test]
    fn rollups_alone_do_not_make_a_message() {
        let mut agg = MessageAggregator::new();
        agg.note_limits("HPG", &quote(dec!(10.7)));
        agg.note_limits("VNM", &quote(dec!(9.3)));
        assert_eq!(agg.finish(), None);
    }

    #[test]
    fn rollups_follow_report_lines() {
        let mut agg = MessageAggregator::new();
        agg.push_report("FPT", &quote(dec!(10.1)));
        agg.note_limits("HPG", &quote(dec!(10.7)));
        agg.note_limits("FPT", &quote(dec!(10.1)));
        agg.note_limits("SSI", &quote(dec!(10.7)));

        let text = agg.finish().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("FPT"));
        assert_eq!(lines[1], "💜 MÃ TRẦN: HPG, SSI");
    }

    #[test]
    fn limit_down_rollup_is_last() {
        let mut agg = MessageAggregator::new();
        agg.push_report("VIC", &quote(dec!(9.3)));
        agg.note_limits("VIC", &quote(dec!(9.3)));
        agg.note_limits("HPG", &quote(dec!(10.7)));

        let text = agg.finish().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "🥶 VIC: 9.3 (-0.70), T:10.7, TC:10, S:9.3");
        assert_eq!(lines[1], "💜 MÃ TRẦN: HPG");
        assert_eq!(lines[2], "🩵 MÃ SÀN: VIC");
    }
}
