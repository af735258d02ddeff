//! Time-of-day gating.
//!
//! [`GatePolicy::evaluate`] is a pure function of the local hour and the
//! current [`SessionFlags`]. It decides whether this cycle may send, whether
//! it is a full snapshot cycle, and whether accumulated state must be wiped
//! for the new day.

use std::str::FromStr;

use crate::detector::DiffMode;

/// Once-per-day markers for the opening and closing full snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub morning_snapshot_sent: bool,
    pub afternoon_snapshot_sent: bool,
}

/// Outcome of gating one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// The aggregated message may be delivered this cycle.
    pub allow_send: bool,
    /// Every fetched symbol is reported regardless of change.
    pub full_snapshot: bool,
    /// Previous state and session flags must be cleared before detection.
    pub daily_reset: bool,
    /// Flags to carry into the next cycle.
    pub flags: SessionFlags,
}

/// Which gating rules the loop follows. The two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePolicy {
    /// Send only between `open_hour` and `close_hour` inclusive, push a full
    /// snapshot once at each of those hours, and reset at midnight.
    Windowed { open_hour: u32, close_hour: u32 },
    /// Report last-price changes at any hour. No snapshots, no daily reset.
    AlwaysOn,
}

impl Default for GatePolicy {
    fn default() -> Self {
        GatePolicy::Windowed {
            open_hour: 9,
            close_hour: 15,
        }
    }
}

impl FromStr for GatePolicy {
    type Err = crate::LimitwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windowed" => Ok(GatePolicy::default()),
            "always" | "always-on" => Ok(GatePolicy::AlwaysOn),
            other => Err(crate::LimitwatchError::Config(format!(
                "unknown gate policy {other:?}, expected \"windowed\" or \"always\""
            ))),
        }
    }
}

impl GatePolicy {
    /// Which snapshot fields the change detector compares under this policy.
    pub fn diff_mode(&self) -> DiffMode {
        match self {
            GatePolicy::Windowed { .. } => DiffMode::AllFields,
            GatePolicy::AlwaysOn => DiffMode::LastPriceOnly,
        }
    }

    /// Gates a cycle starting at local `hour` (0-23).
    pub fn evaluate(&self, hour: u32, flags: SessionFlags) -> GateDecision {
        let (open_hour, close_hour) = match *self {
            GatePolicy::AlwaysOn => {
                return GateDecision {
                    allow_send: true,
                    full_snapshot: false,
                    daily_reset: false,
                    flags,
                };
            }
            GatePolicy::Windowed {
                open_hour,
                close_hour,
            } => (open_hour, close_hour),
        };

        if hour == 0 {
            return GateDecision {
                allow_send: false,
                full_snapshot: false,
                daily_reset: true,
                flags: SessionFlags::default(),
            };
        }

        let mut flags = flags;
        let mut full_snapshot = false;
        let allow_send = (open_hour..=close_hour).contains(&hour);

        if hour == open_hour && !flags.morning_snapshot_sent {
            flags.morning_snapshot_sent = true;
            full_snapshot = true;
        }
        if hour == close_hour && !flags.afternoon_snapshot_sent {
            flags.afternoon_snapshot_sent = true;
            full_snapshot = true;
        }

        GateDecision {
            allow_send,
            full_snapshot,
            daily_reset: false,
            flags,
        }
    }
}
