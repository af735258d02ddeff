//! Quote watcher that pushes one aggregated chat message per polling cycle.
//!
//! Every cycle re-reads a symbol list, fetches each symbol's latest quote,
//! reports the symbols whose state changed (or all of them at session open
//! and close), and appends roll-ups of symbols sitting at their ceiling or
//! floor price.

pub mod config;
pub mod detector;
pub mod error;
pub mod fetcher;
pub mod gate;
pub mod message;
pub mod models;
pub mod notifier;
pub mod poller;
pub mod symbols;
#[cfg(test)]
mod test_support;

pub use error::{LimitwatchError, Result};
