//! Shared models for quotes and their status markers.
//!
//! [`quote`] holds the wire record returned by the quote source and the
//! validated [`QuoteSnapshot`](quote::QuoteSnapshot) built from it;
//! [`status`] maps a snapshot to the marker shown in a report line.

pub mod quote;
pub mod status;

pub use quote::{QuoteRecord, QuoteSnapshot};
pub use status::{StatusMarker, classify};
