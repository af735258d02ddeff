//! Crate-level error types.
//!
//! [`LimitwatchError`] unifies every failure the watcher can hit (config,
//! symbol file, quote fetch, notification, HTTP, JSON) behind a single enum.
//! Only [`LimitwatchError::Config`] is fatal, and only before the polling
//! loop starts; everything else is logged and the loop moves on.

use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LimitwatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum LimitwatchError {
    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The symbol list file could not be opened or read.
    #[error("symbol list {} unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable quote for a symbol after every retry was spent.
    #[error("quote for {symbol} unavailable after {attempts} attempts")]
    FetchUnavailable { symbol: String, attempts: u32 },

    /// The messaging endpoint rejected or never received the message.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// An HTTP request failed at the transport level or returned an error status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
