//! Symbol list ingestion.
//!
//! The list is a plain text file with one symbol per line. Lines are trimmed
//! and uppercased, blank lines are skipped, and a symbol repeated later in
//! the file is dropped so each one is polled once per cycle.

use std::collections::HashSet;
use std::path::Path;

use crate::Result;

/// Reads and normalizes the symbol list at `path`.
///
/// # Errors
///
/// Returns [`LimitwatchError::SourceUnavailable`](crate::LimitwatchError::SourceUnavailable)
/// if the file cannot be opened or is not valid UTF-8.
pub fn load_symbols(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        crate::LimitwatchError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(parse_symbols(&contents))
}

/// Normalizes raw list contents, keeping first-occurrence order.
pub fn parse_symbols(contents: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .filter(|symbol| seen.insert(symbol.clone()))
        .collect()
}
