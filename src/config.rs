//! Application configuration loaded from environment variables.
//!
//! Required:
//! - `LIMITWATCH_BOT_TOKEN` — bot credential for the messaging endpoint
//! - `LIMITWATCH_CHAT_ID` — destination chat id
//! - `LIMITWATCH_SYMBOLS_FILE` — path of the symbol list, re-read every cycle
//!
//! Optional:
//! - `LIMITWATCH_CHECK_INTERVAL` — seconds between cycles (default 60)
//! - `LIMITWATCH_GATE` — `windowed` (default) or `always`
//! - `LIMITWATCH_FETCH_CONCURRENCY` — parallel quote fetches (default 4)
//! - `LIMITWATCH_QUOTE_URL` / `LIMITWATCH_TELEGRAM_URL` — endpoint overrides
//! - `LIMITWATCH_AUTOSTART` — start-on-boot flag, recorded but not acted on

use std::path::PathBuf;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::gate::GatePolicy;

/// Default quote source host.
const DEFAULT_QUOTE_URL: &str = "https://bgapidatafeed.vps.com.vn";

/// Default messaging endpoint host.
const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Top-level application configuration.
///
/// Built once at startup and handed to the polling loop; never mutated.
#[derive(Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub watch: WatchConfig,
    pub quote_url: String,
    pub autostart: bool,
}

/// Messaging endpoint settings.
#[derive(Debug)]
pub struct TelegramConfig {
    pub base_url: String,
    pub bot_token: Zeroizing<String>,
    pub chat_id: String,
}

/// Polling behaviour.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub symbols_file: PathBuf,
    pub check_interval: Duration,
    pub gate: GatePolicy,
    pub fetch_concurrency: usize,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`LimitwatchError::Config`](crate::LimitwatchError::Config) if a
/// required variable is missing or an optional one cannot be parsed.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let bot_token = Zeroizing::new(required_var("LIMITWATCH_BOT_TOKEN")?);
    let chat_id = required_var("LIMITWATCH_CHAT_ID")?;
    let symbols_file = PathBuf::from(required_var("LIMITWATCH_SYMBOLS_FILE")?);

    let interval_secs = positive_var("LIMITWATCH_CHECK_INTERVAL", DEFAULT_CHECK_INTERVAL_SECS)?;
    let fetch_concurrency =
        positive_var("LIMITWATCH_FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY as u64)? as usize;

    let gate = match non_empty_var("LIMITWATCH_GATE") {
        Some(value) => value.parse()?,
        None => GatePolicy::default(),
    };

    let autostart = match non_empty_var("LIMITWATCH_AUTOSTART") {
        Some(value) => parse_flag("LIMITWATCH_AUTOSTART", &value)?,
        None => false,
    };

    Ok(AppConfig {
        telegram: TelegramConfig {
            base_url: non_empty_var("LIMITWATCH_TELEGRAM_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_URL.to_string()),
            bot_token,
            chat_id,
        },
        watch: WatchConfig {
            symbols_file,
            check_interval: Duration::from_secs(interval_secs),
            gate,
            fetch_concurrency,
        },
        quote_url: non_empty_var("LIMITWATCH_QUOTE_URL")
            .unwrap_or_else(|| DEFAULT_QUOTE_URL.to_string()),
        autostart,
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn required_var(name: &str) -> crate::Result<String> {
    non_empty_var(name).ok_or_else(|| crate::LimitwatchError::Config(format!("{name} is not set")))
}

/// Parses a positive integer variable, falling back to `default` when unset.
fn positive_var(name: &str, default: u64) -> crate::Result<u64> {
    let Some(raw) = non_empty_var(name) else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(crate::LimitwatchError::Config(format!(
            "{name} must be a positive integer, got {raw:?}"
        ))),
    }
}

fn parse_flag(name: &str, raw: &str) -> crate::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(crate::LimitwatchError::Config(format!(
            "{name} must be a boolean, got {raw:?}"
        ))),
    }
}
