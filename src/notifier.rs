//! Delivery of the aggregated message to the chat endpoint.
//!
//! Sending is fire-and-forget from the loop's point of view: a failure is
//! returned to the caller for logging and is never retried.

use std::future::Future;
use std::time::Duration;

use tracing::info;
use zeroize::Zeroizing;

use crate::Result;
use crate::config::TelegramConfig;

/// Per-request timeout for `sendMessage`.
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A destination for cycle messages.
pub trait Notifier: Send + Sync {
    /// Delivers `text` once.
    ///
    /// # Errors
    ///
    /// Returns [`LimitwatchError::SendFailed`](crate::LimitwatchError::SendFailed)
    /// if the message was not accepted.
    fn send(&self, text: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Posts messages through the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    client: reqwest::Client,
    base_url: String,
    bot_token: Zeroizing<String>,
    chat_id: String,
}

impl TelegramNotifier {
    /// Builds a notifier from the messaging section of the config.
    ///
    /// # Errors
    ///
    /// Returns [`LimitwatchError::Http`](crate::LimitwatchError::Http) if the
    /// HTTP client cannot be built.
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    fn send_url(&self) -> Zeroizing<String> {
        Zeroizing::new(format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.bot_token.as_str()
        ))
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let url = self.send_url();
        let form = [("chat_id", self.chat_id.as_str()), ("text", text)];

        // reqwest errors embed the URL, which carries the bot token.
        let response = self
            .client
            .post(url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| crate::LimitwatchError::SendFailed(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(crate::LimitwatchError::SendFailed(format!(
                "sendMessage returned {status}"
            )));
        }

        info!(chars = text.chars().count(), "Notification sent");
        Ok(())
    }
}
