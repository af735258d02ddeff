use limitwatch::LimitwatchError;
use limitwatch::config::fetch_config;
use limitwatch::fetcher::{RetryPolicy, VpsQuoteSource};
use limitwatch::notifier::TelegramNotifier;
use limitwatch::poller::PollingLoop;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), LimitwatchError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let app_config = fetch_config()?;
    if app_config.autostart {
        info!("LIMITWATCH_AUTOSTART is set; start-on-boot registration is left to the host");
    }

    let source = VpsQuoteSource::new(&app_config.quote_url, RetryPolicy::default())?;
    let notifier = TelegramNotifier::new(&app_config.telegram)?;
    let poller = PollingLoop::new(app_config.watch, source, notifier);

    let task = tokio::spawn(poller.run());

    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutting down");
            task.abort();
        }
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {e}");
            let _ = task.await;
        }
    }

    Ok(())
}
