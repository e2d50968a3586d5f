use goldwatch_core::{AttemptOutcome, GoldMonitor, MonitorConfig, NotifyOutcome};
use tracing::{info, warn};

use crate::error::CliError;

/// One monitoring cycle. Operational failures are logged, never returned.
pub async fn run(config: MonitorConfig) -> Result<(), CliError> {
    info!(
        history = %config.history_path.display(),
        notify = config.telegram.is_some(),
        "gold price monitor starting"
    );

    let mut monitor = GoldMonitor::from_config(config);
    let report = monitor.run_once().await;

    for attempt in &report.attempts {
        if let AttemptOutcome::Failed(error) = &attempt.outcome {
            warn!(source = %attempt.source, code = error.code(), "source failed");
        }
    }

    match (&report.quote, report.selected_source) {
        (Some(quote), Some(source)) => info!(
            price = quote.price,
            currency = %quote.currency,
            unit = %quote.unit,
            source = %source,
            latency_ms = report.fetch_latency_ms,
            "gold price fetched"
        ),
        _ => warn!(
            attempts = report.attempts.len(),
            latency_ms = report.fetch_latency_ms,
            "all sources failed"
        ),
    }

    if let Some(NotifyOutcome::Failed(error)) = &report.notification {
        warn!(error = %error, "notification not delivered");
    }

    info!(succeeded = report.succeeded(), "gold price monitor finished");
    Ok(())
}
