use std::io::{self, Write};

use goldwatch_core::{GoldMonitor, MonitorConfig, QuoteSource};

use crate::error::CliError;

pub fn run(config: MonitorConfig) -> Result<(), CliError> {
    let monitor = GoldMonitor::from_config(config);

    let mut stdout = io::stdout().lock();
    for (position, source) in monitor.fetcher().sources().iter().enumerate() {
        writeln!(
            stdout,
            "{}. {:<10} {}",
            position + 1,
            source.id(),
            readiness(source.as_ref())
        )?;
    }
    Ok(())
}

fn readiness(source: &dyn QuoteSource) -> &'static str {
    match (source.requires_credential(), source.is_ready()) {
        (_, true) => "ready",
        (true, false) => "skipped (no token)",
        (false, false) => "unavailable",
    }
}
