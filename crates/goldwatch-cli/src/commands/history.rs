use std::io::{self, Write};

use goldwatch_core::{CanonicalQuote, HistoryStore, MonitorConfig};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub fn run(args: &HistoryArgs, config: &MonitorConfig) -> Result<(), CliError> {
    let mut store = HistoryStore::new(&config.history_path).with_capacity(config.history_capacity);
    let recent = tail(store.load(), args.limit);

    let rendered = if args.pretty {
        serde_json::to_string_pretty(recent)?
    } else {
        serde_json::to_string(recent)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}

fn tail(entries: &[CanonicalQuote], limit: usize) -> &[CanonicalQuote] {
    &entries[entries.len().saturating_sub(limit)..]
}
