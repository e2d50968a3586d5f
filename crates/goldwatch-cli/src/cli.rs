//! CLI argument definitions for goldwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Fetch, notify and record one quote (default) |
//! | `history` | Print the most recent stored quotes as JSON |
//! | `sources` | List sources in fallback order with readiness |
//!
//! # Environment
//!
//! | Value | Primary | Fallback |
//! |-------|---------|----------|
//! | GoldAPI token | `GOLDWATCH_GOLDAPI_TOKEN` | `GOLDAPI_TOKEN` |
//! | Telegram bot token | `GOLDWATCH_TELEGRAM_BOT_TOKEN` | `TELEGRAM_BOT_TOKEN` |
//! | Telegram chat id | `GOLDWATCH_TELEGRAM_CHAT_ID` | `TELEGRAM_CHAT_ID` |
//!
//! # Examples
//!
//! ```bash
//! # Hourly cron entry
//! 0 * * * * goldwatch run --history-file /var/lib/goldwatch/gold_history.json
//!
//! # Prefer the domestic CNY feed
//! goldwatch --sources jijinhao,goldapi run
//!
//! # Show the last five quotes
//! goldwatch history --limit 5 --pretty
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use goldwatch_core::{DEFAULT_HISTORY_CAPACITY, DEFAULT_HISTORY_FILE, DEFAULT_TIMEOUT_MS};

/// Gold price monitor with multi-source fallback.
#[derive(Debug, Parser)]
#[command(
    name = "goldwatch",
    author,
    version,
    about = "Gold price monitor with multi-source fallback",
    long_about = "goldwatch fetches the current gold price from the first working feed \
(GoldAPI, Jijinhao, Qingyunke), posts it to a Telegram chat when a bot is configured, \
and appends it to a bounded JSON history file.\n\
\n\
A run always exits successfully; fetch, notification and history problems are logged."
)]
pub struct Cli {
    /// Path of the JSON history log.
    #[arg(long, global = true, default_value = DEFAULT_HISTORY_FILE)]
    pub history_file: PathBuf,

    /// Maximum number of quotes kept in the history log.
    #[arg(long, global = true, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    pub history_limit: usize,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Comma-separated fallback order (goldapi, jijinhao, qingyunke).
    #[arg(long, global = true, value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Never send a Telegram notification, even when credentials are set.
    #[arg(long, global = true, default_value_t = false)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch, notify and record one quote.
    Run,
    /// Print stored quotes.
    History(HistoryArgs),
    /// List sources in fallback order.
    Sources,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of most recent quotes to print.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
