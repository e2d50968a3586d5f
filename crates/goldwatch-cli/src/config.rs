use std::env;

use goldwatch_core::{MonitorConfig, ProviderId, SourceCredentials, TelegramCredentials};

use crate::cli::Cli;
use crate::error::CliError;

/// Builds the run configuration from arguments and the environment.
pub fn monitor_config(cli: &Cli) -> Result<MonitorConfig, CliError> {
    let telegram = if cli.no_notify {
        None
    } else {
        TelegramCredentials::from_parts(
            env_var("GOLDWATCH_TELEGRAM_BOT_TOKEN", "TELEGRAM_BOT_TOKEN"),
            env_var("GOLDWATCH_TELEGRAM_CHAT_ID", "TELEGRAM_CHAT_ID"),
        )
    };

    Ok(MonitorConfig {
        sources: SourceCredentials::new(env_var("GOLDWATCH_GOLDAPI_TOKEN", "GOLDAPI_TOKEN")),
        telegram,
        priority: parse_priority(&cli.sources)?,
        history_path: cli.history_file.clone(),
        history_capacity: cli.history_limit,
        timeout_ms: cli.timeout_ms,
    })
}

fn parse_priority(raw: &[String]) -> Result<Vec<ProviderId>, CliError> {
    raw.iter()
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.parse::<ProviderId>().map_err(CliError::from))
        .collect()
}

fn env_var(primary: &str, fallback: &str) -> Option<String> {
    env::var(primary).or_else(|_| env::var(fallback)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_keeps_given_order() {
        let parsed = parse_priority(&[String::from("qingyunke"), String::from("GoldAPI")])
            .expect("valid keys");
        assert_eq!(parsed, vec![ProviderId::Qingyunke, ProviderId::GoldApi]);
    }

    #[test]
    fn blank_entries_are_ignored() {
        let parsed = parse_priority(&[String::new(), String::from("jijinhao")]).expect("valid");
        assert_eq!(parsed, vec![ProviderId::Jijinhao]);
    }

    #[test]
    fn unknown_source_is_a_validation_error() {
        let error = parse_priority(&[String::from("kitco")]).expect_err("unknown key");
        assert!(matches!(error, CliError::Validation(_)));
        assert_eq!(error.exit_code(), 2);
    }
}
