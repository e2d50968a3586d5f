mod history;
mod run;
mod sources;

use crate::cli::{Cli, Command};
use crate::config::monitor_config;
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = monitor_config(cli)?;

    match &cli.command {
        None | Some(Command::Run) => run::run(config).await,
        Some(Command::History(args)) => history::run(args, &config),
        Some(Command::Sources) => sources::run(config),
    }
}
