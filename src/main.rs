use std::io;
use std::process::ExitCode;

use anyhow::Context;
use changecraft::config::config_manager::ConfigManager;
use changecraft::structs::cli::Cli;
use changecraft::workers::command_runner::CommandRunner;
use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = ConfigManager::load(cli.config.as_deref()).context("Failed to load configuration")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    let runner = CommandRunner::new(config);
    let code = runner.run_command(cli.command, &mut io::stdout().lock())?;

    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
