//! InternLink CLI.

use clap::{ColorChoice, Parser};
use internlink_cli::logging::{LogConfig, init_logging};
use std::io::IsTerminal;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{
    run_applied, run_apply, run_list, run_professions, run_show, run_states,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let result = match &cli.command {
        Command::List(args) => run_list(&cli, args).await,
        Command::Show(args) => run_show(&cli, args).await,
        Command::Apply(args) => run_apply(&cli, args, true).await,
        Command::Unapply(args) => run_apply(&cli, args, false).await,
        Command::Applied => run_applied(&cli).await,
        Command::Professions => run_professions(&cli).await,
        Command::States => run_states(&cli).await,
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };
    config
}
