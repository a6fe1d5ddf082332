use anyhow::Result;

use seocho_tennis_club::cli::{Cli, Command};
use seocho_tennis_club::{handle_command, handle_completions, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Completions { shell } => handle_completions(*shell),
        command => handle_command(command, &cli.session()),
    }
}
