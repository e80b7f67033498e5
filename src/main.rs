mod cli;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clickclick::args::AliasedGroup;
use cli::{Cli, Command};

fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt::init();
    }

    let cli: Cli = AliasedGroup::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Table {
            file,
            columns,
            max_widths,
            titles,
        } => cli::table(&file, columns, max_widths, titles),
        Command::Choose { prompt, options } => cli::choose(&prompt, options),
        Command::Wait { seconds } => cli::wait(seconds),
        Command::Config => cli::config_cmd(),
    }
}
