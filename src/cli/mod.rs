//! CLI command handling for clickclick.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clickclick::args::FloatRange;

pub use commands::{choose, config_cmd, table, wait};

/// Subcommands may be abbreviated: `clickclick ta rows.json`.
#[derive(Parser)]
#[command(name = "clickclick")]
#[command(about = "Friendly terminal output: tables, actions and prompts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a JSON array of objects as a table
    Table {
        /// JSON file to read, or `-` for stdin
        file: PathBuf,
        /// Columns to show, in order (defaults to the first row's keys)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Cap a column's width
        #[arg(short = 'w', long = "max-width", value_name = "COLUMN=WIDTH", value_parser = parse_max_width)]
        max_widths: Vec<(String, usize)>,
        /// Override a column's header
        #[arg(short, long = "title", value_name = "COLUMN=TITLE", value_parser = parse_pair)]
        titles: Vec<(String, String)>,
    },
    /// Ask to pick one of several options
    Choose {
        /// Question shown above the options
        prompt: String,
        /// Options to choose from
        #[arg(required = true)]
        options: Vec<String>,
    },
    /// Wait, printing a progress dot every second
    Wait {
        /// Seconds to wait (clamped to 0-60)
        #[arg(short, long, default_value = "3", value_parser = FloatRange::new(Some(0.0), Some(60.0)).clamp(true))]
        seconds: f64,
    },
    /// Show the config file and table defaults
    Config,
}

/// Parse a `KEY=VALUE` argument.
fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' must be in COLUMN=VALUE form"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("'{raw}' has an empty column name"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parse a `COLUMN=WIDTH` argument.
fn parse_max_width(raw: &str) -> Result<(String, usize), String> {
    let (column, width) = parse_pair(raw)?;
    let width = width
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid width in '{raw}': {e}"))?;
    Ok((column, width))
}
