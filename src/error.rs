//! Error types for clickclick.

use thiserror::Error;

/// Errors raised by the presentation helpers.
///
/// Rendering itself never fails on cell data; these cover configuration
/// mistakes, interactive prompts, and command resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// A column cap too small to hold the `..` truncation marker.
    #[error("max width for column '{column}' must be at least 2, got {width}")]
    MaxWidthTooSmall { column: String, width: usize },

    /// A choice prompt was asked with nothing to choose from.
    #[error("no options to choose from")]
    NoOptions,

    /// An abbreviated subcommand matched more than one command.
    #[error("Too many matches: {}", .0.join(", "))]
    AmbiguousCommand(Vec<String>),

    /// The terminal prompt failed (closed stdin, not a tty, ...).
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
