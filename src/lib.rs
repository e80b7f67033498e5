//! # clickclick
//!
//! Helpers for friendly command-line output, built on `console`,
//! `dialoguer` and `clap`.
//!
//! - **Status lines**: colored `OK`, error, warning and info messages
//! - **Actions**: a label, progress dots, then `OK` or the error
//! - **Tables**: measured columns, truncation, "time ago" cells and
//!   per-value styling
//! - **Prompts**: pick one of a numbered list of options
//! - **Arguments**: abbreviated subcommands and bounded float options
//!
//! ## Example
//!
//! ```rust
//! use clickclick::ui::{FixedClock, Row, Sink, TableOptions, TableRenderer};
//!
//! let rows = vec![
//!     Row::new().with("name", "web-01").with("cpu", 12),
//!     Row::new().with("name", "db-01").with("cpu", 3),
//! ];
//! let renderer =
//!     TableRenderer::with_clock(TableOptions::new(), FixedClock::at(0)).unwrap();
//!
//! let mut sink = Sink::plain(Vec::new());
//! renderer.render(&mut sink, &["name", "cpu"], &rows).unwrap();
//! let out = String::from_utf8(sink.into_inner()).unwrap();
//! assert_eq!(out, "Name  │Cpu\nweb-01  12 \ndb-01    3 \n");
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod args;
pub mod error;
pub mod ui;

pub use error::Error;

/// Result type for clickclick operations
pub type Result<T> = std::result::Result<T, Error>;
