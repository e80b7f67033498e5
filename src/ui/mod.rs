//! Terminal output helpers: status lines, actions, tables and prompts.

mod action;
pub mod prompt;
mod sink;
pub mod status;
pub mod table;
pub mod time;
pub mod value;

pub use action::Action;
pub use prompt::{Choice, choice};
pub use sink::Sink;
pub use table::{TableOptions, TableRenderer, print_table};
pub use time::{Clock, FixedClock, SystemClock, format_time};
pub use value::{Row, StyleKey, Value, format_value};
