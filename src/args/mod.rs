//! Extensions for clap command-line parsing.

pub mod group;
pub mod range;

pub use group::AliasedGroup;
pub use range::{FloatRange, RangeError};
