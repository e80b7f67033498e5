//! Single-choice prompts.
//!
//! ```text
//! Which region?
//! 1) eu-west-1
//! 2) us-east-1
//! Please select (1-2): 2
//! ```

use std::fmt::Display;
use std::io::Write;

use console::Style;
use dialoguer::Input;
use tracing::debug;

use super::Sink;
use crate::Error;

/// One selectable option: the value returned and the label shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

impl<T> Choice<T> {
    #[must_use]
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

impl<T: Display> Choice<T> {
    /// Option whose label is the value itself.
    #[must_use]
    pub fn plain(value: T) -> Self {
        let label = value.to_string();
        Self { value, label }
    }
}

impl From<&str> for Choice<String> {
    fn from(s: &str) -> Self {
        Self::plain(s.to_string())
    }
}

impl From<String> for Choice<String> {
    fn from(s: String) -> Self {
        Self::plain(s)
    }
}

impl<T, L: Into<String>> From<(T, L)> for Choice<T> {
    fn from((value, label): (T, L)) -> Self {
        Self::new(value, label)
    }
}

/// The option at 1-based `selection`, if any.
#[must_use]
pub fn select<T>(options: &[Choice<T>], selection: usize) -> Option<&Choice<T>> {
    selection.checked_sub(1).and_then(|i| options.get(i))
}

/// Write the prompt and numbered option list.
pub fn write_options<T, W: Write>(
    sink: &mut Sink<W>,
    prompt: &str,
    options: &[Choice<T>],
) -> std::io::Result<()> {
    let plain = Style::new();
    sink.writeln(prompt, &plain)?;
    for (i, option) in options.iter().enumerate() {
        sink.writeln(&format!("{}) {}", i + 1, option.label), &plain)?;
    }
    Ok(())
}

/// Text of the selection prompt for `count` options.
#[must_use]
pub fn selection_prompt(count: usize) -> String {
    format!("Please select (1-{count})")
}

/// Ask the user to pick one of `options` and return its value.
///
/// Keeps asking until a number in range is entered.
pub fn choice<T: Clone>(prompt: &str, options: &[Choice<T>]) -> crate::Result<T> {
    if options.is_empty() {
        return Err(Error::NoOptions);
    }

    write_options(&mut Sink::stdout(), prompt, options)?;

    let count = options.len();
    let selection = Input::<usize>::new()
        .with_prompt(selection_prompt(count))
        .validate_with(move |n: &usize| -> Result<(), String> {
            if (1..=count).contains(n) {
                Ok(())
            } else {
                Err(format!("Enter a number from 1 to {count}"))
            }
        })
        .interact_text()?;
    debug!(selection, "choice made");

    select(options, selection)
        .map(|c| c.value.clone())
        .ok_or(Error::NoOptions)
}
