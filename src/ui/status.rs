//! One-line status messages.
//!
//! ```text
//! Deploying stack . . . OK
//! Deploying stack . . . request timed out
//! ```
//!
//! Each helper prints to stdout; the `*_to` variants take any [`Sink`].

use std::io::{self, Write};

use console::Style;

use super::Sink;

/// Message kinds and their styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Bold label, no newline
    Action,
    /// Green bold
    Ok,
    /// Red bold
    Error,
    /// Yellow bold
    Warning,
    /// Blue bold
    Info,
}

impl Status {
    #[must_use]
    pub fn style(self) -> Style {
        match self {
            Self::Action => Style::new().bold(),
            Self::Ok => Style::new().green().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Warning => Style::new().yellow().bold(),
            Self::Info => Style::new().blue().bold(),
        }
    }

    /// Text written for `message`. Errors and warnings follow an action
    /// label on the same line, so they get a leading space.
    #[must_use]
    pub fn text(self, message: &str) -> String {
        match self {
            Self::Error | Self::Warning => format!(" {message}"),
            Self::Action | Self::Ok | Self::Info => message.to_string(),
        }
    }

    const fn newline(self) -> bool {
        !matches!(self, Self::Action)
    }

    /// Write `message` with this status' style.
    pub fn write_to<W: Write>(self, sink: &mut Sink<W>, message: &str) -> io::Result<()> {
        let text = self.text(message);
        if self.newline() {
            sink.writeln(&text, &self.style())
        } else {
            sink.write(&text, &self.style())?;
            sink.flush()
        }
    }

    fn print(self, message: &str) {
        // Same contract as print!: stdout failures are not recoverable here.
        let _ = self.write_to(&mut Sink::stdout(), message);
    }
}

/// Default text printed by [`ok`].
pub const OK: &str = " OK";

pub fn action(message: &str) {
    Status::Action.print(message);
}

pub fn ok() {
    Status::Ok.print(OK);
}

pub fn ok_with(message: &str) {
    Status::Ok.print(message);
}

pub fn error(message: &str) {
    Status::Error.print(message);
}

pub fn warning(message: &str) {
    Status::Warning.print(message);
}

pub fn info(message: &str) {
    Status::Info.print(message);
}

pub fn action_to<W: Write>(sink: &mut Sink<W>, message: &str) -> io::Result<()> {
    Status::Action.write_to(sink, message)
}

pub fn ok_to<W: Write>(sink: &mut Sink<W>) -> io::Result<()> {
    Status::Ok.write_to(sink, OK)
}

pub fn error_to<W: Write>(sink: &mut Sink<W>, message: &str) -> io::Result<()> {
    Status::Error.write_to(sink, message)
}

pub fn warning_to<W: Write>(sink: &mut Sink<W>, message: &str) -> io::Result<()> {
    Status::Warning.write_to(sink, message)
}

pub fn info_to<W: Write>(sink: &mut Sink<W>, message: &str) -> io::Result<()> {
    Status::Info.write_to(sink, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Sink<Vec<u8>>) -> io::Result<()>) -> String {
        let mut sink = Sink::plain(Vec::new());
        f(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn action_has_no_newline() {
        assert_eq!(capture(|s| action_to(s, "Deploying")), "Deploying");
    }

    #[test]
    fn ok_prints_marker_line() {
        assert_eq!(capture(ok_to), " OK\n");
    }

    #[test]
    fn error_and_warning_are_indented() {
        assert_eq!(capture(|s| error_to(s, "boom")), " boom\n");
        assert_eq!(capture(|s| warning_to(s, "careful")), " careful\n");
    }

    #[test]
    fn info_is_not_indented() {
        assert_eq!(capture(|s| info_to(s, "note")), "note\n");
    }

    #[test]
    fn styled_error_is_red() {
        let mut sink = Sink::new(Vec::new(), true);
        error_to(&mut sink, "boom").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("\u{1b}[31m"));
    }
}
