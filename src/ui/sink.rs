//! Styled output sink.
//!
//! Every fragment the helpers print goes through a [`Sink`], which either
//! applies a `console` style or writes plain text.

use std::io::{self, Stdout, Write};

use console::Style;

/// A writer paired with a decision about whether to emit ANSI styling.
pub struct Sink<W: Write> {
    out: W,
    styled: bool,
}

impl Sink<Stdout> {
    /// Sink on stdout, styled when the terminal supports colors.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), console::colors_enabled())
    }
}

impl<W: Write> Sink<W> {
    #[must_use]
    pub const fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    /// Sink that never emits escape codes.
    #[must_use]
    pub const fn plain(out: W) -> Self {
        Self::new(out, false)
    }

    #[must_use]
    pub const fn is_styled(&self) -> bool {
        self.styled
    }

    /// Write `text` with `style`, without a trailing newline.
    pub fn write(&mut self, text: &str, style: &Style) -> io::Result<()> {
        let styled = style.clone().force_styling(self.styled).apply_to(text);
        write!(self.out, "{styled}")
    }

    /// Write `text` with `style` followed by a newline.
    pub fn writeln(&mut self, text: &str, style: &Style) -> io::Result<()> {
        self.write(text, style)?;
        self.newline()
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Flush pending output; useful after fragments without a newline.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sink_drops_styling() {
        let mut sink = Sink::plain(Vec::new());
        sink.write("hi", &Style::new().red().bold()).unwrap();
        sink.writeln(" there", &Style::new()).unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "hi there\n");
    }

    #[test]
    fn styled_sink_emits_escapes() {
        let mut sink = Sink::new(Vec::new(), true);
        sink.write("hi", &Style::new().green()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("hi"));
    }
}
