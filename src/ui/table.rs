//! Tables with measured columns, truncation and per-value styling.
//!
//! ```text
//! Name    │Status │Last Seen Time
//! web-01  running         2m ago
//! db-0..  stopped         3h ago
//! ```
//!
//! Widths are measured from the formatted values of every row, so each
//! render is two passes over the data: measure, then print.

use std::collections::HashMap;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use console::Style;
use tracing::debug;

use super::Sink;
use super::time::{Clock, SystemClock};
use super::value::{Row, StyleKey, Value, format_value_at, is_time_column};
use crate::Error;

/// Appended to values cut down to their column's max width.
pub const TRUNCATION_MARKER: &str = "..";

/// Separator printed between header titles.
pub const HEADER_SEPARATOR: &str = "│";

/// Time cells younger than this are emphasized.
const RECENT_SECS: f64 = 900.0;
/// Time cells younger than this are highlighted.
const FRESH_SECS: f64 = 3600.0;

/// Per-table rendering options.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    styles: HashMap<StyleKey, Style>,
    titles: HashMap<String, String>,
    max_column_widths: HashMap<String, usize>,
}

impl TableOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Style every cell whose value equals `key`.
    #[must_use]
    pub fn style(mut self, key: impl Into<StyleKey>, style: Style) -> Self {
        self.styles.insert(key.into(), style);
        self
    }

    /// Header text for `column`, replacing the derived title.
    #[must_use]
    pub fn title(mut self, column: impl Into<String>, title: impl Into<String>) -> Self {
        self.titles.insert(column.into(), title.into());
        self
    }

    /// Cap `column` at `width` characters; longer values are truncated.
    #[must_use]
    pub fn max_width(mut self, column: impl Into<String>, width: usize) -> Self {
        self.max_column_widths.insert(column.into(), width);
        self
    }

    /// Layer `other` on top of these options; its entries win.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.styles.extend(other.styles);
        self.titles.extend(other.titles);
        self.max_column_widths.extend(other.max_column_widths);
        self
    }

    /// Reject caps too narrow for the truncation marker.
    pub fn validate(&self) -> crate::Result<()> {
        let mut caps: Vec<_> = self.max_column_widths.iter().collect();
        caps.sort();
        caps.into_iter()
            .find(|(_, width)| **width < TRUNCATION_MARKER.len())
            .map_or(Ok(()), |(column, width)| {
                Err(Error::MaxWidthTooSmall {
                    column: column.clone(),
                    width: *width,
                })
            })
    }

    /// Header text shown for `column`.
    #[must_use]
    pub fn title_for(&self, column: &str) -> String {
        self.titles
            .get(column)
            .cloned()
            .unwrap_or_else(|| default_title(column))
    }

    #[must_use]
    pub fn max_width_for(&self, column: &str) -> Option<usize> {
        self.max_column_widths.get(column).copied()
    }

    #[must_use]
    pub fn style_for(&self, value: &Value) -> Style {
        value
            .style_key()
            .and_then(|key| self.styles.get(&key))
            .cloned()
            .unwrap_or_else(Style::new)
    }

    pub fn titles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.titles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn max_column_widths(&self) -> impl Iterator<Item = (&str, usize)> {
        self.max_column_widths.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn styles(&self) -> impl Iterator<Item = (&StyleKey, &Style)> {
        self.styles.iter()
    }
}

/// Derived header for a column identifier: `last_seen_time` becomes
/// `Last Seen Time`.
#[must_use]
pub fn default_title(column: &str) -> String {
    let mut title = String::with_capacity(column.len());
    let mut in_word = false;
    for c in column.chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            in_word = false;
            title.push(if c == '_' { ' ' } else { c });
        }
    }
    title
}

/// Cut `text` to `max_width` characters, ending in the truncation marker.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    let keep = max_width.saturating_sub(TRUNCATION_MARKER.len());
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl Align {
    /// Numbers, booleans and set time cells are right-aligned; everything
    /// else, including nulls, is left-aligned.
    #[must_use]
    pub fn of(column: &str, value: &Value) -> Self {
        if value.is_numeric()
            || matches!(value, Value::Bool(_))
            || (is_time_column(column) && !value.is_null())
        {
            Self::Right
        } else {
            Self::Left
        }
    }

    #[must_use]
    pub fn pad(self, text: &str, width: usize) -> String {
        match self {
            Self::Left => format!("{text:<width$}"),
            Self::Right => format!("{text:>width$}"),
        }
    }
}

/// Renders rows of [`Value`]s as an aligned text table.
#[derive(Debug, Clone)]
pub struct TableRenderer<C: Clock = SystemClock> {
    options: TableOptions,
    clock: C,
}

impl TableRenderer<SystemClock> {
    pub fn new(options: TableOptions) -> crate::Result<Self> {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> TableRenderer<C> {
    pub fn with_clock(options: TableOptions, clock: C) -> crate::Result<Self> {
        options.validate()?;
        Ok(Self { options, clock })
    }

    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Width of each column: the widest of its title and formatted values,
    /// capped by the column's max width.
    pub fn column_widths<S: AsRef<str>>(
        &self,
        columns: &[S],
        rows: &[Row],
        now: DateTime<Utc>,
    ) -> Vec<usize> {
        columns
            .iter()
            .map(|column| {
                let column = column.as_ref();
                let cap = self.options.max_width_for(column);
                rows.iter().fold(
                    self.options.title_for(column).chars().count(),
                    |width, row| {
                        let len = format_value_at(column, row.get(column), now)
                            .chars()
                            .count();
                        let width = width.max(len);
                        cap.map_or(width, |cap| width.min(cap))
                    },
                )
            })
            .collect()
    }

    /// Write the header and every row to `sink`.
    pub fn render<S, W>(&self, sink: &mut Sink<W>, columns: &[S], rows: &[Row]) -> io::Result<()>
    where
        S: AsRef<str>,
        W: Write,
    {
        let now = self.clock.now();
        let widths = self.column_widths(columns, rows, now);
        debug!(?widths, rows = rows.len(), "rendering table");

        self.render_header(sink, columns, &widths)?;
        for row in rows {
            self.render_row(sink, columns, &widths, row, now)?;
        }
        sink.flush()
    }

    fn render_header<S, W>(
        &self,
        sink: &mut Sink<W>,
        columns: &[S],
        widths: &[usize],
    ) -> io::Result<()>
    where
        S: AsRef<str>,
        W: Write,
    {
        let style = header_style();
        for (i, (column, &width)) in columns.iter().zip(widths).enumerate() {
            let title = self.options.title_for(column.as_ref());
            sink.write(&Align::Left.pad(&title, width), &style)?;
            if i + 1 < columns.len() {
                sink.write(HEADER_SEPARATOR, &style)?;
            }
        }
        sink.newline()
    }

    fn render_row<S, W>(
        &self,
        sink: &mut Sink<W>,
        columns: &[S],
        widths: &[usize],
        row: &Row,
        now: DateTime<Utc>,
    ) -> io::Result<()>
    where
        S: AsRef<str>,
        W: Write,
    {
        for (column, &width) in columns.iter().zip(widths) {
            let column = column.as_ref();
            let value = row.get(column);
            let align = Align::of(column, value);
            let style = self.cell_style(column, value, now);

            let mut text = format_value_at(column, value, now);
            if let Some(cap) = self.options.max_width_for(column)
                && text.chars().count() > cap
            {
                text = truncate(&text, cap);
            }

            sink.write(&align.pad(&text, width), &style)?;
            sink.write(" ", &Style::new())?;
        }
        sink.newline()
    }

    /// Style for one cell: the value's configured style, overridden by
    /// recency for time columns.
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_style(&self, column: &str, value: &Value, now: DateTime<Utc>) -> Style {
        let base = self.options.style_for(value);
        if !is_time_column(column) {
            return base;
        }
        let Some(ts) = value.as_seconds() else {
            return base;
        };
        let elapsed = now.timestamp_micros() as f64 / 1e6 - ts;
        if elapsed < RECENT_SECS {
            Style::new().green().bold()
        } else if elapsed < FRESH_SECS {
            Style::new().green()
        } else {
            base
        }
    }
}

fn header_style() -> Style {
    Style::new().black().on_white()
}

/// Render a table to stdout.
pub fn print_table<S: AsRef<str>>(
    columns: &[S],
    rows: &[Row],
    options: TableOptions,
) -> crate::Result<()> {
    TableRenderer::new(options)?.render(&mut Sink::stdout(), columns, rows)?;
    Ok(())
}
