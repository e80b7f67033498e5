//! CLI commands.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clickclick::ui::{self, Action, Choice, Row, TableOptions, status};
use console::style;
use tracing::debug;

use crate::config::{self, Config};

/// Read rows from a JSON array of objects at `path` (`-` for stdin).
fn read_rows(path: &Path) -> Result<Vec<serde_json::Map<String, serde_json::Value>>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read rows from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of objects", path.display()))
}

/// Columns of the first row, in file order, when none were asked for.
fn default_columns(objects: &[serde_json::Map<String, serde_json::Value>]) -> Vec<String> {
    objects
        .first()
        .map_or_else(Vec::new, |first| first.keys().cloned().collect())
}

pub fn table(
    path: &Path,
    columns: Vec<String>,
    max_widths: Vec<(String, usize)>,
    titles: Vec<(String, String)>,
) -> Result<()> {
    let config = Config::load()?;
    let objects = read_rows(path)?;

    let columns = if columns.is_empty() {
        default_columns(&objects)
    } else {
        columns
    };
    if columns.is_empty() {
        bail!("No columns to show; pass --columns or give rows with fields");
    }

    let flags = max_widths
        .into_iter()
        .fold(TableOptions::new(), |o, (col, width)| o.max_width(col, width));
    let flags = titles
        .into_iter()
        .fold(flags, |o, (col, title)| o.title(col, title));
    let options = config.table.options()?.merge(flags);

    let rows: Vec<Row> = objects
        .into_iter()
        .map(|object| object.into_iter().collect())
        .collect();
    debug!(rows = rows.len(), columns = columns.len(), "rendering rows");

    ui::print_table(&columns, &rows, options)?;
    Ok(())
}

pub fn choose(prompt: &str, options: Vec<String>) -> Result<()> {
    let options: Vec<Choice<String>> = options.into_iter().map(Choice::from).collect();
    let picked = ui::choice(prompt, &options)?;
    println!();
    status::info(&picked);
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wait(seconds: f64) -> Result<()> {
    if !seconds.is_finite() {
        bail!("Cannot wait {seconds} seconds");
    }
    let whole = seconds.floor() as u64;
    let rest = Duration::from_secs_f64(seconds - seconds.floor());

    Action::run(&format!("Waiting {seconds}s"), |action| -> Result<()> {
        for _ in 0..whole {
            std::thread::sleep(Duration::from_secs(1));
            action.progress();
        }
        std::thread::sleep(rest);
        Ok(())
    })
}

pub fn config_cmd() -> Result<()> {
    let path = config::config_path();

    println!();
    println!("{}", style("Config").bold());
    println!();

    if path.exists() {
        status::ok_with(&format!("  {}", path.display()));
    } else {
        status::warning(&format!(" {} (not found, using defaults)", path.display()));
    }
    println!();

    let config = Config::load()?;
    let options = config.table.options()?;

    let mut rows: Vec<Row> = Vec::new();
    for (column, width) in options.max_column_widths() {
        rows.push(
            Row::new()
                .with("column", column)
                .with("setting", "max width")
                .with("value", i64::try_from(width).unwrap_or(i64::MAX)),
        );
    }
    for (column, title) in options.titles() {
        rows.push(
            Row::new()
                .with("column", column)
                .with("setting", "title")
                .with("value", title),
        );
    }
    for (value, style) in &config.table.styles {
        rows.push(
            Row::new()
                .with("column", "*")
                .with("setting", format!("style for '{value}'"))
                .with("value", style.as_str()),
        );
    }
    rows.sort_by_key(|row| (row.get("column").to_string(), row.get("setting").to_string()));

    if rows.is_empty() {
        println!("  {}", style("No table defaults set").dim());
    } else {
        ui::print_table(&["column", "setting", "value"], &rows, TableOptions::new())?;
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_columns_follow_first_row() {
        let objects: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_value(json!([{"b": 1, "a": 2}, {"c": 3}])).unwrap();
        assert_eq!(default_columns(&objects), ["b", "a"]);
    }

    #[test]
    fn default_columns_keep_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"[{"zone": "eu", "name": "web", "id": 1}]"#).unwrap();
        let objects = read_rows(&path).unwrap();
        assert_eq!(default_columns(&objects), ["zone", "name", "id"]);
        assert!(default_columns(&[]).is_empty());
    }

    #[test]
    fn read_rows_rejects_non_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, r#"{"name": "x"}"#).unwrap();
        assert!(read_rows(&path).is_err());

        std::fs::write(&path, r#"[{"name": "x", "up": true}]"#).unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
