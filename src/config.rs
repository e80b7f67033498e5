//! Configuration loading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clickclick::ui::TableOptions;
use console::Style;
use serde::Deserialize;
use tracing::debug;

/// clickclick configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub table: TableConfig,
}

/// Defaults applied to every rendered table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub max_column_widths: BTreeMap<String, usize>,
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    /// Cell value to a dotted console style, e.g. `running = "green.bold"`.
    #[serde(default)]
    pub styles: BTreeMap<String, String>,
}

impl TableConfig {
    /// Table options described by this section.
    pub fn options(&self) -> clickclick::Result<TableOptions> {
        let options = self
            .max_column_widths
            .iter()
            .fold(TableOptions::new(), |o, (col, width)| o.max_width(col, *width));
        let options = self
            .titles
            .iter()
            .fold(options, |o, (col, title)| o.title(col, title));
        let options = self.styles.iter().fold(options, |o, (value, style)| {
            o.style(value.as_str(), Style::from_dotted_str(style))
        });
        options.validate()?;
        Ok(options)
    }
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load configuration from `path`; a missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .table
            .options()
            .with_context(|| format!("Invalid table settings in {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// Get the clickclick config directory.
pub fn config_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("./clickclick"),
        |d| d.config_dir().join("clickclick"),
    )
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.table.max_column_widths.is_empty());
    }

    #[test]
    fn loads_table_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[table]
max_column_widths = { name = 20 }
titles = { last_seen_time = "Seen" }
styles = { running = "green.bold" }
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let options = config.table.options().unwrap();
        assert_eq!(options.max_width_for("name"), Some(20));
        assert_eq!(options.title_for("last_seen_time"), "Seen");
        assert_eq!(
            options.style_for(&"running".into()),
            Style::new().green().bold()
        );
    }

    #[test]
    fn rejects_negative_widths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[table]\nmax_column_widths = { name = -3 }\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn rejects_tiny_widths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[table]\nmax_column_widths = { name = 1 }\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("at least 2"));
    }

    #[test]
    fn config_path_ends_with_file_name() {
        assert!(config_path().ends_with("clickclick/config.toml"));
    }
}
