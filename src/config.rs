//! Report configuration, read from a TOML file or the environment.
use crate::{errors::ConfigError, printer::DEFAULT_EXCERPT_LINES};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Environment variable toggling coloured reports.
pub const COLOR_VAR: &str = "MULTI_ASSERT_COLOR";
/// Environment variable overriding the number of trace lines per failure.
pub const EXCERPT_VAR: &str = "MULTI_ASSERT_EXCERPT_LINES";

/// How failure reports are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Colour the report. `colored` still turns colours off when the output
    /// is not a terminal or `NO_COLOR` is set.
    pub color: bool,
    /// Trace lines shown under each failure.
    pub excerpt_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            excerpt_lines: DEFAULT_EXCERPT_LINES,
        }
    }
}

impl Config {
    /// Read a configuration file such as:
    /// ```toml
    /// color = false
    /// excerpt_lines = 5
    /// ```
    /// Missing keys keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, overridden by `MULTI_ASSERT_COLOR` and
    /// `MULTI_ASSERT_EXCERPT_LINES` when set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Values that don't parse are ignored.
    pub fn with_overrides<L>(mut self, lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(COLOR_VAR) {
            match parse_switch(&raw) {
                Some(color) => self.color = color,
                None => warn!("Ignoring {}={:?}", COLOR_VAR, raw),
            }
        }

        if let Some(raw) = lookup(EXCERPT_VAR) {
            match raw.trim().parse() {
                Ok(lines) => self.excerpt_lines = lines,
                Err(_) => warn!("Ignoring {}={:?}", EXCERPT_VAR, raw),
            }
        }
        self
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "always" | "auto" => Some(true),
        "0" | "false" | "no" | "off" | "never" => Some(false),
        _ => None,
    }
}
