//! Optional `dspf.toml` configuration.
//!
//! # Example
//!
//! ```toml
//! output = "json"
//!
//! [indicators]
//! on = [3, 45]
//! ```
//!
//! Command-line flags override these values: an explicit `--output` wins,
//! and `--on` indicators are added to the configured ones.

use std::path::{Path, PathBuf};

use dspf_core::Indicators;
use serde::Deserialize;
use tracing::debug;

use crate::OutputFormat;

/// File looked up in the current directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dspf.toml";

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Default output format.
    pub output: Option<OutputFormat>,
    #[serde(default)]
    pub indicators: IndicatorSettings,
}

/// `[indicators]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndicatorSettings {
    /// Indicators treated as on by `show`.
    #[serde(default)]
    pub on: Vec<u8>,
}

impl Settings {
    /// Configured indicators plus `extra` from the command line.
    pub fn indicators_with(&self, extra: &[u8]) -> Indicators {
        self.indicators
            .on
            .iter()
            .chain(extra)
            .copied()
            .collect()
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Load settings from `explicit`, else from `dspf.toml` in the current
/// directory, else defaults.
///
/// An explicitly named file must exist. Returns a human-readable error
/// string on failure.
pub fn load(explicit: Option<&Path>) -> Result<Settings, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !implicit.is_file() {
                return Ok(Settings::default());
            }
            implicit
        }
    };
    let settings = read_settings(&path)?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(settings)
}

/// Read and parse a settings file.
pub fn read_settings(path: &Path) -> Result<Settings, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_settings(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

fn parse_settings(content: &str) -> Result<Settings, String> {
    let settings: Settings = toml::from_str(content).map_err(|e| e.to_string())?;
    if let Some(bad) = settings
        .indicators
        .on
        .iter()
        .find(|n| !(1..=99).contains(*n))
    {
        return Err(format!("indicator {} is outside 1-99", bad));
    }
    Ok(settings)
}
