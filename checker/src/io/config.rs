//! Checker configuration stored in `checker.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::report::ReportFormat;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "checker.toml";

/// Checker configuration (TOML).
///
/// Missing fields default to a text report over the whole catalog,
/// evaluated sequentially. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub format: ReportFormat,

    /// Evaluate catalog entries in parallel. Output order is unchanged.
    pub parallel: bool,

    /// Restrict the report to these pattern ids. Empty means all.
    pub patterns: Vec<String>,
}

impl CheckerConfig {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in &self.patterns {
            if id.trim().is_empty() {
                return Err(anyhow!("patterns must not contain blank ids"));
            }
            if !seen.insert(id.as_str()) {
                return Err(anyhow!("patterns lists '{}' more than once", id));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `CheckerConfig::default()`.
pub fn load_config(path: &Path) -> Result<CheckerConfig> {
    if !path.exists() {
        return Ok(CheckerConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CheckerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
