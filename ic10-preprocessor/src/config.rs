use crate::hash::HashFormat;
use crate::lines::Replacement;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preprocessor settings, loadable from a JSON file
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// How define/alias/label names are matched
    pub replacement: Replacement,
    /// How `HASH(...)` values are written
    pub hash_format: HashFormat,
    /// Treat lines made only of `.` padding as blank when minifying
    pub ignore_periods: bool,
    /// Report programs that exceed the chip's line limits
    pub check_limits: bool,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            replacement: Replacement::WholeToken,
            hash_format: HashFormat::Unsigned,
            ignore_periods: false,
            check_limits: true,
        }
    }
}

/// Load configuration from JSON file
pub fn load_config(path: &Path) -> Result<PreprocessorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    let config: PreprocessorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config file '{}'", path.display()))?;
    Ok(config)
}

/// Save configuration to JSON file
pub fn save_config(config: &PreprocessorConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;
    Ok(())
}
