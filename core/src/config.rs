use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// When false, new or edited due dates earlier than today are rejected.
    pub allow_past_due_dates: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            allow_past_due_dates: true,
        }
    }
}

impl StoreConfig {
    /// Reads `config.json` from `dir`. A missing file yields the defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::load_from_dir(dir.path()).unwrap();
        assert!(config.allow_past_due_dates);
    }

    #[test]
    fn test_reads_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"allowPastDueDates": false}"#).unwrap();
        let config = StoreConfig::load_from_dir(dir.path()).unwrap();
        assert!(!config.allow_past_due_dates);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "not json").unwrap();
        assert!(StoreConfig::load_from_dir(dir.path()).is_err());
    }
}
