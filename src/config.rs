use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::catalog::LabelSet;
use crate::error::{Result, SuggestError};

pub const ENV_LABELS: &str = "SERVICESUGGEST_LABELS";
pub const ENV_MAX_SUGGESTIONS: &str = "SERVICESUGGEST_MAX_SUGGESTIONS";
pub const ENV_WATCH: &str = "SERVICESUGGEST_WATCH";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Label file to index; the built-in marketplace labels when unset.
    pub labels_path: Option<PathBuf>,
    pub max_suggestions: usize,
    /// Rebuild the index when the label file changes.
    pub watch: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            labels_path: None,
            max_suggestions: 10,
            watch: false,
        }
    }
}

impl SuggestConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SuggestError::io(path, e))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overrides fields from `SERVICESUGGEST_*` environment variables.
    ///
    /// Unparsable values are skipped with a warning.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var(ENV_LABELS) {
            self.labels_path = Some(PathBuf::from(path));
        }

        if let Some(max) = var(ENV_MAX_SUGGESTIONS) {
            match max.parse() {
                Ok(val) => self.max_suggestions = val,
                Err(_) => warn!("ignoring {}={:?}: not a number", ENV_MAX_SUGGESTIONS, max),
            }
        }

        if let Some(watch) = var(ENV_WATCH) {
            match watch.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.watch = true,
                "0" | "false" | "no" => self.watch = false,
                _ => warn!("ignoring {}={:?}: not a boolean", ENV_WATCH, watch),
            }
        }
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_suggestions == 0 {
            return Err(SuggestError::InvalidConfig(
                "max_suggestions must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn label_set(&self) -> Result<LabelSet> {
        match &self.labels_path {
            Some(path) => LabelSet::load(path),
            None => Ok(LabelSet::marketplace()),
        }
    }
}
