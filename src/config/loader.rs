//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the analysis
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{AnalysisError, AnalysisResult};

use super::types::AnalysisConfig;

/// Loads and validates the analysis configuration.
///
/// # File Format
///
/// ```text
/// satisfaction_threshold: 4
/// high_engagement_label: High
/// qualifying_percentage_threshold: 50.0
/// rounding_precision: 2
/// rounding_mode: half_away_from_zero   # or half_even
/// malformed_rows: permissive           # drop_malformed, fail_fast
/// parallelism: 0
/// ```
///
/// Omitted keys take their defaults.
///
/// # Example
///
/// ```no_run
/// use engagement_analysis::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/analysis.yaml").unwrap();
/// println!("Threshold: {}", loader.config().satisfaction_threshold);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AnalysisConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or unknown enum values
    /// - A value fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AnalysisError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, config = ?loader.config, "Loaded analysis configuration");
        Ok(loader)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> AnalysisResult<Self> {
        Self::parse(content, "<inline>")
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    fn parse(content: &str, origin: &str) -> AnalysisResult<Self> {
        // An empty document deserializes to unit, not to a defaulted struct
        let config: AnalysisConfig = if content.trim().is_empty() {
            AnalysisConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| AnalysisError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?
        };

        Self::from_config(config)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AnalysisConfig {
        self.config
    }
}
