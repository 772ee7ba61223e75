//! Configuration loading and management for the engagement analysis.
//!
//! This module provides functionality to load the analysis thresholds,
//! rounding rules and loader policy from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use engagement_analysis::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/analysis.yaml").unwrap();
//! println!("Engagement label: {}", config.config().high_engagement_label);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnalysisConfig, MAX_ROUNDING_PRECISION, MalformedRowPolicy, QualifyingCriteria, RoundingMode,
};
