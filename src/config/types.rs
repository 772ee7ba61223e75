//! Configuration types for the engagement analysis.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from a YAML configuration file. Every field has a
//! default, so an empty file yields the built-in configuration.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Largest number of decimal places a `Decimal` can carry.
pub const MAX_ROUNDING_PRECISION: u32 = 28;

/// How a percentage is rounded when it sits exactly on a midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 50.125 becomes 50.13, matching SQL-style `ROUND` on decimals.
    #[default]
    HalfAwayFromZero,
    /// 50.125 becomes 50.12 (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    /// Returns the equivalent `rust_decimal` strategy.
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfAwayFromZero => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// What the loader does with a field it cannot coerce to its column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRowPolicy {
    /// Keep the row and null out the bad field.
    #[default]
    Permissive,
    /// Skip the whole row.
    DropMalformed,
    /// Abort the load with a `SchemaMismatch` error.
    FailFast,
}

/// The predicate thresholds that decide whether an employee qualifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingCriteria {
    /// Ratings strictly above this value count as highly satisfied.
    pub satisfaction_threshold: i32,
    /// The engagement label that counts as highly engaged (exact match).
    pub high_engagement_label: String,
}

impl Default for QualifyingCriteria {
    fn default() -> Self {
        Self {
            satisfaction_threshold: default_satisfaction_threshold(),
            high_engagement_label: default_high_engagement_label(),
        }
    }
}

/// The complete analysis configuration.
///
/// # Example
///
/// ```
/// use engagement_analysis::config::{AnalysisConfig, RoundingMode};
///
/// let config: AnalysisConfig = serde_yaml::from_str("rounding_mode: half_even").unwrap();
/// assert_eq!(config.satisfaction_threshold, 4);
/// assert_eq!(config.rounding_mode, RoundingMode::HalfEven);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Satisfaction ratings strictly greater than this qualify.
    pub satisfaction_threshold: i32,
    /// The engagement level that qualifies, compared case-sensitively.
    pub high_engagement_label: String,
    /// Departments whose percentage is strictly greater than this are reported.
    pub qualifying_percentage_threshold: Decimal,
    /// Number of decimal places in the reported percentage.
    pub rounding_precision: u32,
    /// Midpoint rule used when rounding the reported percentage.
    pub rounding_mode: RoundingMode,
    /// Loader behaviour for fields that fail type coercion.
    pub malformed_rows: MalformedRowPolicy,
    /// Worker threads for counting: 0 means one per CPU, 1 means sequential.
    pub parallelism: usize,
}

fn default_satisfaction_threshold() -> i32 {
    4
}

fn default_high_engagement_label() -> String {
    "High".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            satisfaction_threshold: default_satisfaction_threshold(),
            high_engagement_label: default_high_engagement_label(),
            qualifying_percentage_threshold: Decimal::new(50, 0),
            rounding_precision: 2,
            rounding_mode: RoundingMode::default(),
            malformed_rows: MalformedRowPolicy::default(),
            parallelism: 0,
        }
    }
}

impl AnalysisConfig {
    /// Returns the employee-level predicate settings.
    pub fn criteria(&self) -> QualifyingCriteria {
        QualifyingCriteria {
            satisfaction_threshold: self.satisfaction_threshold,
            high_engagement_label: self.high_engagement_label.clone(),
        }
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.high_engagement_label.is_empty() {
            return Err(AnalysisError::InvalidConfig {
                field: "high_engagement_label".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.rounding_precision > MAX_ROUNDING_PRECISION {
            return Err(AnalysisError::InvalidConfig {
                field: "rounding_precision".to_string(),
                message: format!(
                    "must be at most {}, got {}",
                    MAX_ROUNDING_PRECISION, self.rounding_precision
                ),
            });
        }

        if self.qualifying_percentage_threshold.is_sign_negative() {
            return Err(AnalysisError::InvalidConfig {
                field: "qualifying_percentage_threshold".to_string(),
                message: format!(
                    "must not be negative, got {}",
                    self.qualifying_percentage_threshold
                ),
            });
        }

        Ok(())
    }
}
