//! Report models for the engagement analysis.
//!
//! This module contains the [`AnalysisReport`] envelope and the audit
//! structures that record what every pipeline stage did.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ResultRecord;

/// A single step in the audit trace recording one pipeline stage.
///
/// Each step captures the stage's input, output, and a short explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// Machine-readable stage identifier (e.g. "count_totals").
    pub stage_id: String,
    /// The human-readable name of the stage.
    pub stage_name: String,
    /// Summary of the data entering this stage.
    pub input: serde_json::Value,
    /// Summary of the data leaving this stage.
    pub output: serde_json::Value,
    /// Human-readable explanation of what happened.
    pub reasoning: String,
}

/// A warning generated during analysis.
///
/// Warnings flag data quality issues that don't stop the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for one analysis run.
///
/// # Example
///
/// ```
/// use engagement_analysis::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of pipeline steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during analysis.
    pub warnings: Vec<AuditWarning>,
    /// The total analysis duration in microseconds.
    pub duration_us: u64,
}

/// Headline counts for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Records received by the pipeline.
    pub total_records: u64,
    /// Records dropped from grouping because their department was null.
    pub records_without_department: u64,
    /// Distinct departments observed.
    pub departments_observed: u64,
    /// Departments above the percentage threshold.
    pub departments_qualifying: u64,
}

/// The complete result of an analysis run.
///
/// # Example
///
/// ```
/// use engagement_analysis::models::{AnalysisReport, AuditTrace, ReportSummary};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let report = AnalysisReport {
///     run_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     summary: ReportSummary {
///         total_records: 0,
///         records_without_department: 0,
///         departments_observed: 0,
///         departments_qualifying: 0,
///     },
///     departments: vec![],
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(report.departments.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run finished.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// Headline counts.
    pub summary: ReportSummary,
    /// Qualifying departments in lexicographic order.
    pub departments: Vec<ResultRecord>,
    /// Stage-by-stage audit trace.
    pub audit_trace: AuditTrace,
}
