//! The staged aggregation plan.
//!
//! The pipeline runs a fixed plan of tagged stages:
//!
//! ```text
//! Filter -> CountTotals -> CountQualifying -> Join -> Threshold -> Format
//! ```
//!
//! Each stage is one of the pure functions in this module's siblings, and
//! each execution appends an [`AuditStep`] describing what it did.

use std::time::Instant;

use rayon::ThreadPool;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::{AnalysisConfig, QualifyingCriteria, RoundingMode};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, DepartmentAggregate, EmployeeRecord, ReportSummary,
    ResultRecord,
};

use super::aggregation::{DepartmentCounts, count_by_department, join_counts, par_count_by_department};
use super::predicate::filter_qualifying;
use super::selection::{format_results, select_above_threshold};

/// One tagged stage of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Keep records passing both predicates.
    Filter,
    /// Count all records per department.
    CountTotals,
    /// Count qualifying records per department.
    CountQualifying,
    /// Left-join the two counts and derive percentages.
    Join,
    /// Keep departments strictly above the percentage threshold.
    Threshold,
    /// Round and order the output rows.
    Format,
}

impl Stage {
    /// The plan, in execution order.
    pub const PLAN: [Stage; 6] = [
        Stage::Filter,
        Stage::CountTotals,
        Stage::CountQualifying,
        Stage::Join,
        Stage::Threshold,
        Stage::Format,
    ];

    /// Machine-readable identifier used in audit steps.
    pub fn id(self) -> &'static str {
        match self {
            Stage::Filter => "filter",
            Stage::CountTotals => "count_totals",
            Stage::CountQualifying => "count_qualifying",
            Stage::Join => "join",
            Stage::Threshold => "threshold",
            Stage::Format => "format",
        }
    }

    /// Human-readable stage name.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Filter => "Qualifying Employee Filter",
            Stage::CountTotals => "Department Totals",
            Stage::CountQualifying => "Qualifying Counts",
            Stage::Join => "Left Join",
            Stage::Threshold => "Percentage Threshold",
            Stage::Format => "Result Formatting",
        }
    }
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// One aggregate per observed department, in department order.
    pub aggregates: Vec<DepartmentAggregate>,
    /// Qualifying departments, rounded, in department order.
    pub results: Vec<ResultRecord>,
    /// Headline counts.
    pub summary: ReportSummary,
    /// Stage-by-stage trace.
    pub trace: AuditTrace,
}

/// Runs the plan against a record set.
///
/// # Example
///
/// ```
/// use engagement_analysis::analysis::Pipeline;
/// use engagement_analysis::config::AnalysisConfig;
/// use engagement_analysis::models::EmployeeRecord;
///
/// let config = AnalysisConfig::default();
/// let records = vec![
///     EmployeeRecord::new("D1", 5, "High"),
///     EmployeeRecord::new("D1", 5, "High"),
///     EmployeeRecord::new("D1", 3, "Low"),
/// ];
///
/// let output = Pipeline::new(&config).run(&records);
/// assert_eq!(output.results.len(), 1);
/// assert_eq!(output.results[0].percentage.to_string(), "66.67");
/// assert_eq!(output.trace.steps.len(), 6);
/// ```
pub struct Pipeline<'a> {
    criteria: QualifyingCriteria,
    threshold: Decimal,
    precision: u32,
    rounding_mode: RoundingMode,
    pool: Option<&'a ThreadPool>,
}

impl<'a> Pipeline<'a> {
    /// Creates a sequential pipeline from the configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            criteria: config.criteria(),
            threshold: config.qualifying_percentage_threshold,
            precision: config.rounding_precision,
            rounding_mode: config.rounding_mode,
            pool: None,
        }
    }

    /// Runs the counting stages on the given worker pool.
    pub fn with_pool(mut self, pool: &'a ThreadPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Executes every stage of [`Stage::PLAN`] in order.
    pub fn run(&self, records: &[EmployeeRecord]) -> PipelineOutput {
        let start = Instant::now();
        let mut steps: Vec<AuditStep> = Vec::with_capacity(Stage::PLAN.len());
        let mut warnings: Vec<AuditWarning> = Vec::new();

        // Filter
        let qualifying_records = filter_qualifying(records, &self.criteria);
        record_step(
            &mut steps,
            Stage::Filter,
            json!({
                "records": records.len(),
                "satisfaction_threshold": self.criteria.satisfaction_threshold,
                "high_engagement_label": self.criteria.high_engagement_label,
            }),
            json!({ "qualifying_records": qualifying_records.len() }),
            format!(
                "{} of {} records have satisfaction > {} and engagement '{}'",
                qualifying_records.len(),
                records.len(),
                self.criteria.satisfaction_threshold,
                self.criteria.high_engagement_label
            ),
        );

        // CountTotals
        let totals = self.count(records);
        let without_department = records.len() as u64 - totals.total();
        record_step(
            &mut steps,
            Stage::CountTotals,
            json!({ "records": records.len() }),
            json!({
                "departments": totals.len(),
                "counted_records": totals.total(),
                "records_without_department": without_department,
            }),
            format!(
                "{} records grouped into {} departments",
                totals.total(),
                totals.len()
            ),
        );
        if without_department > 0 {
            warnings.push(AuditWarning {
                code: "NULL_DEPARTMENT".to_string(),
                message: format!(
                    "{} record(s) have no department and were excluded from every group",
                    without_department
                ),
                severity: "low".to_string(),
            });
        }

        // CountQualifying
        let qualifying = self.count(&qualifying_records);
        record_step(
            &mut steps,
            Stage::CountQualifying,
            json!({ "qualifying_records": qualifying_records.len() }),
            json!({
                "departments": qualifying.len(),
                "counted_records": qualifying.total(),
            }),
            format!(
                "{} departments have at least one qualifying employee",
                qualifying.len()
            ),
        );

        // Join
        let aggregates = join_counts(&totals, &qualifying);
        record_step(
            &mut steps,
            Stage::Join,
            json!({
                "total_departments": totals.len(),
                "qualifying_departments": qualifying.len(),
            }),
            json!({ "aggregates": aggregates.len() }),
            format!(
                "{} departments joined; missing qualifying counts treated as 0",
                aggregates.len()
            ),
        );

        // Threshold
        let selected = select_above_threshold(&aggregates, self.threshold);
        record_step(
            &mut steps,
            Stage::Threshold,
            json!({
                "aggregates": aggregates.len(),
                "threshold": self.threshold.to_string(),
            }),
            json!({
                "selected": selected
                    .iter()
                    .map(|a| a.department.as_str())
                    .collect::<Vec<_>>(),
            }),
            format!(
                "{} of {} departments exceed {}%",
                selected.len(),
                aggregates.len(),
                self.threshold
            ),
        );

        // Format
        let results = format_results(&selected, self.precision, self.rounding_mode);
        record_step(
            &mut steps,
            Stage::Format,
            json!({
                "selected": selected.len(),
                "rounding_precision": self.precision,
                "rounding_mode": self.rounding_mode,
            }),
            json!({ "rows": results.len() }),
            format!(
                "{} rows rounded to {} decimal places",
                results.len(),
                self.precision
            ),
        );

        let summary = ReportSummary {
            total_records: records.len() as u64,
            records_without_department: without_department,
            departments_observed: aggregates.len() as u64,
            departments_qualifying: results.len() as u64,
        };

        PipelineOutput {
            aggregates,
            results,
            summary,
            trace: AuditTrace {
                steps,
                warnings,
                duration_us: start.elapsed().as_micros() as u64,
            },
        }
    }

    fn count<T>(&self, records: &[T]) -> DepartmentCounts
    where
        T: std::borrow::Borrow<EmployeeRecord> + Sync,
    {
        match self.pool {
            Some(pool) => pool.install(|| par_count_by_department(records)),
            None => count_by_department(records),
        }
    }
}

fn record_step(
    steps: &mut Vec<AuditStep>,
    stage: Stage,
    input: serde_json::Value,
    output: serde_json::Value,
    reasoning: String,
) {
    debug!(stage = stage.id(), reasoning = %reasoning, "Pipeline stage complete");
    steps.push(AuditStep {
        step_number: steps.len() as u32 + 1,
        stage_id: stage.id().to_string(),
        stage_name: stage.name().to_string(),
        input,
        output,
        reasoning,
    });
}
