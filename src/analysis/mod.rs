//! Aggregation logic for the engagement analysis.
//!
//! This module contains the pure functions behind the report: the
//! qualifying-employee predicate, per-department counting and the left join
//! of totals with qualifying counts, percentage computation with threshold
//! selection and rounding, and the staged pipeline that composes them.

mod aggregation;
mod pipeline;
mod predicate;
mod selection;

pub use aggregation::{
    DepartmentCounts, aggregate_departments, count_by_department, join_counts,
    par_count_by_department,
};
pub use pipeline::{Pipeline, PipelineOutput, Stage};
pub use predicate::{filter_qualifying, is_qualifying};
pub use selection::{compute_percentage, format_results, round_percentage, select_above_threshold};
