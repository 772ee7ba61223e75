//! Per-department counting and the left join of the two counts.
//!
//! Totals and qualifying counts are two independent grouped counts over the
//! same records. [`join_counts`] combines them keyed by department so that a
//! department with no qualifying employees still appears, with a count of 0.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::config::QualifyingCriteria;
use crate::models::{DepartmentAggregate, EmployeeRecord};

use super::predicate::filter_qualifying;

/// Record counts keyed by department, in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentCounts {
    counts: BTreeMap<String, u64>,
}

impl DepartmentCounts {
    /// Creates an empty count table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one record. Records without a department are ignored.
    pub fn observe(&mut self, record: &EmployeeRecord) {
        if let Some(department) = record.department() {
            *self.counts.entry(department.to_string()).or_insert(0) += 1;
        }
    }

    /// Adds another partial count into this one.
    pub fn merge(mut self, other: DepartmentCounts) -> Self {
        for (department, count) in other.counts {
            *self.counts.entry(department).or_insert(0) += count;
        }
        self
    }

    /// Returns the count for a department, or 0 if it was never observed.
    pub fn get(&self, department: &str) -> u64 {
        self.counts.get(department).copied().unwrap_or(0)
    }

    /// Number of distinct departments.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no department was observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every department's count.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates `(department, count)` pairs in department order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(d, c)| (d.as_str(), *c))
    }
}

/// Counts records per non-null department.
///
/// # Examples
///
/// ```
/// use engagement_analysis::analysis::count_by_department;
/// use engagement_analysis::models::EmployeeRecord;
///
/// let records = vec![
///     EmployeeRecord::new("Sales", 5, "High"),
///     EmployeeRecord::new("Sales", 2, "Low"),
///     EmployeeRecord::new("IT", 3, "Medium"),
/// ];
/// let counts = count_by_department(&records);
/// assert_eq!(counts.get("Sales"), 2);
/// assert_eq!(counts.get("IT"), 1);
/// ```
pub fn count_by_department<T>(records: &[T]) -> DepartmentCounts
where
    T: Borrow<EmployeeRecord>,
{
    records
        .iter()
        .fold(DepartmentCounts::new(), |mut counts, record| {
            counts.observe(record.borrow());
            counts
        })
}

/// Parallel version of [`count_by_department`].
///
/// Each rayon shard builds a partial table and the partials are merged by
/// summation, so the result is identical to the sequential count. Runs on
/// whichever rayon pool is current, which lets callers pick the pool with
/// `ThreadPool::install`.
pub fn par_count_by_department<T>(records: &[T]) -> DepartmentCounts
where
    T: Borrow<EmployeeRecord> + Sync,
{
    records
        .par_iter()
        .fold(DepartmentCounts::new, |mut counts, record| {
            counts.observe(record.borrow());
            counts
        })
        .reduce(DepartmentCounts::new, DepartmentCounts::merge)
}

/// Left-joins totals with qualifying counts.
///
/// Every department in `totals` yields exactly one aggregate. A department
/// missing from `qualifying` gets 0. Departments present only in
/// `qualifying` are ignored, since they have no denominator.
pub fn join_counts(totals: &DepartmentCounts, qualifying: &DepartmentCounts) -> Vec<DepartmentAggregate> {
    totals
        .iter()
        .map(|(department, total)| {
            // Qualifying is a subset of total; clamp in case the sources diverge
            let qualifying = qualifying.get(department).min(total);
            DepartmentAggregate::new(department, total, qualifying)
        })
        .collect()
}

/// Runs filter, both counts and the join sequentially.
///
/// # Examples
///
/// ```
/// use engagement_analysis::analysis::aggregate_departments;
/// use engagement_analysis::config::QualifyingCriteria;
/// use engagement_analysis::models::EmployeeRecord;
///
/// let records = vec![
///     EmployeeRecord::new("D1", 5, "High"),
///     EmployeeRecord::new("D1", 5, "High"),
///     EmployeeRecord::new("D1", 3, "Low"),
/// ];
/// let aggregates = aggregate_departments(&records, &QualifyingCriteria::default());
/// assert_eq!(aggregates.len(), 1);
/// assert_eq!(aggregates[0].total_employees, 3);
/// assert_eq!(aggregates[0].qualifying_employees, 2);
/// ```
pub fn aggregate_departments<T>(records: &[T], criteria: &QualifyingCriteria) -> Vec<DepartmentAggregate>
where
    T: Borrow<EmployeeRecord>,
{
    let totals = count_by_department(records);
    let qualifying = count_by_department(&filter_qualifying(records, criteria));
    join_counts(&totals, &qualifying)
}
