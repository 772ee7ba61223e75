//! Per-department aggregate and result row models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counts for one department, before any threshold is applied.
///
/// `percentage` is kept unrounded so that threshold comparisons are exact.
///
/// # Example
///
/// ```
/// use engagement_analysis::models::DepartmentAggregate;
/// use rust_decimal::Decimal;
///
/// let aggregate = DepartmentAggregate::new("Sales", 4, 1);
/// assert_eq!(aggregate.percentage, Some(Decimal::new(25, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAggregate {
    /// The department name.
    pub department: String,
    /// Every record carrying this department.
    pub total_employees: u64,
    /// Records in this department that passed the predicate filter.
    pub qualifying_employees: u64,
    /// `qualifying_employees * 100 / total_employees`; `None` when the total is zero.
    pub percentage: Option<Decimal>,
}

impl DepartmentAggregate {
    /// Builds an aggregate and derives its percentage.
    pub fn new(department: impl Into<String>, total_employees: u64, qualifying_employees: u64) -> Self {
        Self {
            department: department.into(),
            total_employees,
            qualifying_employees,
            percentage: crate::analysis::compute_percentage(qualifying_employees, total_employees),
        }
    }
}

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The qualifying department.
    pub department: String,
    /// The rounded percentage of qualifying employees.
    pub percentage: Decimal,
}
