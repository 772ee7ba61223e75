//! Delimited-file boundaries of the analysis.
//!
//! The loader turns a CSV file into typed [`EmployeeRecord`](crate::models::EmployeeRecord)
//! values; the writer emits the result table as CSV.

mod loader;
mod writer;

pub use loader::{
    COLUMN_DEPARTMENT, COLUMN_EMPLOYEE_ID, COLUMN_ENGAGEMENT_LEVEL, COLUMN_JOB_TITLE,
    COLUMN_PROVIDED_SUGGESTIONS, COLUMN_REPORTS_CONCERNS, COLUMN_SATISFACTION_RATING, LoadOutcome,
    load_employees, read_employees,
};
pub use writer::{OUTPUT_HEADER, write_results, write_results_to};
