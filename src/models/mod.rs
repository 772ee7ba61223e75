//! Core data models for the engagement analysis.
//!
//! This module contains all the domain models used throughout the engine.

mod department;
mod employee;
mod report;

pub use department::{DepartmentAggregate, ResultRecord};
pub use employee::EmployeeRecord;
pub use report::{AnalysisReport, AuditStep, AuditTrace, AuditWarning, ReportSummary};
