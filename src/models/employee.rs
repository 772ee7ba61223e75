//! Employee record model.
//!
//! This module defines [`EmployeeRecord`], the typed input row consumed by
//! the aggregation pipeline. Every field is optional because the loader
//! nulls out values it cannot coerce instead of rejecting the row.

use serde::{Deserialize, Serialize};

/// One employee row from the engagement survey dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee identifier. Not checked for uniqueness.
    #[serde(default)]
    pub employee_id: Option<i32>,
    /// The grouping key. A null department belongs to no group.
    #[serde(default)]
    pub department: Option<String>,
    /// Job title, carried through untouched.
    #[serde(default)]
    pub job_title: Option<String>,
    /// Satisfaction score, typically 1 to 5.
    #[serde(default)]
    pub satisfaction_rating: Option<i32>,
    /// Engagement category such as "High", "Medium" or "Low".
    #[serde(default)]
    pub engagement_level: Option<String>,
    /// Whether the employee has reported concerns.
    #[serde(default)]
    pub reports_concerns: Option<bool>,
    /// Whether the employee has provided suggestions.
    #[serde(default)]
    pub provided_suggestions: Option<bool>,
}

impl EmployeeRecord {
    /// Builds a record with only the fields the aggregation reads.
    ///
    /// # Examples
    ///
    /// ```
    /// use engagement_analysis::models::EmployeeRecord;
    ///
    /// let record = EmployeeRecord::new("Sales", 5, "High");
    /// assert_eq!(record.department(), Some("Sales"));
    /// assert_eq!(record.satisfaction_rating, Some(5));
    /// ```
    pub fn new(department: &str, satisfaction_rating: i32, engagement_level: &str) -> Self {
        Self {
            department: Some(department.to_string()),
            satisfaction_rating: Some(satisfaction_rating),
            engagement_level: Some(engagement_level.to_string()),
            ..Self::default()
        }
    }

    /// Returns the department, treating an empty string as null.
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref().filter(|d| !d.is_empty())
    }
}
