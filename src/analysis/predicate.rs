//! Qualifying-employee predicate.
//!
//! An employee qualifies when they are both highly satisfied and highly
//! engaged. Null fields never qualify and never raise an error.

use std::borrow::Borrow;

use crate::config::QualifyingCriteria;
use crate::models::EmployeeRecord;

/// Returns true if the record passes both predicates.
///
/// The satisfaction rating must be strictly greater than the threshold and
/// the engagement level must equal the configured label exactly.
///
/// # Examples
///
/// ```
/// use engagement_analysis::analysis::is_qualifying;
/// use engagement_analysis::config::QualifyingCriteria;
/// use engagement_analysis::models::EmployeeRecord;
///
/// let criteria = QualifyingCriteria::default();
/// assert!(is_qualifying(&EmployeeRecord::new("Sales", 5, "High"), &criteria));
/// assert!(!is_qualifying(&EmployeeRecord::new("Sales", 4, "High"), &criteria));
/// assert!(!is_qualifying(&EmployeeRecord::new("Sales", 5, "high"), &criteria));
/// ```
pub fn is_qualifying(record: &EmployeeRecord, criteria: &QualifyingCriteria) -> bool {
    let satisfied = record
        .satisfaction_rating
        .is_some_and(|rating| rating > criteria.satisfaction_threshold);
    let engaged = record
        .engagement_level
        .as_deref()
        .is_some_and(|level| level == criteria.high_engagement_label);

    satisfied && engaged
}

/// Returns references to the records that pass [`is_qualifying`].
pub fn filter_qualifying<'a, T>(records: &'a [T], criteria: &QualifyingCriteria) -> Vec<&'a EmployeeRecord>
where
    T: Borrow<EmployeeRecord>,
{
    records
        .iter()
        .map(Borrow::<EmployeeRecord>::borrow)
        .filter(|record| is_qualifying(record, criteria))
        .collect()
}
