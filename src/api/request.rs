//! Request types for the engagement analysis API.
//!
//! This module defines the JSON request structure for the `/analyze` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::EmployeeRecord;

/// Request body for the `/analyze` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// The employee records to aggregate. Every field of a record may be null.
    pub records: Vec<EmployeeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_analysis_request() {
        let json = r#"{
            "records": [
                {
                    "employee_id": 1,
                    "department": "Sales",
                    "job_title": "Manager",
                    "satisfaction_rating": 5,
                    "engagement_level": "High",
                    "reports_concerns": false,
                    "provided_suggestions": true
                },
                { "department": null, "satisfaction_rating": 5, "engagement_level": "High" }
            ]
        }"#;

        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.records.len(), 2);
        assert_eq!(request.records[0].department(), Some("Sales"));
        assert_eq!(request.records[1].department(), None);
    }

    #[test]
    fn test_records_field_is_required() {
        let result: Result<AnalysisRequest, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_rating_type_is_rejected() {
        let json = r#"{ "records": [ { "satisfaction_rating": "five" } ] }"#;
        let result: Result<AnalysisRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
