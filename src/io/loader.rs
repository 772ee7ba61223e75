//! CSV loading and type coercion for employee records.
//!
//! Columns are located by header name. Rows are read as raw bytes and each
//! field is decoded and coerced to its declared type; what happens to a field
//! that is not UTF-8 or cannot be coerced depends on the configured
//! [`MalformedRowPolicy`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::config::MalformedRowPolicy;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::EmployeeRecord;

/// Header of the employee identifier column.
pub const COLUMN_EMPLOYEE_ID: &str = "EmployeeID";
/// Header of the department column.
pub const COLUMN_DEPARTMENT: &str = "Department";
/// Header of the job title column.
pub const COLUMN_JOB_TITLE: &str = "JobTitle";
/// Header of the satisfaction rating column.
pub const COLUMN_SATISFACTION_RATING: &str = "SatisfactionRating";
/// Header of the engagement level column.
pub const COLUMN_ENGAGEMENT_LEVEL: &str = "EngagementLevel";
/// Header of the reports-concerns column.
pub const COLUMN_REPORTS_CONCERNS: &str = "ReportsConcerns";
/// Header of the provided-suggestions column.
pub const COLUMN_PROVIDED_SUGGESTIONS: &str = "ProvidedSuggestions";

/// Records read from an input plus bookkeeping about what was discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    /// Typed records handed to the pipeline.
    pub records: Vec<EmployeeRecord>,
    /// Data rows read, excluding the header.
    pub rows_read: u64,
    /// Rows skipped under `drop_malformed`.
    pub rows_dropped: u64,
    /// Fields nulled under `permissive`.
    pub fields_nulled: u64,
}

/// Positions of the known columns in the header.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    employee_id: Option<usize>,
    department: usize,
    job_title: Option<usize>,
    satisfaction_rating: usize,
    engagement_level: usize,
    reports_concerns: Option<usize>,
    provided_suggestions: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord, origin: &str) -> AnalysisResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| AnalysisError::MissingColumn {
                path: origin.to_string(),
                column: name.to_string(),
            })
        };

        Ok(Self {
            employee_id: find(COLUMN_EMPLOYEE_ID),
            department: require(COLUMN_DEPARTMENT)?,
            job_title: find(COLUMN_JOB_TITLE),
            satisfaction_rating: require(COLUMN_SATISFACTION_RATING)?,
            engagement_level: require(COLUMN_ENGAGEMENT_LEVEL)?,
            reports_concerns: find(COLUMN_REPORTS_CONCERNS),
            provided_suggestions: find(COLUMN_PROVIDED_SUGGESTIONS),
        })
    }
}

/// A field that failed coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldError {
    column: &'static str,
    value: String,
    expected: &'static str,
}

/// Coerces fields of one row, collecting failures instead of stopping.
struct RowCoercer<'r> {
    row: &'r ByteRecord,
    errors: Vec<FieldError>,
}

impl<'r> RowCoercer<'r> {
    fn new(row: &'r ByteRecord) -> Self {
        Self {
            row,
            errors: Vec::new(),
        }
    }

    /// Missing trailing fields and empty fields are null.
    fn raw(&mut self, index: Option<usize>, column: &'static str) -> Option<&'r str> {
        let row: &'r ByteRecord = self.row;
        let bytes = index
            .and_then(|i| row.get(i))
            .filter(|value| !value.is_empty())?;
        match std::str::from_utf8(bytes) {
            Ok(value) => Some(value),
            Err(_) => {
                self.fail(column, &String::from_utf8_lossy(bytes), "utf-8 text");
                None
            }
        }
    }

    fn text(&mut self, index: Option<usize>, column: &'static str) -> Option<String> {
        self.raw(index, column).map(str::to_string)
    }

    fn integer<T: std::str::FromStr>(&mut self, index: Option<usize>, column: &'static str) -> Option<T> {
        let value = self.raw(index, column)?;
        match value.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.fail(column, value, "integer");
                None
            }
        }
    }

    fn boolean(&mut self, index: Option<usize>, column: &'static str) -> Option<bool> {
        let value = self.raw(index, column)?;
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Some(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            self.fail(column, value, "boolean");
            None
        }
    }

    fn fail(&mut self, column: &'static str, value: &str, expected: &'static str) {
        self.errors.push(FieldError {
            column,
            value: value.to_string(),
            expected,
        });
    }

    fn coerce(mut self, layout: &ColumnLayout) -> (EmployeeRecord, Vec<FieldError>) {
        let record = EmployeeRecord {
            employee_id: self.integer(layout.employee_id, COLUMN_EMPLOYEE_ID),
            department: self.text(Some(layout.department), COLUMN_DEPARTMENT),
            job_title: self.text(layout.job_title, COLUMN_JOB_TITLE),
            satisfaction_rating: self
                .integer(Some(layout.satisfaction_rating), COLUMN_SATISFACTION_RATING),
            engagement_level: self.text(Some(layout.engagement_level), COLUMN_ENGAGEMENT_LEVEL),
            reports_concerns: self.boolean(layout.reports_concerns, COLUMN_REPORTS_CONCERNS),
            provided_suggestions: self
                .boolean(layout.provided_suggestions, COLUMN_PROVIDED_SUGGESTIONS),
        };
        (record, self.errors)
    }
}

/// Loads employee records from a CSV file with a header row.
///
/// # Errors
///
/// - `InputNotFound` if the file does not exist
/// - `InputRead` if the file is not valid CSV or its header is not UTF-8
/// - `MissingColumn` if a required header is absent
/// - `SchemaMismatch` for the first bad field under `fail_fast`
///
/// # Example
///
/// ```no_run
/// use engagement_analysis::config::MalformedRowPolicy;
/// use engagement_analysis::io::load_employees;
///
/// let outcome = load_employees("input/employee_data.csv", MalformedRowPolicy::Permissive)?;
/// println!("Loaded {} records", outcome.records.len());
/// # Ok::<(), engagement_analysis::error::AnalysisError>(())
/// ```
pub fn load_employees<P: AsRef<Path>>(path: P, policy: MalformedRowPolicy) -> AnalysisResult<LoadOutcome> {
    let path = path.as_ref();
    let origin = path.display().to_string();

    let file = File::open(path).map_err(|_| AnalysisError::InputNotFound {
        path: origin.clone(),
    })?;

    read_employees(file, &origin, policy)
}

/// Reads employee records from any CSV source.
///
/// `origin` names the source in errors and logs.
pub fn read_employees<R: Read>(source: R, origin: &str, policy: MalformedRowPolicy) -> AnalysisResult<LoadOutcome> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let read_error = |e: csv::Error| AnalysisError::InputRead {
        path: origin.to_string(),
        message: e.to_string(),
    };

    let headers = reader.headers().map_err(read_error)?.clone();
    let layout = ColumnLayout::from_headers(&headers, origin)?;

    let mut outcome = LoadOutcome::default();

    for row in reader.byte_records() {
        let row = row.map_err(read_error)?;
        let line = row.position().map_or(0, |p| p.line());
        outcome.rows_read += 1;

        let (record, errors) = RowCoercer::new(&row).coerce(&layout);

        if errors.is_empty() {
            outcome.records.push(record);
            continue;
        }

        match policy {
            MalformedRowPolicy::Permissive => {
                for error in &errors {
                    debug!(
                        line,
                        column = error.column,
                        value = %error.value,
                        "Nulling field that failed coercion"
                    );
                }
                outcome.fields_nulled += errors.len() as u64;
                outcome.records.push(record);
            }
            MalformedRowPolicy::DropMalformed => {
                debug!(line, errors = errors.len(), "Dropping malformed row");
                outcome.rows_dropped += 1;
            }
            MalformedRowPolicy::FailFast => {
                let error = &errors[0];
                return Err(AnalysisError::SchemaMismatch {
                    line,
                    column: error.column.to_string(),
                    value: error.value.clone(),
                    expected: error.expected.to_string(),
                });
            }
        }
    }

    if outcome.fields_nulled > 0 || outcome.rows_dropped > 0 {
        warn!(
            origin,
            fields_nulled = outcome.fields_nulled,
            rows_dropped = outcome.rows_dropped,
            "Input contained malformed values"
        );
    }

    info!(
        origin,
        rows_read = outcome.rows_read,
        records = outcome.records.len(),
        "Loaded employee records"
    );

    Ok(outcome)
}
