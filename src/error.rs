//! Error types for the engagement analysis engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur around the aggregation core. The core
//! itself is total over typed input; errors come from configuration, the
//! CSV loader, the writer and context setup.

use thiserror::Error;

/// The main error type for the engagement analysis engine.
///
/// # Example
///
/// ```
/// use engagement_analysis::error::AnalysisError;
///
/// let error = AnalysisError::ConfigNotFound {
///     path: "/missing/analysis.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/analysis.yaml");
/// ```
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The input file does not exist.
    #[error("Input file not found: {path}")]
    InputNotFound {
        /// The path that was not found.
        path: String,
    },

    /// The input file exists but could not be read as delimited text.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The input path.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// A required column is absent from the input header.
    #[error("Input '{path}' is missing required column '{column}'")]
    MissingColumn {
        /// The input path.
        path: String,
        /// The missing column name.
        column: String,
    },

    /// A field could not be coerced to its declared type.
    #[error("Schema mismatch at line {line}, column '{column}': cannot read '{value}' as {expected}")]
    SchemaMismatch {
        /// The 1-based line number in the input file.
        line: u64,
        /// The column holding the bad value.
        column: String,
        /// The raw value.
        value: String,
        /// The declared column type.
        expected: String,
    },

    /// The result table could not be written.
    #[error("Failed to write output '{path}': {message}")]
    OutputWrite {
        /// The output path.
        path: String,
        /// A description of the write error.
        message: String,
    },

    /// The compute context could not be initialized.
    #[error("Failed to initialize analysis context: {message}")]
    ContextInit {
        /// A description of the failure.
        message: String,
    },

    /// The HTTP server failed to bind or serve.
    #[error("Server error: {message}")]
    Server {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return AnalysisError.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
