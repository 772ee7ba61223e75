//! Atomic CSV output of the result table.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{AnalysisError, AnalysisResult};
use crate::models::ResultRecord;

/// Output header row.
pub const OUTPUT_HEADER: [&str; 2] = ["Department", "Percentage"];

/// Writes the header and one row per result to any sink.
pub fn write_results_to<W: Write>(sink: W, results: &[ResultRecord]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(OUTPUT_HEADER)?;
    for result in results {
        let percentage = result.percentage.to_string();
        writer.write_record([result.department.as_str(), percentage.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes results to `path`, replacing any existing file.
///
/// The table goes to a temporary file in the destination directory which is
/// then renamed over `path`, so readers see either the old file or the
/// complete new one. Missing parent directories are created.
///
/// # Example
///
/// ```no_run
/// use engagement_analysis::io::write_results;
///
/// write_results("outputs/departments_high_satisfaction.csv", &[])?;
/// # Ok::<(), engagement_analysis::error::AnalysisError>(())
/// ```
pub fn write_results<P: AsRef<Path>>(path: P, results: &[ResultRecord]) -> AnalysisResult<()> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let write_error = |message: String| AnalysisError::OutputWrite {
        path: path_str.clone(),
        message,
    };

    if path.is_dir() {
        return Err(write_error("destination is a directory".to_string()));
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;

    let mut staging = NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    write_results_to(staging.as_file_mut(), results).map_err(|e| write_error(e.to_string()))?;
    staging
        .as_file()
        .sync_all()
        .map_err(|e| write_error(e.to_string()))?;
    staging
        .persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;

    info!(path = %path_str, rows = results.len(), "Wrote result table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_results() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                department: "Finance".to_string(),
                percentage: Decimal::new(6667, 2),
            },
            ResultRecord {
                department: "Research, Europe".to_string(),
                percentage: Decimal::new(10000, 2),
            },
        ]
    }

    #[test]
    fn test_write_to_buffer_formats_rows() {
        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &sample_results()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "Department,Percentage\nFinance,66.67\n\"Research, Europe\",100.00\n"
        );
    }

    #[test]
    fn test_empty_results_write_header_only() {
        let mut buffer = Vec::new();
        write_results_to(&mut buffer, &[]).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "Department,Percentage\n");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs").join("task1").join("report.csv");

        write_results(&path, &sample_results()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Department,Percentage\n"));
        assert!(text.contains("Finance,66.67"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "stale contents that are longer than the new file\n").unwrap();

        write_results(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Department,Percentage\n");
    }

    #[test]
    fn test_write_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_results(&path, &sample_results()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        match write_results(dir.path(), &sample_results()) {
            Err(AnalysisError::OutputWrite { message, .. }) => {
                assert!(message.contains("directory"));
            }
            other => panic!("Expected OutputWrite, got {:?}", other),
        }
    }
}
