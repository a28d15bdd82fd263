//! Error types for dataset loading and analysis.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`LoadError`] - CSV loading and schema errors
//! - [`AnalysisError`] - precondition violations in the analysis core
//! - [`ReportError`] - top-level report orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. The analysis core never
//! retries or suppresses a failure; every precondition violation surfaces
//! immediately as a typed error for the caller to handle.

use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while loading the sales dataset from a CSV file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the file content.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Invalid CSV row.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or headers-only file.
    #[error("Dataset file contains no records")]
    EmptyFile,

    /// Required schema columns missing from the header.
    #[error("Dataset is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// =============================================================================
// Analysis Errors
// =============================================================================

/// Precondition violations raised by the analysis core.
///
/// The core is a pure computation library: it raises these synchronously
/// and leaves recovery entirely to the caller (typically by rendering a
/// "no data" state instead of a chart).
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Operation requires at least one record (mean and min/max are
    /// undefined on an empty dataset).
    #[error("Dataset has no records")]
    EmptyDataset,

    /// Total global sales is zero, so regional shares are undefined.
    #[error("Total global sales is zero; regional percentages are undefined")]
    ZeroTotalSales,

    /// Malformed request: bad `n`, unknown aggregation or column name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// =============================================================================
// Report Errors (top-level)
// =============================================================================

/// Top-level report orchestration errors.
///
/// This is the main error type returned by [`crate::report::build_report`]
/// and the CLI commands. It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Dataset loading error.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Analysis error.
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // LoadError -> ReportError
        let load_err = LoadError::EmptyFile;
        let report_err: ReportError = load_err.into();
        assert!(report_err.to_string().contains("no records"));

        // AnalysisError -> ReportError
        let analysis_err = AnalysisError::InvalidArgument("n must be > 0".into());
        let report_err: ReportError = analysis_err.into();
        assert!(report_err.to_string().contains("n must be > 0"));
    }

    #[test]
    fn test_missing_columns_format() {
        let err = LoadError::MissingColumns(vec!["Year".into(), "Genre".into()]);
        let msg = err.to_string();
        assert!(msg.contains("Year"));
        assert!(msg.contains("Genre"));
    }

}
