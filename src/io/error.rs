//! Error types and helpers for dataset loading and statistical operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// Input data is missing a required column or holds an unparseable value
    DataFormat {
        /// Name of the offending column
        column: String,
        /// Description of what is wrong with the column
        reason: String,
    },

    /// A population is too small for the requested statistic
    InsufficientData {
        /// Description of the undersized population
        population: String,
        /// Number of observations available
        count: usize,
        /// Minimum number of observations required
        required: usize,
    },

    /// Statistic parameter validation failed before any computation started
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Loaded coordinates or boundary geometry violate structural requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save a rendered scatter plot to disk
    PlotExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataFormat { column, reason } => {
                write!(f, "Malformed input column '{column}': {reason}")
            }
            Self::InsufficientData {
                population,
                count,
                required,
            } => {
                write!(
                    f,
                    "Insufficient data in {population}: {count} observations (need at least {required})"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::PlotExport { path, source } => {
                write!(f, "Failed to export plot to '{}': {source}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            Self::PlotExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create a data format error for a specific column
pub fn data_format(column: &impl ToString, reason: &impl ToString) -> AnalysisError {
    AnalysisError::DataFormat {
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an insufficient data error
pub fn insufficient_data(
    population: &impl ToString,
    count: usize,
    required: usize,
) -> AnalysisError {
    AnalysisError::InsufficientData {
        population: population.to_string(),
        count,
        required,
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AnalysisError {
    AnalysisError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_display_names_column() {
        let err = data_format(&"Cell type", &"column not present in header");
        assert!(err.to_string().contains("Cell type"));
    }

    #[test]
    fn test_insufficient_data_display_reports_counts() {
        let err = insufficient_data(&"population 'Tumour'", 1, 2);
        let message = err.to_string();
        assert!(message.contains("1 observations"));
        assert!(message.contains("at least 2"));
    }
}
