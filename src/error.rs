//! Error types for loading, aggregating and labelling rental data.

use std::path::PathBuf;
use thiserror::Error;

use crate::category::CategoryDomain;

/// Failure to turn a delimited source file into a table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data source not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {name}: {message}")]
    Io { name: String, message: String },

    #[error("{name} is empty (no header row)")]
    Empty { name: String },

    #[error("{name} is missing required column '{column}'")]
    MissingColumn { name: String, column: &'static str },

    #[error("{name} line {line}: unparseable date '{value}'")]
    BadDate {
        name: String,
        line: u64,
        value: String,
    },

    #[error("{name} line {line}: {message}")]
    Malformed {
        name: String,
        line: u64,
        message: String,
    },

    #[error("{name} line {line}: {column} value {value} outside {min}..={max}")]
    OutOfRange {
        name: String,
        line: u64,
        column: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// The value column of a grouping produced something that is not a number.
#[derive(Error, Debug, PartialEq)]
pub enum AggregationError {
    #[error("non-numeric value in column '{column}' for group {key}")]
    NonNumeric { column: &'static str, key: String },
}

/// A category code fell outside its fixed domain.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unknown {domain} code {code}")]
pub struct UnknownCategoryError {
    pub domain: CategoryDomain,
    pub code: u8,
}

/// Any failure that aborts a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message() {
        let err = UnknownCategoryError {
            domain: CategoryDomain::Season,
            code: 9,
        };
        assert_eq!(err.to_string(), "unknown season code 9");
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err: PipelineError = LoadError::Empty {
            name: "day.csv".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "day.csv is empty (no header row)");
        assert!(matches!(err, PipelineError::Load(LoadError::Empty { .. })));
    }
}
