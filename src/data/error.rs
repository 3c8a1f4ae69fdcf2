use thiserror::Error;

/// Schema violations found while turning raw rows into station records.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: '{value}' is not a 4-digit year between {min} and {max}")]
    InvalidYear {
        row: usize,
        value: String,
        min: i32,
        max: i32,
    },

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}, column '{column}': {value} is outside {min}..={max}")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("row {row}, column '{column}': value is empty")]
    EmptyValue { row: usize, column: &'static str },
}

/// Failures of the aggregation routines.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AggregateError {
    #[error("cannot average '{column}' over an empty group")]
    EmptyGroup { column: &'static str },
}
