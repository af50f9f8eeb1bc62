//! Input validation errors
//!
//! The simulator itself never fails. These errors are raised by the checked
//! entry points before a run starts.

use thiserror::Error;

/// An input record or policy parameter that breaks a simulation precondition
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("debt at position {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate debt id {id:?}")]
    DuplicateId { id: String },

    #[error("debt {id:?}: {field} must be a finite number (got {value})")]
    NonFinite {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("debt {id:?}: {field} must be non-negative (got {value:.2})")]
    Negative {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("debt {id:?}: due day must be between 1 and 31 (got {due_day})")]
    DueDay { id: String, due_day: u8 },

    #[error("{field} must be a finite, non-negative amount (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("lump sum month must be at least 1 (got {month})")]
    LumpSumMonth { month: u32 },
}

/// Failure while reading input records from CSV
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unknown frequency {value:?} (expected weekly, biweekly or monthly)")]
    UnknownFrequency { row: usize, value: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
