//! Error types for Roster

use thiserror::Error;

use crate::RecordId;

/// Core error type for Roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Filter condition not found: {0}")]
    ConditionNotFound(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(#[from] RankError),

    #[error("Invalid value for column '{column}': {reason}")]
    InvalidValue { column: String, reason: String },

    #[error("Column '{0}' cannot be modified")]
    ImmutableField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RosterError {
    pub(crate) fn invalid_value(column: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}

/// Why a candidate rank was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    #[error("rank must be a positive integer, got {rank}")]
    NonPositive { rank: i64 },

    #[error("rank {rank} is already held by record {holder}")]
    Duplicate { rank: i64, holder: RecordId },

    #[error("rank cannot be assigned to {count} records at once")]
    BulkAssignment { count: usize },
}

/// Result type alias for Roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
