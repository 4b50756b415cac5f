//! Column registry
//!
//! The registry is a static, ordered description of the columns a record
//! type exposes. It is fixed at compile time; nothing mutates it at runtime.

use serde::Serialize;

use crate::{DataType, Result, RosterError};

/// Key of the manually assigned rank column
pub const RANK_KEY: &str = "rank";

/// Key under which every record exposes its identity
pub const ID_KEY: &str = "id";

/// Column metadata: a record field key, its display label and declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    /// Record field key
    pub key: &'static str,
    /// Display label (CSV header)
    pub label: &'static str,
    /// Declared value type
    #[serde(rename = "type")]
    pub data_type: DataType,
}

impl ColumnDef {
    pub const fn new(key: &'static str, label: &'static str, data_type: DataType) -> Self {
        Self {
            key,
            label,
            data_type,
        }
    }
}

/// Candidate columns in display order
pub static CANDIDATE_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "Name", DataType::Text),
    ColumnDef::new("email", "Email", DataType::Text),
    ColumnDef::new("phone", "Phone", DataType::Text),
    ColumnDef::new("location", "Location", DataType::Text),
    ColumnDef::new("submittedAt", "Submitted At", DataType::Date),
    ColumnDef::new("workAvailability", "Work Availability", DataType::Text),
    ColumnDef::new(
        "annualSalaryExpectation",
        "Annual Salary Expectation",
        DataType::Number,
    ),
    ColumnDef::new("workExperience", "Work Experience", DataType::Text),
    ColumnDef::new("education", "Education", DataType::Text),
    ColumnDef::new("skills", "Skills", DataType::Text),
    ColumnDef::new("status", "Status", DataType::Text),
    ColumnDef::new("rating", "Rating", DataType::Number),
    ColumnDef::new("starred", "Starred", DataType::Boolean),
    ColumnDef::new(RANK_KEY, "Rank", DataType::Number),
];

/// The candidate column registry
pub fn columns_of() -> &'static [ColumnDef] {
    CANDIDATE_COLUMNS
}

/// Look up a column by key within a registry
pub fn resolve_column(columns: &'static [ColumnDef], key: &str) -> Option<&'static ColumnDef> {
    columns.iter().find(|c| c.key == key)
}

/// Look up a column by key, treating an unknown key as a caller error
pub fn require_column(columns: &'static [ColumnDef], key: &str) -> Result<&'static ColumnDef> {
    resolve_column(columns, key).ok_or_else(|| RosterError::UnknownColumn(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_and_types() {
        let columns = columns_of();
        assert_eq!(columns[0].key, "name");
        assert_eq!(columns[0].label, "Name");
        assert_eq!(
            resolve_column(columns, "submittedAt").map(|c| c.data_type),
            Some(DataType::Date)
        );
        assert_eq!(
            resolve_column(columns, "annualSalaryExpectation").map(|c| c.data_type),
            Some(DataType::Number)
        );
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        assert!(resolve_column(columns_of(), "salary").is_none());
        let err = require_column(columns_of(), "salary").unwrap_err();
        assert!(matches!(err, RosterError::UnknownColumn(ref key) if key == "salary"));
    }

    #[test]
    fn test_column_def_json_shape() {
        let json = serde_json::to_value(columns_of()[12]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "key": "starred", "label": "Starred", "type": "boolean" })
        );
    }
}
