//! Filter and sort types
//!
//! Shared data structures for filter conditions and sort configuration.
//! These are also the shapes exchanged with a presentation layer as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use roster_core::{ColumnDef, DataType, Result, RosterError, require_column};

/// Filter operators, grouped by the data type they belong to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    // Text (and date) equality
    Is,
    IsNot,

    // String operators
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,

    // Empty operators (every type but boolean)
    IsEmpty,
    IsNotEmpty,

    // Numeric comparison operators
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,

    // Calendar date comparison operators
    IsBefore,
    IsAfter,
    IsOnOrBefore,
    IsOnOrAfter,

    // Relative date windows
    Last7Days,
    Next30Days,
    IsToday,
    IsYesterday,
    IsTomorrow,

    // Boolean operators
    IsTrue,
    IsFalse,

    /// An operator name this engine does not know, kept verbatim so it
    /// serializes back unchanged; passes every record
    Unrecognized(String),
}

const TEXT_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Is,
    FilterOperator::IsNot,
    FilterOperator::Contains,
    FilterOperator::DoesNotContain,
    FilterOperator::StartsWith,
    FilterOperator::EndsWith,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::GreaterThan,
    FilterOperator::GreaterThanEqual,
    FilterOperator::LessThan,
    FilterOperator::LessThanEqual,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

const DATE_OPERATORS: &[FilterOperator] = &[
    FilterOperator::Is,
    FilterOperator::IsBefore,
    FilterOperator::IsAfter,
    FilterOperator::IsOnOrBefore,
    FilterOperator::IsOnOrAfter,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
    FilterOperator::Last7Days,
    FilterOperator::Next30Days,
    FilterOperator::IsToday,
    FilterOperator::IsYesterday,
    FilterOperator::IsTomorrow,
];

const BOOLEAN_OPERATORS: &[FilterOperator] = &[FilterOperator::IsTrue, FilterOperator::IsFalse];

impl FilterOperator {
    /// Operators available for a data type, in display order.
    /// The first one is the default for a freshly chosen column.
    pub fn for_type(data_type: DataType) -> &'static [FilterOperator] {
        match data_type {
            DataType::Text => TEXT_OPERATORS,
            DataType::Number => NUMBER_OPERATORS,
            DataType::Date => DATE_OPERATORS,
            DataType::Boolean => BOOLEAN_OPERATORS,
        }
    }

    /// Default operator of a data type
    pub fn default_for(data_type: DataType) -> FilterOperator {
        Self::for_type(data_type)[0].clone()
    }

    /// Wire name of the operator
    pub fn as_str(&self) -> &str {
        match self {
            Self::Is => "is",
            Self::IsNot => "is_not",
            Self::Contains => "contains",
            Self::DoesNotContain => "does_not_contain",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::IsEmpty => "is_empty",
            Self::IsNotEmpty => "is_not_empty",
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanEqual => "greater_than_equal",
            Self::LessThan => "less_than",
            Self::LessThanEqual => "less_than_equal",
            Self::IsBefore => "is_before",
            Self::IsAfter => "is_after",
            Self::IsOnOrBefore => "is_on_or_before",
            Self::IsOnOrAfter => "is_on_or_after",
            Self::Last7Days => "last_7_days",
            Self::Next30Days => "next_30_days",
            Self::IsToday => "is_today",
            Self::IsYesterday => "is_yesterday",
            Self::IsTomorrow => "is_tomorrow",
            Self::IsTrue => "is_true",
            Self::IsFalse => "is_false",
            Self::Unrecognized(name) => name.as_str(),
        }
    }

    /// Get the display label for the operator
    pub fn label(&self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::Contains => "contains",
            Self::DoesNotContain => "does not contain",
            Self::StartsWith => "starts with",
            Self::EndsWith => "ends with",
            Self::IsEmpty => "is empty",
            Self::IsNotEmpty => "is not empty",
            Self::Equals => "is equal to",
            Self::NotEquals => "is not equal to",
            Self::GreaterThan => "is greater than",
            Self::GreaterThanEqual => "is greater than or equal to",
            Self::LessThan => "is less than",
            Self::LessThanEqual => "is less than or equal to",
            Self::IsBefore => "is before",
            Self::IsAfter => "is after",
            Self::IsOnOrBefore => "is on or before",
            Self::IsOnOrAfter => "is on or after",
            Self::Last7Days => "is in the last 7 days",
            Self::Next30Days => "is in the next 30 days",
            Self::IsToday => "is today",
            Self::IsYesterday => "is yesterday",
            Self::IsTomorrow => "is tomorrow",
            Self::IsTrue => "is checked / is true",
            Self::IsFalse => "is unchecked / is false",
            Self::Unrecognized(_) => "[unrecognized]",
        }
    }

    /// Parse a wire name. Unknown names map to `Unrecognized`.
    pub fn parse(name: &str) -> FilterOperator {
        match name {
            "is" => Self::Is,
            "is_not" => Self::IsNot,
            "contains" => Self::Contains,
            "does_not_contain" => Self::DoesNotContain,
            "starts_with" => Self::StartsWith,
            "ends_with" => Self::EndsWith,
            "is_empty" => Self::IsEmpty,
            "is_not_empty" => Self::IsNotEmpty,
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "greater_than" => Self::GreaterThan,
            "greater_than_equal" => Self::GreaterThanEqual,
            "less_than" => Self::LessThan,
            "less_than_equal" => Self::LessThanEqual,
            "is_before" => Self::IsBefore,
            "is_after" => Self::IsAfter,
            "is_on_or_before" => Self::IsOnOrBefore,
            "is_on_or_after" => Self::IsOnOrAfter,
            "last_7_days" => Self::Last7Days,
            "next_30_days" => Self::Next30Days,
            "is_today" => Self::IsToday,
            "is_yesterday" => Self::IsYesterday,
            "is_tomorrow" => Self::IsTomorrow,
            "is_true" => Self::IsTrue,
            "is_false" => Self::IsFalse,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Returns true if this operator never reads the condition value
    pub fn is_value_less(&self) -> bool {
        matches!(
            self,
            Self::IsEmpty | Self::IsNotEmpty | Self::IsTrue | Self::IsFalse
        )
    }

    /// Returns true if the operator belongs to the data type's operator set
    pub fn is_valid_for(&self, data_type: DataType) -> bool {
        Self::for_type(data_type).contains(self)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterOperator {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        match op {
            FilterOperator::Unrecognized(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// A single filter condition over one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Unique ID for this filter row
    pub id: String,
    /// Column key
    pub column: String,
    /// Filter operator
    pub operator: FilterOperator,
    /// Raw comparison value, ignored by value-less operators
    #[serde(default)]
    pub value: String,
    /// Declared type of `column`, carried so evaluation never re-resolves it
    pub data_type: DataType,
}

impl FilterCondition {
    /// Create an empty condition on `column` with its type's default operator
    pub fn for_column(id: impl Into<String>, column: &ColumnDef) -> Self {
        Self {
            id: id.into(),
            column: column.key.to_string(),
            operator: FilterOperator::default_for(column.data_type),
            value: String::new(),
            data_type: column.data_type,
        }
    }

    /// Point the condition at another column. The operator falls back to the
    /// new type's default and the value is cleared.
    pub fn set_column(&mut self, column: &ColumnDef) {
        self.column = column.key.to_string();
        self.data_type = column.data_type;
        self.operator = FilterOperator::default_for(column.data_type);
        self.value.clear();
    }

    pub fn with_operator(mut self, operator: FilterOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether the condition takes part in filtering: it has a value, or its
    /// operator needs none.
    pub fn is_active(&self) -> bool {
        !self.column.is_empty() && (!self.value.is_empty() || self.operator.is_value_less())
    }

    /// Check the condition against a column registry: the column must exist,
    /// the carried type must match it, and a known operator must suit that
    /// type. Unrecognized operators are accepted and pass every record.
    pub fn validate(&self, columns: &'static [ColumnDef]) -> Result<()> {
        let column = require_column(columns, &self.column)?;
        if column.data_type != self.data_type {
            return Err(RosterError::InvalidValue {
                column: self.column.clone(),
                reason: format!(
                    "condition declares type {} but the column is {}",
                    self.data_type, column.data_type
                ),
            });
        }
        if !matches!(self.operator, FilterOperator::Unrecognized(_))
            && !self.operator.is_valid_for(self.data_type)
        {
            return Err(RosterError::InvalidValue {
                column: self.column.clone(),
                reason: format!(
                    "operator '{}' is not available for {} columns",
                    self.operator, self.data_type
                ),
            });
        }
        Ok(())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort: one column key and a direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column key to sort by
    pub key: String,
    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }
}
