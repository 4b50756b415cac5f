//! Predicate evaluation
//!
//! Evaluates one [`FilterCondition`] against one record. Evaluation never
//! fails: operators that do not belong to the effective data type let the
//! record through, and values that cannot be coerced make every comparison
//! false.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};

use roster_core::{DataType, Record, Value};

use crate::filter_types::{FilterCondition, FilterOperator};

/// Evaluation inputs that do not come from the record or the condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// Reference date for the relative date windows
    pub today: NaiveDate,
}

impl EvalContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context anchored on the local calendar date
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::now()
    }
}

/// Evaluate a single filter condition against a record.
pub fn evaluate<R: Record>(record: &R, condition: &FilterCondition, ctx: &EvalContext) -> bool {
    let raw = record.field(&condition.column);

    // String-sets are compared as their joined text whatever the declared type
    let data_type = match raw {
        Value::List(_) => DataType::Text,
        _ => condition.data_type,
    };
    let cell = raw.flatten();

    evaluate_operator(data_type, &condition.operator, &cell, &condition.value, ctx)
}

/// Evaluate an operator against a (flattened) cell value.
pub fn evaluate_operator(
    data_type: DataType,
    operator: &FilterOperator,
    cell: &Value,
    filter_value: &str,
    ctx: &EvalContext,
) -> bool {
    let outcome = match data_type {
        DataType::Text => evaluate_text(operator, cell, filter_value),
        DataType::Number => evaluate_number(operator, cell, filter_value),
        DataType::Date => evaluate_date(operator, cell, filter_value, ctx),
        DataType::Boolean => evaluate_boolean(operator, cell),
    };

    outcome.unwrap_or_else(|| {
        tracing::trace!(
            operator = %operator,
            data_type = %data_type,
            "operator not defined for data type, passing record"
        );
        true
    })
}

fn evaluate_text(operator: &FilterOperator, cell: &Value, filter_value: &str) -> Option<bool> {
    let cell_lower = cell.to_text().to_lowercase();
    let filter_lower = filter_value.to_lowercase();

    let matched = match operator {
        FilterOperator::Is => cell_lower == filter_lower,
        FilterOperator::IsNot => cell_lower != filter_lower,
        FilterOperator::Contains => cell_lower.contains(&filter_lower),
        FilterOperator::DoesNotContain => !cell_lower.contains(&filter_lower),
        FilterOperator::StartsWith => cell_lower.starts_with(&filter_lower),
        FilterOperator::EndsWith => cell_lower.ends_with(&filter_lower),
        FilterOperator::IsEmpty => is_empty(cell),
        FilterOperator::IsNotEmpty => !is_empty(cell),
        _ => return None,
    };
    Some(matched)
}

fn evaluate_number(operator: &FilterOperator, cell: &Value, filter_value: &str) -> Option<bool> {
    let matched = match operator {
        FilterOperator::IsEmpty => is_empty(cell),
        FilterOperator::IsNotEmpty => !is_empty(cell),
        FilterOperator::Equals
        | FilterOperator::NotEquals
        | FilterOperator::GreaterThan
        | FilterOperator::GreaterThanEqual
        | FilterOperator::LessThan
        | FilterOperator::LessThanEqual => {
            // NaN on either side leaves no ordering, so every comparison is false
            let Some(ordering) = coerce_number(cell).partial_cmp(&parse_number(filter_value))
            else {
                return Some(false);
            };
            match operator {
                FilterOperator::Equals => ordering.is_eq(),
                FilterOperator::NotEquals => ordering.is_ne(),
                FilterOperator::GreaterThan => ordering.is_gt(),
                FilterOperator::GreaterThanEqual => ordering.is_ge(),
                FilterOperator::LessThan => ordering.is_lt(),
                _ => ordering.is_le(),
            }
        }
        _ => return None,
    };
    Some(matched)
}

fn evaluate_date(
    operator: &FilterOperator,
    cell: &Value,
    filter_value: &str,
    ctx: &EvalContext,
) -> Option<bool> {
    let today = ctx.today;
    let date = coerce_date(cell);

    let matched = match operator {
        FilterOperator::IsEmpty => is_empty(cell),
        FilterOperator::IsNotEmpty => !is_empty(cell),
        FilterOperator::Is
        | FilterOperator::IsBefore
        | FilterOperator::IsAfter
        | FilterOperator::IsOnOrBefore
        | FilterOperator::IsOnOrAfter => {
            let (Some(date), Some(target)) = (date, parse_date(filter_value)) else {
                return Some(false);
            };
            match operator {
                FilterOperator::Is => date == target,
                FilterOperator::IsBefore => date < target,
                FilterOperator::IsAfter => date > target,
                FilterOperator::IsOnOrBefore => date <= target,
                _ => date >= target,
            }
        }
        FilterOperator::Last7Days => {
            date.is_some_and(|d| shift(today, -7).is_some_and(|start| d >= start && d <= today))
        }
        FilterOperator::Next30Days => {
            date.is_some_and(|d| shift(today, 30).is_some_and(|end| d >= today && d <= end))
        }
        FilterOperator::IsToday => date == Some(today),
        FilterOperator::IsYesterday => date.is_some() && date == shift(today, -1),
        FilterOperator::IsTomorrow => date.is_some() && date == shift(today, 1),
        _ => return None,
    };
    Some(matched)
}

fn evaluate_boolean(operator: &FilterOperator, cell: &Value) -> Option<bool> {
    match operator {
        FilterOperator::IsTrue => Some(coerce_bool(cell)),
        FilterOperator::IsFalse => Some(!coerce_bool(cell)),
        _ => None,
    }
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// A value is empty when it is falsy or its text form is blank.
pub fn is_empty(value: &Value) -> bool {
    !coerce_bool(value) || value.to_text().trim().is_empty()
}

/// Truthiness of a value:
///
/// | value | result |
/// |---|---|
/// | `Null` | false |
/// | `Bool(b)` | b |
/// | `Number(n)` | n is neither 0 nor NaN |
/// | `Text(s)` | s is non-empty |
/// | `List(_)` | true |
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Text(s) => !s.is_empty(),
        Value::List(_) => true,
    }
}

/// Numeric form of a value; NaN when the value has none.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Null => f64::NAN,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::Text(s) => parse_number(s),
        Value::List(_) => parse_number(&value.to_text()),
    }
}

/// Decimal parse of trimmed text; NaN for empty or non-decimal input.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    let is_decimal = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !is_decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Calendar date of a value, if its text form is a date or timestamp.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Text(s) => parse_date(s),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`.
/// Only the calendar date is kept.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
