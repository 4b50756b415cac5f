//! Sorting for the record view
//!
//! Provides a stable single-key sort with null handling and the
//! toggle rule used when a column header requests a sort.

use std::cmp::Ordering;

use roster_core::{Record, Value};

use crate::filter_types::{SortConfig, SortDirection};

/// Order a record view by the configured key. Records with equal keys keep
/// their relative input order; no configuration keeps the input order.
pub fn sort_records<'a, R, I>(records: I, config: Option<&SortConfig>) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some(config) = config else {
        return records.into_iter().collect();
    };

    // Resolve each key once
    let mut keyed: Vec<(Value, &'a R)> = records
        .into_iter()
        .map(|record| (record.field(&config.key), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_directed(a, b, config.direction));

    tracing::debug!(
        key = %config.key,
        direction = config.direction.label(),
        rows = keyed.len(),
        "sorted records"
    );
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// The sort configuration after a sort is requested on `key`: the same key
/// sorted ascending flips to descending, anything else sorts `key` ascending.
pub fn request_sort(current: Option<&SortConfig>, key: &str) -> SortConfig {
    match current {
        Some(config) if config.key == key && config.direction == SortDirection::Ascending => {
            SortConfig::descending(key)
        }
        _ => SortConfig::ascending(key),
    }
}

fn compare_directed(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    let ordering = compare_values(a, b);
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Compare two values; NULL sorts after every other value.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_non_null_values(a, b),
    }
}

/// Compare two non-null values
fn compare_non_null_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),

        // String-sets and mixed kinds: compare their text forms
        _ => a.to_text().cmp(&b.to_text()),
    }
}
