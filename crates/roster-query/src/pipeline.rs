//! Filter pipeline
//!
//! Composes the search matcher and the active filter conditions into one pass
//! over a record collection. Every stage preserves input order.

use roster_core::Record;

use crate::filter_types::FilterCondition;
use crate::predicate::{EvalContext, evaluate};
use crate::search::matches_lowercase_query;

/// Keep the records that match the free-text query.
pub fn apply_query<'a, R, I>(records: I, query: &str) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if query.is_empty() {
        return records.into_iter().collect();
    }
    let query_lower = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_lowercase_query(*record, &query_lower))
        .collect()
}

/// Keep the records that satisfy every active condition. Inactive conditions
/// are skipped without being evaluated.
pub fn apply_conditions<'a, R, I>(
    records: I,
    conditions: &[FilterCondition],
    ctx: &EvalContext,
) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut result: Vec<&'a R> = records.into_iter().collect();
    for condition in conditions.iter().filter(|c| c.is_active()) {
        if result.is_empty() {
            break;
        }
        result.retain(|record| evaluate(*record, condition, ctx));
    }
    result
}

/// Search first, then every active condition in sequence (AND semantics).
pub fn filter_records<'a, R, I>(
    records: I,
    query: &str,
    conditions: &[FilterCondition],
    ctx: &EvalContext,
) -> Vec<&'a R>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let searched = apply_query(records, query);
    let searched_count = searched.len();
    let filtered = apply_conditions(searched, conditions, ctx);

    tracing::debug!(
        searched = searched_count,
        matched = filtered.len(),
        active_conditions = conditions.iter().filter(|c| c.is_active()).count(),
        "filtered records"
    );
    filtered
}
