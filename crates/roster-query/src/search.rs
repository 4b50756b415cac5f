//! Free-text search across every field of a record

use roster_core::Record;

/// Check whether any field of the record contains the query, ignoring case.
/// An empty query matches every record.
pub fn matches_query<R: Record>(record: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query_lower = query.to_lowercase();
    matches_lowercase_query(record, &query_lower)
}

/// Like [`matches_query`] with the query already lower-cased, so a pass over
/// many records folds it once.
pub(crate) fn matches_lowercase_query<R: Record>(record: &R, query_lower: &str) -> bool {
    record
        .fields()
        .iter()
        .filter(|value| !value.is_null())
        .any(|value| value.to_text().to_lowercase().contains(query_lower))
}
