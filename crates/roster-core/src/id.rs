//! Record identity generation
//!
//! New and duplicated records get their identity from an injectable
//! generator so that sheets stay deterministic under test.

use uuid::Uuid;

use crate::RecordId;

/// Source of fresh record identities
pub trait IdGenerator {
    fn next_id(&mut self) -> RecordId;
}

/// Monotonic counter, optionally prefixed (`"c-7"`)
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Start counting at `start`
    pub fn new(start: u64) -> Self {
        Self {
            prefix: String::new(),
            next: start,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Continue after the largest numeric identity already in use. When that
    /// identity is `u64::MAX` counting restarts at 1.
    pub fn after<'a>(ids: impl IntoIterator<Item = &'a RecordId>) -> Self {
        let highest = ids
            .into_iter()
            .filter_map(|id| id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self::new(highest.checked_add(1).unwrap_or(1))
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> RecordId {
        let id = RecordId::new(format!("{}{}", self.prefix, self.next));
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> RecordId {
        RecordId::new(Uuid::new_v4().to_string())
    }
}
