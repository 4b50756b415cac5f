//! Row selection bookkeeping
//!
//! The selection is a set of record identities. It is not pruned when the
//! visible view shrinks; removing records prunes it explicitly.

use std::collections::BTreeSet;

use roster_core::{Record, RecordId};

/// Identities of the currently selected records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I: IntoIterator<Item = RecordId>>(ids: I) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    /// Select the record if unselected, unselect it otherwise
    pub fn toggle(&mut self, id: &RecordId) {
        if !self.selected.remove(id) {
            self.selected.insert(id.clone());
        }
    }

    /// Clear the selection if it is exactly the visible set; otherwise
    /// select exactly the visible set.
    pub fn toggle_all<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let visible: BTreeSet<RecordId> = visible.into_iter().cloned().collect();
        if self.selected == visible {
            self.selected.clear();
        } else {
            self.selected = visible;
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop every identity that is not among the surviving records.
    /// Returns how many identities were dropped.
    pub fn prune<'a, I>(&mut self, surviving: I) -> usize
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let surviving: BTreeSet<&RecordId> = surviving.into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| surviving.contains(id));
        before - self.selected.len()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected identities in ascending order
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.selected.iter()
    }

    /// Run `f` over the selected records, in collection order
    pub fn bulk_apply<'a, R, T, F>(&self, records: &'a [R], f: F) -> Vec<T>
    where
        R: Record,
        F: FnMut(&'a R) -> T,
    {
        records
            .iter()
            .filter(|record| self.contains(record.id()))
            .map(f)
            .collect()
    }
}

/// Functional form of [`SelectionSet::toggle`]
pub fn toggle_selection(set: &SelectionSet, id: &RecordId) -> SelectionSet {
    let mut next = set.clone();
    next.toggle(id);
    next
}

/// Functional form of [`SelectionSet::toggle_all`]
pub fn toggle_all_selection<'a, I>(set: &SelectionSet, visible: I) -> SelectionSet
where
    I: IntoIterator<Item = &'a RecordId>,
{
    let mut next = set.clone();
    next.toggle_all(visible);
    next
}

/// Functional form of [`SelectionSet::prune`]
pub fn prune_selection<'a, I>(set: &SelectionSet, surviving: I) -> SelectionSet
where
    I: IntoIterator<Item = &'a RecordId>,
{
    let mut next = set.clone();
    next.prune(surviving);
    next
}
