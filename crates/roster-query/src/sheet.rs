//! Sheet state
//!
//! A [`Sheet`] owns a record collection together with the view state a table
//! presentation needs: the search query, filter conditions, the active sort
//! and the row selection. Views are recomputed from that state on demand.
//!
//! The collection is shared copy-on-write: [`Sheet::records`] hands out a
//! snapshot that later mutations never change.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use roster_core::{
    ID_KEY, IdGenerator, RANK_KEY, RankError, Record, RecordId, Result, RosterError, Value,
    check_exact_integer, require_column,
};

use crate::filter_types::{FilterCondition, SortConfig};
use crate::pipeline::filter_records;
use crate::predicate::EvalContext;
use crate::rank::validate_rank;
use crate::selection::SelectionSet;
use crate::sorting::{request_sort, sort_records};

/// A record collection with its search, filter, sort and selection state
#[derive(Debug, Clone)]
pub struct Sheet<R: Record, G: IdGenerator> {
    records: Arc<Vec<R>>,
    ids: G,
    query: String,
    conditions: Vec<FilterCondition>,
    next_condition: u64,
    sort: Option<SortConfig>,
    selection: SelectionSet,
    context: EvalContext,
}

impl<R: Record, G: IdGenerator> Sheet<R, G> {
    /// Wrap a seed collection. Each record must pass [`Record::validate`],
    /// identities must be distinct and no rank may be held twice.
    pub fn new(seed: Vec<R>, ids: G) -> Result<Self> {
        validate_seed(&seed)?;
        Ok(Self {
            records: Arc::new(seed),
            ids,
            query: String::new(),
            conditions: Vec::new(),
            next_condition: 1,
            sort: None,
            selection: SelectionSet::new(),
            context: EvalContext::default(),
        })
    }

    /// Anchor relative date windows on a fixed date
    pub fn with_context(mut self, context: EvalContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> &EvalContext {
        &self.context
    }

    /// Snapshot of the full collection in insertion order
    pub fn records(&self) -> Arc<Vec<R>> {
        Arc::clone(&self.records)
    }

    pub fn record(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Search

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        tracing::debug!(query = %self.query, "search query changed");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    // Filter conditions

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// Append an empty condition on the first column of the schema
    pub fn add_condition(&mut self) -> Result<&FilterCondition> {
        let column = R::columns()
            .first()
            .ok_or_else(|| RosterError::UnknownColumn(String::new()))?;
        let id = format!("filter-{}", self.next_condition);
        self.next_condition += 1;

        tracing::debug!(condition = %id, column = column.key, "filter condition added");
        self.conditions.push(FilterCondition::for_column(id, column));
        Ok(&self.conditions[self.conditions.len() - 1])
    }

    /// Replace the condition with `id`. The replacement keeps that id.
    pub fn update_condition(&mut self, id: &str, mut condition: FilterCondition) -> Result<()> {
        condition.validate(R::columns())?;
        let slot = self.condition_mut(id)?;
        condition.id = slot.id.clone();
        *slot = condition;
        tracing::debug!(condition = %id, "filter condition updated");
        Ok(())
    }

    /// Move a condition to another column, resetting its operator and value
    pub fn set_condition_column(&mut self, id: &str, key: &str) -> Result<()> {
        let column = require_column(R::columns(), key)?;
        self.condition_mut(id)?.set_column(column);
        tracing::debug!(condition = %id, column = key, "filter condition column changed");
        Ok(())
    }

    pub fn remove_condition(&mut self, id: &str) -> Result<FilterCondition> {
        let index = self
            .conditions
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| RosterError::ConditionNotFound(id.to_string()))?;
        tracing::debug!(condition = %id, "filter condition removed");
        Ok(self.conditions.remove(index))
    }

    /// Reset the search query and drop every condition
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.conditions.clear();
        tracing::debug!("filters cleared");
    }

    fn condition_mut(&mut self, id: &str) -> Result<&mut FilterCondition> {
        self.conditions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RosterError::ConditionNotFound(id.to_string()))
    }

    // Sorting

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    /// Sort by `key`, flipping the direction when it is already the
    /// ascending sort key.
    pub fn request_sort(&mut self, key: &str) -> Result<&SortConfig> {
        require_column(R::columns(), key)?;
        let next = request_sort(self.sort.as_ref(), key);
        tracing::debug!(key, direction = next.direction.label(), "sort requested");
        Ok(self.sort.insert(next))
    }

    /// Apply a sort configuration as is
    pub fn set_sort(&mut self, config: SortConfig) -> Result<()> {
        require_column(R::columns(), &config.key)?;
        self.sort = Some(config);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    // Views

    /// Records passing the query and every active condition, in insertion order
    pub fn filtered(&self) -> Vec<&R> {
        filter_records(self.records.iter(), &self.query, &self.conditions, &self.context)
    }

    /// The filtered view in sort order
    pub fn visible(&self) -> Vec<&R> {
        sort_records(self.filtered(), self.sort.as_ref())
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible()
            .into_iter()
            .map(|record| record.id().clone())
            .collect()
    }

    // Selection

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn toggle_selection(&mut self, id: &RecordId) -> Result<()> {
        self.require_record(id)?;
        self.selection.toggle(id);
        Ok(())
    }

    /// Select every visible record, or clear the selection when exactly the
    /// visible records are already selected.
    pub fn toggle_all_visible(&mut self) {
        let visible = self.visible_ids();
        self.selection.toggle_all(&visible);
        tracing::debug!(selected = self.selection.len(), "toggled all visible rows");
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // Commands

    /// Build and append a record under a fresh identity
    pub fn add_record(&mut self, build: impl FnOnce(RecordId) -> R) -> Result<RecordId> {
        let record = build(self.fresh_id());
        let id = record.id().clone();
        if self.record(&id).is_some() {
            return Err(RosterError::InvalidValue {
                column: ID_KEY.to_string(),
                reason: format!("record {} already exists", id),
            });
        }
        if let Some(rank) = record.rank() {
            validate_rank(self.records.as_slice(), rank, &id)?;
        }
        Arc::make_mut(&mut self.records).push(record);
        tracing::debug!(id = %id, "record added");
        Ok(id)
    }

    /// Replace one field of a record. A rank change is checked against the
    /// other records first; a rejected change leaves the record untouched.
    pub fn update_field(&mut self, id: &RecordId, key: &str, value: Value) -> Result<()> {
        let index = self.require_record(id)?;
        let updated = self.records[index].with_field(key, value)?;
        if key == RANK_KEY
            && let Some(rank) = updated.rank()
        {
            validate_rank(self.records.as_slice(), rank, id)?;
        }
        Arc::make_mut(&mut self.records)[index] = updated;
        tracing::debug!(id = %id, column = key, "record field updated");
        Ok(())
    }

    /// Assign or clear the manual rank of a record
    pub fn set_rank(&mut self, id: &RecordId, rank: Option<i64>) -> Result<()> {
        if let Some(rank) = rank {
            check_exact_integer(RANK_KEY, rank)?;
        }
        self.update_field(id, RANK_KEY, Value::from(rank))
    }

    /// Remove a record; it also leaves the selection
    pub fn delete_record(&mut self, id: &RecordId) -> Result<R> {
        let index = self.require_record(id)?;
        let removed = Arc::make_mut(&mut self.records).remove(index);
        self.selection.prune(self.records.iter().map(|r| r.id()));
        tracing::debug!(id = %id, "record deleted");
        Ok(removed)
    }

    /// Append a copy of a record under a fresh identity. The copy does not
    /// inherit the rank.
    pub fn duplicate_record(&mut self, id: &RecordId) -> Result<RecordId> {
        let index = self.require_record(id)?;
        let fresh = self.fresh_id();
        let mut copy = self.records[index].with_id(fresh.clone());
        if copy.rank().is_some() {
            copy = copy.with_field(RANK_KEY, Value::Null)?;
        }
        Arc::make_mut(&mut self.records).push(copy);
        tracing::debug!(source = %id, id = %fresh, "record duplicated");
        Ok(fresh)
    }

    /// Remove every selected record and clear the selection. Returns how many
    /// records were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.records.len();
        if self.selection.is_empty() {
            return 0;
        }
        let selection = std::mem::take(&mut self.selection);
        Arc::make_mut(&mut self.records).retain(|record| !selection.contains(record.id()));
        let removed = before - self.records.len();
        tracing::debug!(removed, "selected records deleted");
        removed
    }

    /// Set one field on every selected record. Either every record is
    /// updated or none is. Ranks cannot be assigned in bulk.
    pub fn bulk_update_field(&mut self, key: &str, value: Value) -> Result<usize> {
        if key == RANK_KEY {
            return Err(RankError::BulkAssignment {
                count: self.selection.len(),
            }
            .into());
        }
        let updates = self
            .selection
            .bulk_apply(self.records.as_slice(), |record| record.with_field(key, value.clone()))
            .into_iter()
            .collect::<Result<Vec<R>>>()?;

        let count = updates.len();
        let records = Arc::make_mut(&mut self.records);
        for updated in updates {
            if let Some(slot) = records.iter_mut().find(|r| r.id() == updated.id()) {
                *slot = updated;
            }
        }
        tracing::debug!(column = key, count, "bulk field update");
        Ok(count)
    }

    fn require_record(&self, id: &RecordId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| RosterError::RecordNotFound(id.clone()))
    }

    /// Next generated identity not already in the collection
    fn fresh_id(&mut self) -> RecordId {
        loop {
            let id = self.ids.next_id();
            if self.record(&id).is_none() {
                return id;
            }
        }
    }
}

fn validate_seed<R: Record>(seed: &[R]) -> Result<()> {
    let mut ids = HashSet::with_capacity(seed.len());
    let mut holders: HashMap<i64, &RecordId> = HashMap::new();
    for record in seed {
        record.validate()?;
        if !ids.insert(record.id()) {
            return Err(RosterError::InvalidValue {
                column: ID_KEY.to_string(),
                reason: format!("record {} appears more than once", record.id()),
            });
        }
        if let Some(rank) = record.rank() {
            if rank < 1 {
                return Err(RankError::NonPositive { rank }.into());
            }
            if let Some(holder) = holders.insert(rank, record.id()) {
                return Err(RankError::Duplicate {
                    rank,
                    holder: holder.clone(),
                }
                .into());
            }
        }
    }
    tracing::debug!(records = seed.len(), ranked = holders.len(), "seed validated");
    Ok(())
}

#[cfg(test)]
mod tests;
