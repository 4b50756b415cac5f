//! Rank validation
//!
//! A rank is a positive integer held by at most one record. A rank update
//! that breaks this is rejected before it is applied.

use std::collections::HashMap;

use roster_core::{RankError, Record, RecordId};

/// Check a candidate rank for the record `excluding`: the rank must be at
/// least 1 and no other record may hold it.
pub fn validate_rank<R: Record>(
    records: &[R],
    candidate: i64,
    excluding: &RecordId,
) -> Result<(), RankError> {
    if candidate < 1 {
        return Err(RankError::NonPositive { rank: candidate });
    }
    match records
        .iter()
        .find(|record| record.id() != excluding && record.rank() == Some(candidate))
    {
        Some(holder) => Err(RankError::Duplicate {
            rank: candidate,
            holder: holder.id().clone(),
        }),
        None => Ok(()),
    }
}

/// Boolean form of [`validate_rank`]
pub fn is_rank_valid<R: Record>(records: &[R], candidate: i64, excluding: &RecordId) -> bool {
    validate_rank(records, candidate, excluding).is_ok()
}

/// Rank → holder index for validating many updates against one snapshot
#[derive(Debug, Clone, Default)]
pub struct RankIndex {
    holders: HashMap<i64, RecordId>,
}

impl RankIndex {
    pub fn build<R: Record>(records: &[R]) -> Self {
        let holders = records
            .iter()
            .filter_map(|record| record.rank().map(|rank| (rank, record.id().clone())))
            .collect();
        Self { holders }
    }

    pub fn holder(&self, rank: i64) -> Option<&RecordId> {
        self.holders.get(&rank)
    }

    /// Same contract as [`validate_rank`]
    pub fn validate(&self, candidate: i64, excluding: &RecordId) -> Result<(), RankError> {
        if candidate < 1 {
            return Err(RankError::NonPositive { rank: candidate });
        }
        match self.holders.get(&candidate) {
            Some(holder) if holder != excluding => Err(RankError::Duplicate {
                rank: candidate,
                holder: holder.clone(),
            }),
            _ => Ok(()),
        }
    }

    /// Record that `id` now holds `rank` (or no rank), releasing its old one
    pub fn assign(&mut self, id: &RecordId, rank: Option<i64>) {
        self.holders.retain(|_, holder| holder != id);
        if let Some(rank) = rank {
            self.holders.insert(rank, id.clone());
        }
    }
}
