//! Shared fixtures for roster-query integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use roster_core::{Candidate, ColumnDef, RecordId, columns_of, resolve_column, seed_candidates};
use roster_query::{EvalContext, FilterCondition, FilterOperator};

pub fn ctx() -> EvalContext {
    EvalContext::new(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap())
}

pub fn records() -> Vec<Candidate> {
    seed_candidates()
}

pub fn column(key: &str) -> &'static ColumnDef {
    resolve_column(columns_of(), key).unwrap_or_else(|| panic!("no column {key}"))
}

pub fn condition(key: &str, operator: FilterOperator, value: &str) -> FilterCondition {
    FilterCondition::for_column(format!("{key}-{operator}"), column(key))
        .with_operator(operator)
        .with_value(value)
}

pub fn ids(records: &[&Candidate]) -> Vec<RecordId> {
    records.iter().map(|r| r.id.clone()).collect()
}
