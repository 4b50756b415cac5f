//! Roster Query - Filtering, search, sorting, selection and ranks
//!
//! This crate derives views over a record collection. Every function takes
//! borrowed records and returns borrowed records; nothing here copies or
//! mutates the collection except [`Sheet`], which owns it.

pub mod filter_types;
mod pipeline;
pub mod predicate;
mod rank;
mod search;
mod selection;
mod sheet;
mod sorting;

pub use filter_types::{FilterCondition, FilterOperator, SortConfig, SortDirection};
pub use pipeline::{apply_conditions, apply_query, filter_records};
pub use predicate::{EvalContext, evaluate, evaluate_operator};
pub use rank::{RankIndex, is_rank_valid, validate_rank};
pub use search::matches_query;
pub use selection::{SelectionSet, prune_selection, toggle_all_selection, toggle_selection};
pub use sheet::Sheet;
pub use sorting::{compare_values, request_sort, sort_records};
