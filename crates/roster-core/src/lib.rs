//! Roster Core - Record model and shared types for the Roster table engine
//!
//! This crate provides the fundamental types that all other
//! Roster crates depend on. It defines:
//!
//! - `Record` - Trait giving typed, per-column access to a row
//! - `Candidate` - The candidate record and its seed collection
//! - `ColumnDef` - The static column registry
//! - `IdGenerator` - Injectable record identity generation
//! - Common types like `Value`, `DataType`, `RecordId`

mod error;
mod id;
mod record;
mod schema;
mod types;

pub use error::*;
pub use id::*;
pub use record::*;
pub use schema::*;
pub use types::*;
