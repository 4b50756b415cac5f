//! Roster Interchange - Export of record views
//!
//! Renders an ordered record view and a column list as delimited text.

mod csv_export;

pub use csv_export::{CsvExportError, export_to_path, to_csv, write_csv};
