//! CSV export
//!
//! The header row holds the column labels as is. Every data cell is wrapped
//! in double quotes; quote characters inside a value are written unescaped,
//! so a value containing `"` produces CSV that strict readers reject.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use roster_core::{ColumnDef, Record};

const FIELD_DELIMITER: char = ',';
const RECORD_DELIMITER: &str = "\n";
const TEXT_QUALIFIER: char = '"';

/// Errors during CSV export
#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No columns selected for export")]
    NoColumnsSelected,
}

/// Render records as CSV text. Rows are separated by a single newline and
/// the text has no trailing newline.
pub fn to_csv<'a, R, I>(records: I, columns: &[ColumnDef]) -> String
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    std::iter::once(header_line(columns))
        .chain(records.into_iter().map(|record| row_line(record, columns)))
        .collect::<Vec<_>>()
        .join(RECORD_DELIMITER)
}

/// Stream the same text as [`to_csv`] into `writer`. Returns the number of
/// data rows written.
pub fn write_csv<'a, W, R, I>(
    writer: &mut W,
    records: I,
    columns: &[ColumnDef],
) -> Result<usize, CsvExportError>
where
    W: Write,
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if columns.is_empty() {
        return Err(CsvExportError::NoColumnsSelected);
    }

    writer.write_all(header_line(columns).as_bytes())?;

    let mut rows = 0;
    for record in records {
        writer.write_all(RECORD_DELIMITER.as_bytes())?;
        writer.write_all(row_line(record, columns).as_bytes())?;
        rows += 1;
    }
    writer.flush()?;

    tracing::debug!(rows, columns = columns.len(), "exported CSV");
    Ok(rows)
}

/// Write the CSV text to a file, replacing any existing content
pub fn export_to_path<'a, R, I>(
    path: &Path,
    records: I,
    columns: &[ColumnDef],
) -> Result<usize, CsvExportError>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let rows = write_csv(&mut writer, records, columns)?;
    tracing::info!(rows, path = %path.display(), "wrote CSV export");
    Ok(rows)
}

fn header_line(columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| c.label)
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}

fn row_line<R: Record>(record: &R, columns: &[ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| qualify_value(&record.field(c.key).to_text()))
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}

fn qualify_value(value: &str) -> String {
    format!("{}{}{}", TEXT_QUALIFIER, value, TEXT_QUALIFIER)
}
