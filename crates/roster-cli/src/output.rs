//! Terminal table rendering

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use roster_core::{ColumnDef, Record};
use roster_query::{FilterOperator, SelectionSet};

/// Render records as a table with one column per definition. Selected rows
/// are marked in a leading column.
pub fn records_table<R: Record>(
    records: &[&R],
    columns: &[ColumnDef],
    selection: &SelectionSet,
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![String::new(), "ID".to_string()];
    header.extend(columns.iter().map(|c| c.label.to_string()));
    table.set_header(header);

    for record in records {
        let marker = if selection.contains(record.id()) { "*" } else { "" };
        let mut row = vec![marker.to_string(), record.id().to_string()];
        row.extend(columns.iter().map(|c| record.field(c.key).to_text()));
        table.add_row(row);
    }
    table
}

/// Render the column registry with the operators each type offers
pub fn columns_table(columns: &[ColumnDef]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Key", "Label", "Type", "Operators"]);

    for column in columns {
        let operators: Vec<&str> = FilterOperator::for_type(column.data_type)
            .iter()
            .map(|op| op.as_str())
            .collect();
        table.add_row(vec![
            column.key.to_string(),
            column.label.to_string(),
            column.data_type.to_string(),
            operators.join(", "),
        ]);
    }
    table
}
