//! Turning command-line view flags into a sheet and its visible rows

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};

use roster_core::{
    Candidate, ColumnDef, RecordId, SequentialIds, columns_of, require_column, seed_candidates,
};
use roster_query::{EvalContext, FilterCondition, FilterOperator, Sheet};

use crate::settings::Settings;

/// Flags shared by every command that shows a view of the records
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Free-text search across every field
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Filter condition, e.g. `location:contains:san` or `email:is_empty`
    #[arg(long = "where", value_name = "COL:OP[:VALUE]", value_parser = parse_where)]
    pub conditions: Vec<FilterCondition>,

    /// JSON file holding an array of filter conditions
    #[arg(long, value_name = "FILE")]
    pub filters: Option<PathBuf>,

    /// Column key to sort by
    #[arg(long, value_name = "KEY")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Reference date for relative date filters
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,

    /// Select a record by identity (repeatable)
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Toggle the selection of every visible record
    #[arg(long)]
    pub select_all: bool,
}

/// Parse `COL:OP[:VALUE]`. Everything after the second colon is the value.
pub fn parse_where(raw: &str) -> Result<FilterCondition, String> {
    let mut parts = raw.splitn(3, ':');
    let key = parts.next().unwrap_or_default().trim();
    let operator_name = parts
        .next()
        .ok_or_else(|| format!("expected COL:OP[:VALUE], got '{raw}'"))?
        .trim();
    let value = parts.next().unwrap_or_default();

    let column = require_column(columns_of(), key).map_err(|e| e.to_string())?;
    let operator = FilterOperator::parse(operator_name);
    if !operator.is_valid_for(column.data_type) {
        let known: Vec<&str> = FilterOperator::for_type(column.data_type)
            .iter()
            .map(|op| op.as_str())
            .collect();
        return Err(format!(
            "operator '{operator_name}' does not apply to {} column '{key}' (expected one of: {})",
            column.data_type,
            known.join(", ")
        ));
    }

    Ok(FilterCondition::for_column(raw, column)
        .with_operator(operator)
        .with_value(value))
}

/// Read an array of filter conditions from a JSON file
pub fn load_filters(path: &Path) -> Result<Vec<FilterCondition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read filters from {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse filter conditions in {:?}", path))
}

/// Read candidates from a JSON file, or fall back to the built-in seed
pub fn load_records(path: Option<&Path>) -> Result<Vec<Candidate>> {
    let Some(path) = path else {
        return Ok(seed_candidates());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {:?}", path))?;
    let records: Vec<Candidate> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records in {:?}", path))?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

/// Build a sheet over `records` with the search, filters and sort the flags
/// and settings ask for.
pub fn build_sheet(
    records: Vec<Candidate>,
    args: &ViewArgs,
    settings: &Settings,
) -> Result<Sheet<Candidate, SequentialIds>> {
    let ids = SequentialIds::after(records.iter().map(|c| &c.id));
    let today = args.today.or(settings.date_override);
    let context = today.map(EvalContext::new).unwrap_or_default();
    let mut sheet = Sheet::new(records, ids)
        .context("Invalid record collection")?
        .with_context(context);

    if let Some(query) = &args.query {
        sheet.set_query(query.as_str());
    }

    let mut conditions = match &args.filters {
        Some(path) => load_filters(path)?,
        None => Vec::new(),
    };
    conditions.extend(args.conditions.iter().cloned());
    for condition in conditions {
        let column = condition.column.clone();
        let id = sheet.add_condition()?.id.clone();
        sheet
            .update_condition(&id, condition)
            .with_context(|| format!("Invalid filter condition on column '{}'", column))?;
    }

    if let Some(sort) = settings.resolve_sort(args.sort.as_deref(), args.desc) {
        let key = sort.key.clone();
        sheet
            .set_sort(sort)
            .with_context(|| format!("Cannot sort by '{}'", key))?;
    } else if args.desc {
        bail!("--desc needs a sort column (--sort KEY or default_sort in settings)");
    }

    for id in &args.select {
        sheet.toggle_selection(&RecordId::from(id.as_str()))?;
    }
    if args.select_all {
        sheet.toggle_all_visible();
    }

    Ok(sheet)
}

/// Pick export columns by key, keeping the requested order. No keys means
/// every column.
pub fn select_columns(keys: &[String]) -> Result<Vec<ColumnDef>> {
    if keys.is_empty() {
        return Ok(columns_of().to_vec());
    }
    keys.iter()
        .map(|key| require_column(columns_of(), key.trim()).copied().map_err(Into::into))
        .collect()
}
