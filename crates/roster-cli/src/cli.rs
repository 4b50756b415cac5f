//! roster - inspect, filter, sort and export the candidate table

mod logging;
mod output;
mod settings;
mod view;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use roster_core::{Candidate, ColumnDef, RecordId, columns_of};
use roster_interchange::{export_to_path, write_csv};
use roster_query::validate_rank;

use crate::logging::{LOG_ENV, LoggingConfig};
use crate::settings::Settings;
use crate::view::{ViewArgs, build_sheet, load_records, select_columns};

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Filter, sort and export the candidate table"
)]
struct Cli {
    /// Settings file (defaults to <config dir>/roster/settings.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `roster_query=trace`
    #[arg(long = "log-level", global = true, env = LOG_ENV, value_name = "FILTER")]
    log_level: Option<String>,

    /// JSON file with an array of candidates (the built-in sample when omitted)
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the column registry and the operators of each column type.
    Columns,
    /// Print the visible records as a table.
    List(ViewArgs),
    /// Write the visible records as CSV.
    Export {
        #[command(flatten)]
        view: ViewArgs,
        /// Output file (stdout when omitted)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
        /// Column keys to export, comma separated (all columns when omitted)
        #[arg(long, value_delimiter = ',', value_name = "KEYS")]
        columns: Vec<String>,
        /// Export only the selected records
        #[arg(long)]
        selected_only: bool,
    },
    /// Check whether a rank can be assigned.
    CheckRank {
        /// Rank to check
        #[arg(allow_negative_numbers = true)]
        rank: i64,
        /// Identity of the record that would receive the rank
        #[arg(long, value_name = "ID")]
        excluding: Option<String>,
    },
    /// Print the effective settings, optionally writing them to the settings file.
    Settings {
        /// Save the effective settings
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    let logging = LoggingConfig::default()
        .with_filter(settings.log_filter.clone())
        .with_filter(cli.log_level.clone())
        .with_log_dir(settings.log_dir.clone());
    let _log_guard = logging::init(logging)?;

    run(cli, settings)
}

fn run(cli: Cli, settings: Settings) -> Result<ExitCode> {
    match cli.command {
        Command::Columns => {
            println!("{}", output::columns_table(columns_of()));
        }
        Command::List(view) => {
            let records = load_records(cli.data.as_deref())?;
            let sheet = build_sheet(records, &view, &settings)?;
            let visible = sheet.visible();
            println!(
                "{}",
                output::records_table(&visible, columns_of(), sheet.selection())
            );
            println!(
                "{} of {} records, {} selected",
                visible.len(),
                sheet.len(),
                sheet.selection().len()
            );
        }
        Command::Export {
            view,
            output,
            columns,
            selected_only,
        } => {
            let columns = select_columns(&columns)?;
            let records = load_records(cli.data.as_deref())?;
            let sheet = build_sheet(records, &view, &settings)?;
            let rows: Vec<&Candidate> = sheet
                .visible()
                .into_iter()
                .filter(|c| !selected_only || sheet.selection().contains(&c.id))
                .collect();

            let count = export_rows(output.as_deref(), rows, &columns, std::io::stdout().lock())?;
            if let Some(path) = &output {
                eprintln!("Exported {} records to {}", count, path.display());
            }
        }
        Command::CheckRank { rank, excluding } => {
            let records = load_records(cli.data.as_deref())?;
            let excluding = RecordId::new(excluding.unwrap_or_default());
            match validate_rank(&records, rank, &excluding) {
                Ok(()) => println!("rank {} is valid", rank),
                Err(reason) => {
                    println!("rank {} is invalid: {}", rank, reason);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::Settings { write } => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
            if write {
                let path = match cli.config {
                    Some(path) => path,
                    None => Settings::settings_path()?,
                };
                settings.save_to(&path)?;
                eprintln!("Wrote {}", path.display());
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Write CSV to `path`, or to `stdout` when no path is given. Both
/// destinations receive the same bytes.
fn export_rows<W: Write>(
    path: Option<&Path>,
    rows: Vec<&Candidate>,
    columns: &[ColumnDef],
    mut stdout: W,
) -> Result<usize> {
    match path {
        Some(path) => export_to_path(path, rows, columns)
            .with_context(|| format!("Failed to export to {:?}", path)),
        None => write_csv(&mut stdout, rows, columns).context("Failed to write CSV"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roster_core::seed_candidates;
    use roster_interchange::to_csv;

    #[test]
    fn test_stdout_and_file_exports_match() {
        let records = seed_candidates();
        let rows: Vec<&Candidate> = records.iter().collect();
        let columns = select_columns(&["name".to_string(), "skills".to_string()]).unwrap();

        let mut stdout = Vec::new();
        let written = export_rows(None, rows.clone(), &columns, &mut stdout).unwrap();
        assert_eq!(written, records.len());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        export_rows(Some(&path), rows.clone(), &columns, std::io::sink()).unwrap();

        let expected = to_csv(rows, &columns);
        assert_eq!(String::from_utf8(stdout).unwrap(), expected);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
        assert!(!expected.ends_with('\n'));
    }
}
