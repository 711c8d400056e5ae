//! Turns a [`ResultSet`] into table, JSON or CSV output.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cthru_api::types::{DatasetDescriptor, Record, ResultSet};
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::CthruError;

/// Printed instead of an empty table.
pub const NO_RESULTS: &str = "No results found.";

const MAX_CELL_WIDTH: usize = 40;
/// Column cap when the dataset has no catalogued fields to pick from.
const MAX_FALLBACK_COLUMNS: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CthruError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(CthruError::InvalidInput(format!(
                "unknown format '{}'. Valid values: table, json, csv",
                s
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OutputFormat::Table => "table",
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
            }
        )
    }
}

/// Where rendered output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

/// Columns shown for table output.
///
/// Known fields that occur in at least one record, in registry order. When
/// that leaves nothing (uncatalogued dataset, or no overlap), falls back to
/// record keys in first-seen order, capped at eight.
pub fn columns_for(dataset: &DatasetDescriptor, records: &[Record]) -> Vec<String> {
    derive_columns(dataset, records, Some(MAX_FALLBACK_COLUMNS))
}

/// Columns written to CSV. Same as [`columns_for`] but the record-key
/// fallback is never capped, so no field is dropped.
pub fn csv_columns_for(dataset: &DatasetDescriptor, records: &[Record]) -> Vec<String> {
    derive_columns(dataset, records, None)
}

fn derive_columns(
    dataset: &DatasetDescriptor,
    records: &[Record],
    fallback_cap: Option<usize>,
) -> Vec<String> {
    let known: Vec<String> = dataset
        .known_fields
        .iter()
        .filter(|f| records.iter().any(|r| r.contains_key(&f.name)))
        .map(|f| f.name.clone())
        .collect();
    if !known.is_empty() {
        return known;
    }

    let mut seen: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
    }
    if let Some(cap) = fallback_cap {
        seen.truncate(cap);
    }
    seen
}

/// Plain-text form of a JSON value. Strings are unquoted, null is empty.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Aligned text table, or [`NO_RESULTS`] when there are no records.
pub fn render_table(columns: &[String], records: &[Record]) -> String {
    if records.is_empty() || columns.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(columns.to_vec());
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|c| {
                record
                    .get(c)
                    .map(|v| truncate(&cell_text(v), MAX_CELL_WIDTH))
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(row);
    }
    builder.build().with(Style::psql()).to_string()
}

/// Records as a pretty-printed JSON array, field order untouched.
pub fn write_json<W: Write>(mut writer: W, records: &[Record]) -> Result<(), CthruError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// CSV with a header row. Missing fields are empty cells; quoting follows RFC 4180.
pub fn write_csv<W: Write>(
    writer: W,
    columns: &[String],
    records: &[Record],
) -> Result<(), CthruError> {
    if columns.is_empty() {
        return Ok(());
    }
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns)?;
    for record in records {
        wtr.write_record(
            columns
                .iter()
                .map(|c| record.get(c).map(cell_text).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders into any writer.
pub fn write_to<W: Write>(
    writer: &mut W,
    result: &ResultSet,
    dataset: &DatasetDescriptor,
    format: OutputFormat,
) -> Result<(), CthruError> {
    match format {
        OutputFormat::Table => {
            let columns = columns_for(dataset, &result.records);
            writeln!(writer, "{}", render_table(&columns, &result.records))?;
        }
        OutputFormat::Json => write_json(&mut *writer, &result.records)?,
        OutputFormat::Csv => {
            let columns = csv_columns_for(dataset, &result.records);
            write_csv(&mut *writer, &columns, &result.records)?;
        }
    }
    Ok(())
}

fn render_file(
    path: &Path,
    result: &ResultSet,
    dataset: &DatasetDescriptor,
    format: OutputFormat,
) -> Result<(), CthruError> {
    let file = File::create(path)
        .map_err(|e| CthruError::Render(format!("cannot create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, result, dataset, format)?;
    writer
        .flush()
        .map_err(|e| CthruError::Render(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(())
}

/// Writes the whole result to `destination`.
///
/// The file handle is closed on every path. On failure the file is left as
/// far as it got; callers should not trust it.
pub fn render(
    result: &ResultSet,
    dataset: &DatasetDescriptor,
    format: OutputFormat,
    destination: &Destination,
) -> Result<(), CthruError> {
    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_to(&mut lock, result, dataset, format)?;
            lock.flush()?;
        }
        Destination::File(path) => {
            render_file(path, result, dataset, format)?;
            tracing::debug!("wrote {} records to {}", result.len(), path.display());
        }
    }
    Ok(())
}
