//! Metadata-wrapped JSON export.
//!
//! The document layout (`api_url`, `portal_url`, `query_timestamp`,
//! `record_count`, `data`) is consumed by downstream tooling and must not
//! change.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use cthru_api::types::{Record, ResultSet};
use serde::{Deserialize, Serialize};

use crate::error::CthruError;
use crate::filter::FilterSpec;

const MAX_SLUG_LENGTH: usize = 20;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub api_url: String,
    pub portal_url: String,
    pub query_timestamp: String,
    pub record_count: usize,
    pub data: Vec<Record>,
}

impl ExportDocument {
    pub fn from_result(result: &ResultSet) -> Self {
        Self {
            api_url: result.request_url.clone(),
            portal_url: result.portal_url.clone(),
            query_timestamp: result
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            record_count: result.records.len(),
            data: result.records.clone(),
        }
    }
}

/// Filename-safe form of a filter value: non-word characters become `_`,
/// cut to 20 characters, underscores trimmed from both ends.
pub fn slug(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .take(MAX_SLUG_LENGTH)
        .collect();
    replaced.trim_matches('_').to_string()
}

/// `{dataset}[_fy{year}][_{slug}]_{YYYYmmdd_HHMMSS}.json`.
///
/// Second granularity: two exports of the same query within one second get
/// the same name and the later one overwrites.
pub fn export_filename(dataset_id: &str, spec: &FilterSpec, timestamp: DateTime<Utc>) -> String {
    let mut parts = vec![dataset_id.to_string()];
    if let Some(year) = spec.year {
        parts.push(format!("fy{}", year));
    }
    if let Some(text) = spec.primary_text() {
        let s = slug(text);
        if !s.is_empty() {
            parts.push(s);
        }
    }
    parts.push(timestamp.format("%Y%m%d_%H%M%S").to_string());
    format!("{}.json", parts.join("_"))
}

/// Writes the export document to `path`. A failure part-way leaves whatever
/// was written.
pub fn write_export(result: &ResultSet, path: &Path) -> Result<(), CthruError> {
    let file = File::create(path)
        .map_err(|e| CthruError::Render(format!("cannot create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &ExportDocument::from_result(result))?;
    writeln!(writer)?;
    writer
        .flush()
        .map_err(|e| CthruError::Render(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(())
}

/// Derives the filename, writes the export into `dir`, and returns its path.
pub fn save_export(
    dir: &Path,
    dataset_id: &str,
    spec: &FilterSpec,
    result: &ResultSet,
) -> Result<PathBuf, CthruError> {
    let path = dir.join(export_filename(dataset_id, spec, result.timestamp));
    write_export(result, &path)?;
    tracing::debug!("saved {} records to {}", result.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap()
    }

    fn result_set() -> ResultSet {
        let records: Vec<Record> = serde_json::from_value(json!([
            {"vendor": "ACME CORP", "amount": "100.00", "nested": {"k": [1, 2]}},
            {"vendor": "W B MASON", "amount": null}
        ]))
        .unwrap();
        ResultSet {
            records,
            request_url: "https://cthru.data.socrata.com/resource/pegc-naaa.json?%24limit=2"
                .to_string(),
            portal_url: "https://cthru.data.socrata.com/d/pegc-naaa".to_string(),
            timestamp: timestamp(),
        }
    }

    #[test]
    fn slug_replaces_and_trims() {
        assert_eq!(slug("W. B MASON"), "W__B_MASON");
        assert_eq!(slug("  opioid  "), "opioid");
        assert_eq!(slug("!!!"), "");
        assert_eq!(slug("a very long vendor name indeed"), "a_very_long_vendor_n");
    }

    #[test]
    fn filename_with_year_and_vendor() {
        let spec = FilterSpec::default().with_year(2024).with_vendor("W. B Mason");
        assert_eq!(
            export_filename("spending", &spec, timestamp()),
            "spending_fy2024_W__B_Mason_20250307_140509.json"
        );
    }

    #[test]
    fn filename_without_filters() {
        assert_eq!(
            export_filename("revenue", &FilterSpec::default(), timestamp()),
            "revenue_20250307_140509.json"
        );
    }

    #[test]
    fn filename_skips_empty_slug() {
        let spec = FilterSpec::default().with_search("%%%");
        assert_eq!(
            export_filename("settlements", &spec, timestamp()),
            "settlements_20250307_140509.json"
        );
    }

    #[test]
    fn filename_is_deterministic() {
        let spec = FilterSpec::default().with_department("Police");
        assert_eq!(
            export_filename("payroll", &spec, timestamp()),
            export_filename("payroll", &spec, timestamp())
        );
    }

    #[test]
    fn document_fields() {
        let doc = ExportDocument::from_result(&result_set());
        assert_eq!(doc.api_url, result_set().request_url);
        assert_eq!(doc.portal_url, "https://cthru.data.socrata.com/d/pegc-naaa");
        assert_eq!(doc.query_timestamp, "2025-03-07T14:05:09Z");
        assert_eq!(doc.record_count, 2);
    }

    #[test]
    fn document_key_order() {
        let text = serde_json::to_string(&ExportDocument::from_result(&result_set())).unwrap();
        let keys = ["api_url", "portal_url", "query_timestamp", "record_count", "data"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(&format!("\"{}\"", k)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let result = result_set();
        let spec = FilterSpec::default().with_vendor("acme");
        let path = save_export(dir.path(), "spending", &spec, &result).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "spending_acme_20250307_140509.json"
        );

        let text = std::fs::read_to_string(&path).unwrap();
        let doc: ExportDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.record_count, doc.data.len());
        assert_eq!(doc.data, result.records);
    }

    #[test]
    fn export_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let mut result = result_set();
        result.records.clear();
        let path = dir.path().join("empty.json");
        write_export(&result, &path).unwrap();
        let doc: ExportDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc.record_count, 0);
        assert!(doc.data.is_empty());
    }

    #[test]
    fn export_to_bad_path_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_export(&result_set(), &dir.path().join("missing/x.json")).unwrap_err();
        assert!(matches!(err, CthruError::Render(_)));
    }
}
