//! Serialization sinks for analysis records and reports
//!
//! Exports never touch the in-memory record set; a failed write surfaces an
//! `ExportError` with the underlying cause and leaves session state intact.

use crate::review::AnalysisRecord;
use crate::types::{AnalysisError, AnalysisResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize the record set as a pretty-printed JSON array.
///
/// Each element carries `review_id`, `review_text`, `sentiment`,
/// `confidence`, and `aspects` (an array of `{aspect, sentiment}` objects).
pub fn write_records_json<W: Write>(records: &[AnalysisRecord], writer: W) -> AnalysisResult<()> {
    serde_json::to_writer_pretty(writer, records)
        .map_err(|e| AnalysisError::export_error("failed to serialize analysis records", Some(e)))
}

/// Export the record set to a JSON file.
pub fn export_records(records: &[AnalysisRecord], path: impl AsRef<Path>) -> AnalysisResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        AnalysisError::export_error(format!("failed to create {}", path.display()), Some(e))
    })?;
    write_records_json(records, BufWriter::new(file))
}

/// Write a rendered document (summary or recommendations) to a writer.
pub fn write_text<W: Write>(document: &str, mut writer: W) -> AnalysisResult<()> {
    writer
        .write_all(document.as_bytes())
        .map_err(|e| AnalysisError::export_error("failed to write document", Some(e)))
}

/// Export a rendered document to a plain-text file.
pub fn export_text(document: &str, path: impl AsRef<Path>) -> AnalysisResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        AnalysisError::export_error(format!("failed to create {}", path.display()), Some(e))
    })?;
    write_text(document, BufWriter::new(file))
}
