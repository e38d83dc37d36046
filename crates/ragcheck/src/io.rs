// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Reading and writing record files
//!
//! Two formats, chosen by extension:
//! - `.jsonl` / `.ndjson`: one record per line, blank lines skipped
//! - anything else: a JSON document, either `{"results": [...]}` or a bare
//!   array of records

use crate::error::{Error, Result};
use crate::record::EvalRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// On-disk record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A single JSON document
    Json,
    /// Newline-delimited JSON
    JsonLines,
}

impl RecordFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "ndjson") => Self::JsonLines,
            _ => Self::Json,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { results: Vec<EvalRecord> },
    Bare(Vec<EvalRecord>),
}

#[derive(Serialize)]
struct WrappedRef<'a> {
    results: &'a [EvalRecord],
}

/// Read records from a file.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<EvalRecord>> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    parse_records(BufReader::new(file), RecordFormat::from_path(path))
}

/// Parse records from a reader.
pub fn parse_records<R: BufRead>(mut reader: R, format: RecordFormat) -> Result<Vec<EvalRecord>> {
    match format {
        RecordFormat::Json => {
            let mut content = String::new();
            reader.read_to_string(&mut content)?;
            Ok(match serde_json::from_str(&content)? {
                Document::Wrapped { results } => results,
                Document::Bare(records) => records,
            })
        }
        RecordFormat::JsonLines => {
            let mut records = Vec::new();
            for (idx, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record = serde_json::from_str(&line).map_err(|source| Error::Record {
                    line: idx + 1,
                    source,
                })?;
                records.push(record);
            }
            Ok(records)
        }
    }
}

/// Write records to a file, creating or truncating it.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[EvalRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(fs::File::create(path)?);
    emit_records(&mut writer, records, RecordFormat::from_path(path))?;
    writer.flush()?;
    Ok(())
}

/// Serialize records to a writer. JSON documents use the `results` wrapper.
pub fn emit_records<W: Write>(
    mut writer: W,
    records: &[EvalRecord],
    format: RecordFormat,
) -> Result<()> {
    match format {
        RecordFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &WrappedRef { results: records })?;
            writeln!(writer)?;
        }
        RecordFormat::JsonLines => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}
