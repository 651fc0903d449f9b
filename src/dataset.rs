//! Delimited-text dataset loading.
//!
//! Datasets are comma-delimited files with a header row. An `id` column is
//! required at load time (records must be addressable in error messages);
//! `clean_text` is required only when a record is actually processed, so a
//! row missing it loads fine and fails later with a [`Error::MissingField`]
//! naming the record. All other columns pass through untouched.
//!
//! Loading is fail-fast: any malformed row aborts the whole load with no
//! partial results.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Name of the required identifier column.
pub const ID_FIELD: &str = "id";
/// Name of the text column the pipeline consumes.
pub const TEXT_FIELD: &str = "clean_text";

/// One immutable dataset record.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Unique record identifier.
    pub id: String,
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create a record with the given id and no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder form: attach one field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// A field value, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A required field value; absence is a [`Error::MissingField`] naming
    /// this record.
    pub fn field(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| Error::missing_field(&self.id, name))
    }

    /// The `clean_text` field the pipeline consumes.
    pub fn clean_text(&self) -> Result<&str> {
        self.field(TEXT_FIELD)
    }
}

/// Load records from a delimited file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::data_load(format!("{}: {}", path.display(), e)))?;
    let records = parse_records(&raw, &path.display().to_string())?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse records from delimited text. `source` names the origin in errors.
///
/// Quoted fields follow RFC 4180: commas, doubled quotes, and line breaks
/// are allowed inside `"..."`.
pub fn parse_records(raw: &str, source: &str) -> Result<Vec<Record>> {
    let rows = parse_rows(raw).map_err(|e| Error::data_load(format!("{}: {}", source, e)))?;
    let mut rows = rows.into_iter();
    let header: Vec<String> = match rows.next() {
        Some(h) => h.into_iter().map(|c| c.trim().to_string()).collect(),
        None => return Err(Error::data_load(format!("{}: empty dataset", source))),
    };
    let id_index = header
        .iter()
        .position(|name| name == ID_FIELD)
        .ok_or_else(|| {
            Error::data_load(format!("{}: header has no '{}' column", source, ID_FIELD))
        })?;
    if !header.iter().any(|name| name == TEXT_FIELD) {
        log::warn!(
            "{}: header has no '{}' column; every sample will fail at processing time",
            source,
            TEXT_FIELD
        );
    }

    let mut records = Vec::new();
    let mut seen_ids: BTreeSet<String> = BTreeSet::new();
    for (i, row) in rows.enumerate() {
        let line = i + 2; // 1-based, after the header
        if row.len() > header.len() {
            return Err(Error::data_load(format!(
                "{}: row at line {} has {} fields, header has {}",
                source,
                line,
                row.len(),
                header.len()
            )));
        }
        let id = row
            .get(id_index)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::data_load(format!("{}: row at line {} has an empty id", source, line))
            })?
            .to_string();
        if !seen_ids.insert(id.clone()) {
            return Err(Error::data_load(format!(
                "{}: duplicate record id '{}' at line {}",
                source, id, line
            )));
        }
        let mut record = Record::new(id);
        for (name, value) in header.iter().zip(row.into_iter()) {
            record.fields.insert(name.clone(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Split raw delimited text into rows of fields, honoring quoting.
fn parse_rows(raw: &str) -> std::result::Result<Vec<Vec<String>>, String> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut field_started = false;
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' if field.is_empty() => {
                    in_quotes = true;
                    field_started = true;
                }
                ',' => {
                    row.push(std::mem::take(&mut field));
                    field_started = true;
                }
                '\r' => {} // part of \r\n, handled at \n
                '\n' => {
                    line += 1;
                    if field_started || !field.is_empty() || !row.is_empty() {
                        row.push(std::mem::take(&mut field));
                        rows.push(std::mem::take(&mut row));
                    }
                    field_started = false;
                }
                _ => field.push(c),
            }
        }
    }
    if in_quotes {
        return Err(format!("unterminated quoted field at line {}", line));
    }
    if field_started || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
