//! Delimited text reader (CSV/TSV).

use std::path::Path;

use tabcast_model::{
    ConvertError, FileType, Record, RecordSet, Result, TableSet, clean_field_name,
};

use crate::coerce::{BoolWords, coerce_str};
use crate::delimiter::detect_delimiter;
use crate::encoding::decode_bytes;

/// Normalizes delimited text bytes into a flat-table [`RecordSet`].
///
/// Encoding and delimiter are sniffed, headers are cleaned (duplicates
/// after cleaning are preserved as-is), and every cell is coerced. Rows
/// shorter than the header list are padded with explicit nulls; extra
/// trailing cells are dropped.
pub fn normalize_tabular(bytes: &[u8], filename: &str) -> Result<RecordSet> {
    let file_type = dialect_from_extension(filename);
    let decoded = decode_bytes(bytes);
    let delimiter = detect_delimiter(&decoded.text);
    tracing::info!(
        filename,
        file_type = file_type.as_str(),
        encoding = %decoded.encoding,
        delimiter = %delimiter.escape_default(),
        "parsing delimited text"
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ConvertError::MalformedInput {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;

        // Blank lines separate nothing; skip them like pandas does.
        if row.len() == 1 && row.get(0).is_some_and(|field| field.trim().is_empty()) {
            continue;
        }

        match &headers {
            None => {
                headers = Some(row.iter().map(clean_field_name).collect());
            }
            Some(fields) => {
                let mut record = Record::with_capacity(fields.len());
                for (index, field) in fields.iter().enumerate() {
                    let value = row
                        .get(index)
                        .map_or(tabcast_model::Value::Null, |cell| {
                            coerce_str(cell, BoolWords::Tabular)
                        });
                    record.insert(field.clone(), value);
                }
                records.push(record);
            }
        }
    }

    let headers = headers.ok_or_else(|| ConvertError::MalformedInput {
        filename: filename.to_string(),
        message: "no columns to parse".to_string(),
    })?;

    // Raw non-header line count, independent of how many rows parsed.
    let total_rows = decoded.text.lines().count().saturating_sub(1);

    Ok(RecordSet::Table(TableSet {
        filename: filename.to_string(),
        file_type,
        headers,
        records,
        total_rows,
        encoding: decoded.encoding,
        delimiter: Some(delimiter),
    }))
}

fn dialect_from_extension(filename: &str) -> FileType {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("tsv") => FileType::Tsv,
        _ => FileType::Csv,
    }
}
