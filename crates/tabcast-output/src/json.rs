//! Structured JSON output.

use serde_json::{Map, Value as Json, json};

use tabcast_model::{RecordSet, Result, Sheet, TableSet, WorkbookSet};

use crate::OutputFormat;

/// Generates the pretty-printed JSON document with its metadata envelope.
///
/// Two-space indentation; non-ASCII characters are emitted literally.
pub fn generate_json(set: &RecordSet) -> Result<String> {
    let mut root = Map::new();
    match set {
        RecordSet::Table(table) => {
            root.insert(
                "metadata".to_string(),
                Json::Object(table_metadata(table, OutputFormat::Json)),
            );
            root.insert("data".to_string(), records_array(&table.records));
        }
        RecordSet::Workbook(workbook) => {
            root.insert(
                "metadata".to_string(),
                Json::Object(workbook_metadata(workbook, OutputFormat::Json)),
            );
            let mut sheets = Map::new();
            for sheet in &workbook.sheets {
                let mut entry = Map::new();
                entry.insert(
                    "metadata".to_string(),
                    Json::Object(sheet_metadata(sheet)),
                );
                entry.insert("data".to_string(), records_array(&sheet.records));
                sheets.insert(sheet.name.clone(), Json::Object(entry));
            }
            root.insert("sheets".to_string(), Json::Object(sheets));
        }
    }

    let document = Json::Object(root);
    // Encoding a plain JSON value cannot fail; if it ever does, the
    // compact Display form stands in rather than a misleading error.
    Ok(serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string()))
}

pub(crate) fn records_array(records: &[tabcast_model::Record]) -> Json {
    Json::Array(
        records
            .iter()
            .map(|record| Json::Object(record.to_json_map()))
            .collect(),
    )
}

/// Envelope for flat-table sources: identity, counts, headers, and the
/// detection results that produced the table.
pub(crate) fn table_metadata(table: &TableSet, format: OutputFormat) -> Map<String, Json> {
    let mut metadata = base_metadata(&table.filename, table.file_type.as_str(), format);
    metadata.insert("row_count".to_string(), json!(table.row_count()));
    metadata.insert("column_count".to_string(), json!(table.column_count()));
    metadata.insert("headers".to_string(), json!(table.headers));
    metadata.insert("encoding".to_string(), json!(table.encoding));
    if let Some(delimiter) = table.delimiter {
        metadata.insert("delimiter".to_string(), json!(delimiter.to_string()));
    }
    metadata
}

/// Envelope for workbook sources.
pub(crate) fn workbook_metadata(workbook: &WorkbookSet, format: OutputFormat) -> Map<String, Json> {
    let mut metadata = base_metadata(&workbook.filename, "xlsx", format);
    metadata.insert("sheet_count".to_string(), json!(workbook.sheet_count()));
    metadata.insert("total_rows".to_string(), json!(workbook.total_rows()));
    metadata
}

pub(crate) fn sheet_metadata(sheet: &Sheet) -> Map<String, Json> {
    let mut metadata = Map::new();
    metadata.insert("sheet_name".to_string(), json!(sheet.name));
    metadata.insert("row_count".to_string(), json!(sheet.row_count()));
    metadata.insert("column_count".to_string(), json!(sheet.column_count()));
    metadata.insert("headers".to_string(), json!(sheet.headers));
    metadata
}

fn base_metadata(filename: &str, file_type: &str, format: OutputFormat) -> Map<String, Json> {
    let mut metadata = Map::new();
    metadata.insert("filename".to_string(), json!(filename));
    metadata.insert("file_type".to_string(), json!(file_type));
    metadata.insert("generated_at".to_string(), json!(generated_at()));
    metadata.insert("format".to_string(), json!(format.as_str()));
    metadata
}

/// Generation timestamp, UTC. Added only at serialization time so record
/// sets themselves stay reproducible.
fn generated_at() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcast_model::{FileType, Record, Value};

    fn sample_table() -> RecordSet {
        let mut record = Record::new();
        record.insert("name", Value::Str("caf\u{e9}".into()));
        record.insert("n", Value::Int(1));
        RecordSet::Table(TableSet {
            filename: "data.csv".into(),
            file_type: FileType::Csv,
            headers: vec!["name".into(), "n".into()],
            records: vec![record],
            total_rows: 1,
            encoding: "UTF-8".into(),
            delimiter: Some(','),
        })
    }

    #[test]
    fn test_json_envelope_fields() {
        let output = generate_json(&sample_table()).unwrap();
        let parsed: Json = serde_json::from_str(&output).unwrap();
        let metadata = &parsed["metadata"];
        assert_eq!(metadata["filename"], "data.csv");
        assert_eq!(metadata["file_type"], "csv");
        assert_eq!(metadata["format"], "json");
        assert_eq!(metadata["row_count"], 1);
        assert_eq!(metadata["column_count"], 2);
        assert_eq!(metadata["delimiter"], ",");
        assert!(metadata["generated_at"].is_string());
        assert_eq!(parsed["data"][0]["n"], 1);
    }

    #[test]
    fn test_json_pretty_printed_with_literal_unicode() {
        let output = generate_json(&sample_table()).unwrap();
        assert!(output.contains("\n  \"metadata\""));
        assert!(output.contains("caf\u{e9}"));
        assert!(!output.contains("\\u"));
    }

    #[test]
    fn test_workbook_sheets_envelope() {
        let sheet = Sheet {
            name: "S1".into(),
            headers: vec!["a".into()],
            records: vec![{
                let mut r = Record::new();
                r.insert("a", Value::Int(5));
                r
            }],
        };
        let set = RecordSet::Workbook(WorkbookSet {
            filename: "book.xlsx".into(),
            sheets: vec![sheet],
            skipped: vec![],
        });
        let output = generate_json(&set).unwrap();
        let parsed: Json = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["metadata"]["sheet_count"], 1);
        assert_eq!(parsed["metadata"]["total_rows"], 1);
        assert_eq!(parsed["sheets"]["S1"]["metadata"]["sheet_name"], "S1");
        assert_eq!(parsed["sheets"]["S1"]["data"][0]["a"], 5);
    }
}
