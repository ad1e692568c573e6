//! Line-delimited JSON output.

use serde_json::{Map, Value as Json, json};

use tabcast_model::{Record, RecordSet, Result};

use crate::OutputFormat;
use crate::json::{sheet_metadata, table_metadata, workbook_metadata};

/// Generates JSONL output: one compact JSON object per line.
///
/// Line order is fixed: the `metadata` line first; for workbook sources a
/// `sheet_metadata` line followed by that sheet's `data` lines, repeated
/// per sheet in sheet order; for flat tables the `data` lines directly,
/// in record order.
pub fn generate_jsonl(set: &RecordSet) -> Result<String> {
    let mut lines = Vec::new();
    match set {
        RecordSet::Table(table) => {
            lines.push(to_line(tagged(
                "metadata",
                table_metadata(table, OutputFormat::Jsonl),
            )));
            for record in &table.records {
                lines.push(to_line(data_line(record, None)));
            }
        }
        RecordSet::Workbook(workbook) => {
            lines.push(to_line(tagged(
                "metadata",
                workbook_metadata(workbook, OutputFormat::Jsonl),
            )));
            for sheet in &workbook.sheets {
                lines.push(to_line(tagged("sheet_metadata", sheet_metadata(sheet))));
                for record in &sheet.records {
                    lines.push(to_line(data_line(record, Some(&sheet.name))));
                }
            }
        }
    }
    Ok(lines.join("\n"))
}

/// Prepends the `type` discriminator to an envelope map.
fn tagged(tag: &str, body: Map<String, Json>) -> Map<String, Json> {
    let mut line = Map::new();
    line.insert("type".to_string(), json!(tag));
    line.extend(body);
    line
}

/// A data line: `type` (and `sheet_name` for workbook sources) merged
/// before the record's own fields.
fn data_line(record: &Record, sheet_name: Option<&str>) -> Map<String, Json> {
    let mut line = Map::new();
    line.insert("type".to_string(), json!("data"));
    if let Some(name) = sheet_name {
        line.insert("sheet_name".to_string(), json!(name));
    }
    line.extend(record.to_json_map());
    line
}

// `serde_json::Value`'s Display is the compact form, and it cannot fail.
fn to_line(map: Map<String, Json>) -> String {
    Json::Object(map).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcast_model::{FileType, Sheet, TableSet, Value, WorkbookSet};

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    fn sample_table(rows: usize) -> RecordSet {
        let records = (0..rows)
            .map(|i| record(&[("id", Value::Int(i as i64))]))
            .collect();
        RecordSet::Table(TableSet {
            filename: "data.csv".into(),
            file_type: FileType::Csv,
            headers: vec!["id".into()],
            records,
            total_rows: rows,
            encoding: "UTF-8".into(),
            delimiter: Some(','),
        })
    }

    #[test]
    fn test_tabular_line_order() {
        let output = generate_jsonl(&sample_table(3)).unwrap();
        let lines: Vec<Json> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["type"], "metadata");
        for (i, line) in lines[1..].iter().enumerate() {
            assert_eq!(line["type"], "data");
            assert_eq!(line["id"], i as i64);
        }
    }

    #[test]
    fn test_workbook_line_order() {
        let set = RecordSet::Workbook(WorkbookSet {
            filename: "book.xlsx".into(),
            sheets: vec![
                Sheet {
                    name: "one".into(),
                    headers: vec!["a".into()],
                    records: vec![record(&[("a", Value::Int(1))])],
                },
                Sheet {
                    name: "two".into(),
                    headers: vec!["b".into()],
                    records: vec![record(&[("b", Value::Int(2))])],
                },
            ],
            skipped: vec![],
        });
        let output = generate_jsonl(&set).unwrap();
        let lines: Vec<Json> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0]["type"], "metadata");
        assert_eq!(lines[1]["type"], "sheet_metadata");
        assert_eq!(lines[1]["sheet_name"], "one");
        assert_eq!(lines[2]["type"], "data");
        assert_eq!(lines[2]["sheet_name"], "one");
        assert_eq!(lines[3]["type"], "sheet_metadata");
        assert_eq!(lines[4]["b"], 2);
    }

    #[test]
    fn test_lines_are_compact() {
        let output = generate_jsonl(&sample_table(1)).unwrap();
        for line in output.lines() {
            assert!(!line.contains("\n  "));
        }
        // No trailing newline; the line count is exactly 1 + row_count.
        assert!(!output.ends_with('\n'));
    }
}
