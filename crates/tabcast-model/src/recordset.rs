//! Normalized record sets: flat tables and multi-sheet workbooks.

use serde::Serialize;

use crate::Record;

/// Source file kind for flat-table results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Tsv,
    Json,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
            FileType::Json => "json",
        }
    }
}

/// Flat-table result produced by the tabular reader and the JSON
/// normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSet {
    pub filename: String,
    pub file_type: FileType,
    /// Cleaned header names in source order (sorted key union for JSON
    /// sources). Duplicates after cleaning are preserved as-is.
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// Raw non-header line count for delimited sources, record count for
    /// JSON sources. May differ from `records.len()` when the raw text
    /// contains lines that did not parse into records.
    pub total_rows: usize,
    pub encoding: String,
    /// Detected delimiter; absent for JSON sources.
    pub delimiter: Option<char>,
}

impl TableSet {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// One workbook tab normalized into headers plus records.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Sheet {
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// A sheet that failed to read and was left out of the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSheet {
    pub name: String,
    pub reason: String,
}

/// Multi-sheet result produced by the workbook reader.
///
/// Sheets appear in source order. Sheets that were empty are absent;
/// sheets that failed to read are listed in `skipped`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSet {
    pub filename: String,
    pub sheets: Vec<Sheet>,
    pub skipped: Vec<SkippedSheet>,
}

impl WorkbookSet {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Sum of all sheets' record counts.
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(Sheet::row_count).sum()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

/// The canonical normalized result of any reader.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    Table(TableSet),
    Workbook(WorkbookSet),
}

impl RecordSet {
    pub fn filename(&self) -> &str {
        match self {
            RecordSet::Table(table) => &table.filename,
            RecordSet::Workbook(workbook) => &workbook.filename,
        }
    }

    /// Source kind tag: `tabular` for flat tables, `workbook` for
    /// multi-sheet results.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordSet::Table(_) => "tabular",
            RecordSet::Workbook(_) => "workbook",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_workbook_totals() {
        let workbook = WorkbookSet {
            filename: "book.xlsx".into(),
            sheets: vec![
                Sheet {
                    name: "one".into(),
                    headers: vec!["a".into()],
                    records: vec![record(&[("a", Value::Int(1))])],
                },
                Sheet {
                    name: "two".into(),
                    headers: vec!["a".into()],
                    records: vec![
                        record(&[("a", Value::Int(2))]),
                        record(&[("a", Value::Int(3))]),
                    ],
                },
            ],
            skipped: vec![],
        };
        assert_eq!(workbook.sheet_count(), 2);
        assert_eq!(workbook.total_rows(), 3);
        assert!(workbook.sheet("two").is_some());
        assert!(workbook.sheet("three").is_none());
    }

    #[test]
    fn test_recordset_kind() {
        let table = RecordSet::Table(TableSet {
            filename: "data.csv".into(),
            file_type: FileType::Csv,
            headers: vec![],
            records: vec![],
            total_rows: 0,
            encoding: "utf-8".into(),
            delimiter: Some(','),
        });
        assert_eq!(table.kind(), "tabular");
        assert_eq!(table.filename(), "data.csv");
    }
}
