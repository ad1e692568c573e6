//! Multi-sheet workbook reader (XLSX, values only).

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use tabcast_model::{ConvertError, Record, RecordSet, Result, Sheet, SkippedSheet, WorkbookSet};

use crate::coerce::coerce_cell;

/// Normalizes workbook bytes into a per-sheet [`RecordSet`].
///
/// Sheets are processed in source order. Fully-empty rows are dropped;
/// sheets with no surviving data are absent from the result; a sheet that
/// fails to read is skipped with a warning and listed in
/// [`WorkbookSet::skipped`]. When nothing survives at all the whole
/// conversion fails with `EmptySource`.
pub fn normalize_workbook(bytes: &[u8], filename: &str) -> Result<RecordSet> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|e| ConvertError::MalformedInput {
            filename: filename.to_string(),
            message: format!("failed to open workbook: {e}"),
        })?;

    let sheet_names = workbook.sheet_names();
    tracing::info!(filename, sheets = sheet_names.len(), "processing workbook");

    let mut sheets = Vec::new();
    let mut skipped = Vec::new();
    for name in sheet_names {
        match workbook.worksheet_range(&name) {
            Ok(range) => {
                if let Some(sheet) = sheet_from_rows(&name, range.rows()) {
                    sheets.push(sheet);
                } else {
                    tracing::debug!(sheet = %name, "skipping empty sheet");
                }
            }
            Err(e) => {
                tracing::warn!(sheet = %name, error = %e, "failed to read sheet, skipping");
                skipped.push(SkippedSheet {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    if sheets.is_empty() {
        return Err(ConvertError::EmptySource {
            filename: filename.to_string(),
            message: "every sheet was empty or unreadable".to_string(),
        });
    }

    Ok(RecordSet::Workbook(WorkbookSet {
        filename: filename.to_string(),
        sheets,
        skipped,
    }))
}

/// Shapes raw cell rows into a [`Sheet`].
///
/// The first non-empty row becomes the header row; empty header cells get
/// positional `Column_<n>` names. A data row contributes only when at
/// least one of its coerced values is non-null. Returns `None` when no
/// records survive.
fn sheet_from_rows<'a, I>(name: &str, rows: I) -> Option<Sheet>
where
    I: IntoIterator<Item = &'a [Data]>,
{
    let rows: Vec<&[Data]> = rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .collect();
    let (header_row, data_rows) = rows.split_first()?;

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(index, cell)| header_label(cell, index))
        .collect();

    let mut records = Vec::with_capacity(data_rows.len());
    for row in data_rows {
        let mut record = Record::with_capacity(headers.len());
        for (index, cell) in row.iter().enumerate().take(headers.len()) {
            record.insert(headers[index].clone(), coerce_cell(cell));
        }
        if record.has_non_null() {
            records.push(record);
        }
    }

    if records.is_empty() {
        return None;
    }
    Some(Sheet {
        name: name.to_string(),
        headers,
        records,
    })
}

/// Header cell text: empty cells synthesize a 1-based positional name,
/// everything else is stringified verbatim (no cleaning).
fn header_label(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("Column_{}", index + 1),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcast_model::Value;

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    #[test]
    fn test_sheet_from_rows_basic() {
        let rows = vec![
            vec![s("name"), s("score")],
            vec![s("alice"), Data::Float(9.0)],
            vec![s("bob"), Data::Float(7.5)],
        ];
        let sheet = sheet_from_rows("Scores", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.name, "Scores");
        assert_eq!(sheet.headers, vec!["name", "score"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.records[0].get("score"), Some(&Value::Int(9)));
        assert_eq!(sheet.records[1].get("score"), Some(&Value::Float(7.5)));
    }

    #[test]
    fn test_empty_rows_dropped_before_headers() {
        let rows = vec![
            vec![Data::Empty, Data::Empty],
            vec![s("a"), s("b")],
            vec![Data::Int(1), Data::Int(2)],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.headers, vec!["a", "b"]);
        assert_eq!(sheet.row_count(), 1);
    }

    #[test]
    fn test_blank_data_rows_dropped() {
        let rows = vec![
            vec![s("a"), s("b")],
            vec![s(""), s("  ")],
            vec![Data::Int(1), Data::Empty],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        // The all-whitespace row coerces to nulls and is dropped.
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.records[0].get("a"), Some(&Value::Int(1)));
        assert_eq!(sheet.records[0].get("b"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_header_cells_get_positional_names() {
        let rows = vec![
            vec![s("a"), Data::Empty, Data::Float(2.0)],
            vec![Data::Int(1), Data::Int(2), Data::Int(3)],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.headers, vec!["a", "Column_2", "2"]);
    }

    #[test]
    fn test_cells_beyond_headers_dropped() {
        let rows = vec![
            vec![s("a")],
            vec![Data::Int(1), Data::Int(99)],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.records[0].len(), 1);
        assert_eq!(sheet.records[0].get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_short_rows_stay_sparse() {
        let rows = vec![
            vec![s("a"), s("b")],
            vec![Data::Int(1)],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.records[0].get("a"), Some(&Value::Int(1)));
        assert_eq!(sheet.records[0].get("b"), None);
    }

    #[test]
    fn test_headers_only_sheet_is_none() {
        let rows = vec![vec![s("a"), s("b")]];
        assert!(sheet_from_rows("S", rows.iter().map(Vec::as_slice)).is_none());
    }

    #[test]
    fn test_workbook_strings_recognize_boolean_words() {
        let rows = vec![
            vec![s("flag"), s("label")],
            vec![s("yes"), s("TRUE")],
        ];
        let sheet = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(sheet.records[0].get("flag"), Some(&Value::Bool(true)));
        assert_eq!(sheet.records[0].get("label"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_repeated_runs_produce_identical_sheets() {
        let rows = vec![
            vec![s("name"), s("flag"), Data::Empty],
            vec![s("alice"), s("yes"), Data::Float(1.5)],
            vec![Data::Empty, Data::Empty, Data::Empty],
            vec![s("bob"), s("NA"), Data::Int(2)],
        ];
        let first = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        let second = sheet_from_rows("S", rows.iter().map(Vec::as_slice)).unwrap();
        // No timestamps or other hidden state inside the result.
        assert_eq!(first, second);
    }

    #[test]
    fn test_garbage_bytes_are_malformed() {
        let err = normalize_workbook(b"not a zip archive", "book.xlsx").unwrap_err();
        assert_eq!(err.kind(), tabcast_model::ErrorKind::MalformedInput);
    }
}
