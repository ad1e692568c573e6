//! Read-only truncation views over record sets.

use serde::Serialize;

use crate::{FileType, Record, RecordSet, Sheet};

/// Preview limits, passed explicitly instead of read from process-wide
/// settings.
#[derive(Debug, Clone, Copy)]
pub struct PreviewOptions {
    /// Maximum records taken per table or sheet.
    pub max_rows: usize,
    /// Maximum sheets shown for workbook sources.
    pub max_sheets: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_rows: 100,
            max_sheets: 3,
        }
    }
}

/// Truncated view of a flat-table record set.
#[derive(Debug, Clone, Serialize)]
pub struct TablePreview {
    pub filename: String,
    pub file_type: FileType,
    pub headers: Vec<String>,
    pub sample_records: Vec<Record>,
    pub total_rows: usize,
    pub sample_row_count: usize,
    pub encoding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

/// Truncated view of one workbook sheet.
#[derive(Debug, Clone, Serialize)]
pub struct SheetPreview {
    pub name: String,
    pub headers: Vec<String>,
    pub sample_records: Vec<Record>,
    pub total_rows: usize,
    pub sample_row_count: usize,
}

/// Truncated view of a workbook record set. At most
/// [`PreviewOptions::max_sheets`] sheets are included.
#[derive(Debug, Clone, Serialize)]
pub struct WorkbookPreview {
    pub filename: String,
    pub sheet_count: usize,
    pub sheets: Vec<SheetPreview>,
}

/// A truncation view over an already-normalized [`RecordSet`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Preview {
    Table(TablePreview),
    Workbook(WorkbookPreview),
}

impl RecordSet {
    /// Builds a preview by taking the first `max_rows` records per
    /// table/sheet. Performs no re-parsing; the underlying set is left
    /// untouched.
    pub fn preview(&self, options: &PreviewOptions) -> Preview {
        match self {
            RecordSet::Table(table) => {
                let sample: Vec<Record> =
                    table.records.iter().take(options.max_rows).cloned().collect();
                Preview::Table(TablePreview {
                    filename: table.filename.clone(),
                    file_type: table.file_type,
                    headers: table.headers.clone(),
                    total_rows: table.total_rows,
                    sample_row_count: sample.len(),
                    sample_records: sample,
                    encoding: table.encoding.clone(),
                    delimiter: table.delimiter,
                })
            }
            RecordSet::Workbook(workbook) => {
                let sheets: Vec<SheetPreview> = workbook
                    .sheets
                    .iter()
                    .take(options.max_sheets)
                    .map(|sheet| sheet_preview(sheet, options.max_rows))
                    .collect();
                Preview::Workbook(WorkbookPreview {
                    filename: workbook.filename.clone(),
                    sheet_count: sheets.len(),
                    sheets,
                })
            }
        }
    }
}

fn sheet_preview(sheet: &Sheet, max_rows: usize) -> SheetPreview {
    let sample: Vec<Record> = sheet.records.iter().take(max_rows).cloned().collect();
    SheetPreview {
        name: sheet.name.clone(),
        headers: sheet.headers.clone(),
        total_rows: sheet.row_count(),
        sample_row_count: sample.len(),
        sample_records: sample,
    }
}
