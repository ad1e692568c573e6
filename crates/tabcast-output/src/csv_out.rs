//! CSV output for flat-table record sets.

use std::collections::BTreeSet;

use tabcast_model::{ConvertError, RecordSet, Result, TableSet, Value};

/// Generates CSV output.
///
/// Workbook sets are rejected outright: CSV has no multi-table
/// representation, and a best-effort flattening would silently merge
/// unrelated sheets. The header row comes from the table's header list,
/// falling back to the sorted union of record keys, then to a single
/// synthetic `value` column. Record keys outside the header list are
/// silently dropped.
pub fn generate_csv(set: &RecordSet) -> Result<String> {
    let table = match set {
        RecordSet::Table(table) => table,
        RecordSet::Workbook(_) => {
            return Err(ConvertError::UnsupportedFormat {
                message: "CSV output is not supported for multi-sheet workbook input".to_string(),
            });
        }
    };

    let headers = header_columns(table);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&headers)
        .map_err(csv_failure)?;
    for record in &table.records {
        let row: Vec<String> = headers
            .iter()
            .map(|header| {
                record
                    .get(header)
                    .map_or_else(String::new, Value::to_csv_field)
            })
            .collect();
        writer.write_record(&row).map_err(csv_failure)?;
    }

    let bytes = writer.into_inner().map_err(|e| ConvertError::UnsupportedFormat {
        message: format!("CSV generation failed: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ConvertError::UnsupportedFormat {
        message: format!("CSV generation produced invalid UTF-8: {e}"),
    })
}

fn header_columns(table: &TableSet) -> Vec<String> {
    if !table.headers.is_empty() {
        return table.headers.clone();
    }
    let union: BTreeSet<String> = table
        .records
        .iter()
        .flat_map(|record| record.iter().map(|(name, _)| name.to_string()))
        .collect();
    if union.is_empty() {
        vec!["value".to_string()]
    } else {
        union.into_iter().collect()
    }
}

fn csv_failure(e: csv::Error) -> ConvertError {
    ConvertError::UnsupportedFormat {
        message: format!("CSV generation failed: {e}"),
    }
}
