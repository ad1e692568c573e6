//! Canonical data model for the tabcast conversion pipeline.
//!
//! Every reader (delimited text, workbook, JSON) normalizes its input into
//! the types defined here, and the serializer consumes them. The model is
//! deliberately value-oriented: a [`RecordSet`] is built once per
//! conversion, is immutable afterwards, and carries no timestamps or other
//! hidden state, so identical input bytes always produce identical content.
//!
//! # Overview
//!
//! - [`Value`]: tagged union every raw scalar coerces into
//! - [`Record`]: one logical row, fields in first-seen order
//! - [`TableSet`] / [`WorkbookSet`]: flat-table and per-sheet results
//! - [`RecordSet`]: the canonical result handed to the serializer
//! - [`Preview`]: read-only truncation view for quick inspection
//! - [`ConvertError`]: the fatal error taxonomy

mod error;
mod field;
mod preview;
mod record;
mod recordset;
mod value;

pub use error::{ConvertError, ErrorKind, Result};
pub use field::{UNNAMED_COLUMN, clean_field_name};
pub use preview::{Preview, PreviewOptions, SheetPreview, TablePreview, WorkbookPreview};
pub use record::Record;
pub use recordset::{FileType, RecordSet, Sheet, SkippedSheet, TableSet, WorkbookSet};
pub use value::Value;
