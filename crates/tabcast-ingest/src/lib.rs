//! Input normalization for the tabcast conversion pipeline.
//!
//! This crate turns raw file bytes into the canonical
//! [`RecordSet`](tabcast_model::RecordSet) model:
//!
//! - **Tabular**: delimited text (CSV/TSV) with encoding and delimiter
//!   sniffing and per-cell type coercion
//! - **Workbook**: multi-sheet XLSX workbooks, values only
//! - **JSON**: arbitrary JSON payloads, flattened into flat records
//!
//! Each reader consumes the whole buffered input and either returns a
//! complete record set or fails; no partially-populated result is ever
//! visible to the caller. The detection heuristics (encoding, delimiter)
//! never fail — they degrade to documented fallbacks instead.
//!
//! # Example
//!
//! ```ignore
//! use tabcast_ingest::normalize_tabular;
//!
//! let bytes = std::fs::read("data.csv")?;
//! let set = normalize_tabular(&bytes, "data.csv")?;
//! ```

mod coerce;
mod delimiter;
mod encoding;
mod json;
mod tabular;
mod workbook;

// === Detection ===
pub use delimiter::detect_delimiter;
pub use encoding::{Decoded, decode_bytes};

// === Coercion ===
pub use coerce::{BoolWords, coerce_cell, coerce_json, coerce_str};

// === Readers ===
pub use json::normalize_json;
pub use tabular::normalize_tabular;
pub use workbook::normalize_workbook;
