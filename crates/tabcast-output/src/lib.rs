//! Output generation for normalized record sets.
//!
//! A [`RecordSet`](tabcast_model::RecordSet) serializes into one of three
//! formats, each carrying a metadata envelope (filename, counts, headers,
//! generation timestamp):
//!
//! - **JSON**: one pretty-printed object with a `metadata` block and
//!   either a `data` array or a per-sheet `sheets` map
//! - **JSONL**: one JSON object per line, metadata first, then data rows
//! - **CSV**: plain table restricted to the header column set (flat
//!   tables only; workbook sets are rejected)

mod csv_out;
mod json;
mod jsonl;

use std::fmt;
use std::str::FromStr;

use tabcast_model::{ConvertError, RecordSet, Result};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
        }
    }

    /// File extension for generated output.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    /// One-line human description, used by format listings.
    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Json => "structured JSON with a metadata envelope, pretty-printed",
            OutputFormat::Jsonl => "JSON Lines, one independently parseable object per line",
            OutputFormat::Csv => "plain CSV table (flat tabular sources only)",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(ConvertError::UnsupportedFormat {
                message: other.to_string(),
            }),
        }
    }
}

/// Serializes a record set into the requested output format.
///
/// Fails with `UnsupportedFormat` before producing any output when the
/// combination cannot be represented (CSV against a workbook set).
pub fn serialize(set: &RecordSet, format: OutputFormat) -> Result<String> {
    tracing::debug!(
        filename = set.filename(),
        kind = set.kind(),
        format = %format,
        "generating output"
    );
    match format {
        OutputFormat::Json => json::generate_json(set),
        OutputFormat::Jsonl => jsonl::generate_jsonl(set),
        OutputFormat::Csv => csv_out::generate_csv(set),
    }
}
