//! Per-cell type coercion into the canonical [`Value`] union.

use calamine::Data;
use tabcast_model::Value;

/// Sentinel strings treated as null, matched exactly after trimming.
const NA_SENTINELS: [&str; 5] = ["NA", "N/A", "null", "NULL", "None"];

/// Boolean word sets recognized when sniffing strings.
///
/// Spreadsheet authors use `1`/`0` as flags, so the workbook set includes
/// them; in delimited text those are far more often numeric codes, and the
/// numeric parse (which runs first) claims them either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolWords {
    Tabular,
    Workbook,
}

impl BoolWords {
    fn truthy(self) -> &'static [&'static str] {
        match self {
            BoolWords::Tabular => &["true", "yes"],
            BoolWords::Workbook => &["true", "yes", "1"],
        }
    }

    fn falsy(self) -> &'static [&'static str] {
        match self {
            BoolWords::Tabular => &["false", "no"],
            BoolWords::Workbook => &["false", "no", "0"],
        }
    }
}

/// Coerces a raw string scalar.
///
/// Rules, in order: null sentinels, numeric parse (strings containing `.`
/// parse as floats and narrow to integers when integral; anything else is
/// parsed as an integer only, so scientific notation without a dot stays
/// a string), boolean words, trimmed string verbatim.
pub fn coerce_str(raw: &str, words: BoolWords) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NA_SENTINELS.contains(&trimmed) {
        return Value::Null;
    }

    // Numeric before boolean, so "0"/"1" codes stay numeric.
    if trimmed.contains('.') {
        if let Ok(float) = trimmed.parse::<f64>() {
            return narrow_float(float);
        }
    } else if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Int(int);
    }

    let lowered = trimmed.to_lowercase();
    if words.truthy().contains(&lowered.as_str()) {
        return Value::Bool(true);
    }
    if words.falsy().contains(&lowered.as_str()) {
        return Value::Bool(false);
    }

    Value::Str(trimmed.to_string())
}

/// Coerces a JSON leaf.
///
/// Nested lists/objects are re-encoded as compact JSON text; structural
/// flattening happens in the JSON payload normalizer, not here.
pub fn coerce_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                Value::Int(int)
            } else if let Some(float) = n.as_f64() {
                narrow_float(float)
            } else {
                Value::Str(n.to_string())
            }
        }
        serde_json::Value::String(s) => coerce_str(s, BoolWords::Tabular),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            Value::Nested(value.to_string())
        }
    }
}

/// Coerces one spreadsheet cell.
pub fn coerce_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Bool(b) => Value::Bool(*b),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => narrow_float(*f),
        Data::String(s) => coerce_str(s, BoolWords::Workbook),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Value::Str(naive.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            None => Value::Null,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::Str(s.clone()),
        Data::Error(e) => Value::Str(e.to_string()),
    }
}

/// Narrows a mathematically integral float to an integer.
fn narrow_float(float: f64) -> Value {
    if float.is_finite()
        && float.fract() == 0.0
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        Value::Int(float as i64)
    } else {
        Value::Float(float)
    }
}
