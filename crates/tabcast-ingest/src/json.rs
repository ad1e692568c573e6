//! JSON payload normalizer.

use std::collections::BTreeSet;

use serde_json::{Map, Value as Json};

use tabcast_model::{ConvertError, FileType, Record, RecordSet, Result, TableSet};

use crate::coerce::coerce_json;
use crate::encoding::decode_bytes;

/// Conventional keys that hold the record array in wrapped payloads, in
/// priority order.
const RECORD_KEYS: [&str; 4] = ["data", "records", "items", "rows"];

/// Separator for flattened nested-object paths.
const FLATTEN_SEPARATOR: char = '.';

/// Normalizes an arbitrary JSON document into a flat-table [`RecordSet`].
///
/// Wrapped payloads descend into the first of `data`/`records`/`items`/
/// `rows` holding an array; lists of objects are flattened with dotted
/// paths; lists of non-objects and bare scalars wrap into single-field
/// `value` records. Headers are the sorted union of all keys, and every
/// record is aligned to the full header list with explicit nulls so that
/// downstream CSV output has a fixed column set.
pub fn normalize_json(bytes: &[u8], filename: &str) -> Result<RecordSet> {
    let decoded = decode_bytes(bytes);
    let payload: Json =
        serde_json::from_str(&decoded.text).map_err(|e| ConvertError::MalformedInput {
            filename: filename.to_string(),
            message: format!("invalid JSON: {e}"),
        })?;

    let raw_records = normalize_payload(payload);
    if raw_records.is_empty() {
        return Err(ConvertError::EmptySource {
            filename: filename.to_string(),
            message: "JSON payload contains no records".to_string(),
        });
    }

    let headers: Vec<String> = raw_records
        .iter()
        .flat_map(|record| record.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let records: Vec<Record> = raw_records
        .iter()
        .map(|raw| align_record(raw, &headers))
        .collect();

    tracing::info!(
        filename,
        rows = records.len(),
        columns = headers.len(),
        "normalized JSON payload"
    );

    let total_rows = records.len();
    Ok(RecordSet::Table(TableSet {
        filename: filename.to_string(),
        file_type: FileType::Json,
        headers,
        records,
        total_rows,
        encoding: decoded.encoding,
        delimiter: None,
    }))
}

/// Expands a raw record to the full header list, coercing every leaf and
/// filling missing keys with null.
fn align_record(raw: &Map<String, Json>, headers: &[String]) -> Record {
    let mut record = Record::with_capacity(headers.len());
    for header in headers {
        let value = raw
            .get(header)
            .map_or(tabcast_model::Value::Null, coerce_json);
        record.insert(header.clone(), value);
    }
    record
}

/// Turns an arbitrary payload into a list of flat key/value mappings.
fn normalize_payload(payload: Json) -> Vec<Map<String, Json>> {
    let payload = match payload {
        Json::Object(mut map) => {
            let record_key = RECORD_KEYS
                .iter()
                .find(|key| matches!(map.get(**key), Some(Json::Array(_))));
            match record_key {
                Some(key) => map.remove(*key).unwrap_or(Json::Null),
                // No record array inside: the object is one record,
                // kept as-is (nested values stay nested leaves).
                None => return vec![map],
            }
        }
        other => other,
    };

    match payload {
        Json::Array(items) => {
            if items.iter().all(Json::is_object) {
                let mut flat = Vec::with_capacity(items.len());
                for item in items {
                    if let Json::Object(map) = item {
                        flat.push(flatten_object(map));
                    }
                }
                flat
            } else {
                items.into_iter().map(wrap_value).collect()
            }
        }
        scalar => vec![wrap_value(scalar)],
    }
}

fn wrap_value(value: Json) -> Map<String, Json> {
    let mut map = Map::new();
    map.insert("value".to_string(), value);
    map
}

/// Flattens nested objects into dotted paths (`a.b.c`). Arrays are
/// leaves; they are re-encoded later by the cell coercer.
fn flatten_object(map: Map<String, Json>) -> Map<String, Json> {
    let mut flat = Map::new();
    flatten_into(&mut flat, "", map);
    flat
}

fn flatten_into(flat: &mut Map<String, Json>, prefix: &str, map: Map<String, Json>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}{FLATTEN_SEPARATOR}{key}")
        };
        match value {
            Json::Object(inner) => flatten_into(flat, &path, inner),
            leaf => {
                flat.insert(path, leaf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabcast_model::Value;

    fn table(bytes: &[u8]) -> TableSet {
        match normalize_json(bytes, "payload.json").unwrap() {
            RecordSet::Table(table) => table,
            RecordSet::Workbook(_) => panic!("expected table"),
        }
    }

    #[test]
    fn test_header_union_with_explicit_nulls() {
        let set = table(br#"[{"a": 1}, {"b": 2}]"#);
        assert_eq!(set.headers, vec!["a", "b"]);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].get("a"), Some(&Value::Int(1)));
        assert_eq!(set.records[0].get("b"), Some(&Value::Null));
        assert_eq!(set.records[1].get("a"), Some(&Value::Null));
        assert_eq!(set.records[1].get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_record_array_key_descent() {
        let set = table(br#"{"meta": 1, "data": [{"x": "42"}]}"#);
        assert_eq!(set.headers, vec!["x"]);
        assert_eq!(set.records[0].get("x"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_record_key_priority_order() {
        // "data" wins over "rows" even though "rows" also holds an array.
        let set = table(br#"{"rows": [{"r": 1}], "data": [{"d": 2}]}"#);
        assert_eq!(set.headers, vec!["d"]);
    }

    #[test]
    fn test_non_array_record_key_ignored() {
        let set = table(br#"{"data": "scalar", "items": [{"i": 1}]}"#);
        assert_eq!(set.headers, vec!["i"]);
    }

    #[test]
    fn test_single_object_is_one_record() {
        let set = table(br#"{"name": "x", "nested": {"a": 1}}"#);
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.headers, vec!["name", "nested"]);
        // The lone record is not flattened; nested values re-encode.
        assert_eq!(
            set.records[0].get("nested"),
            Some(&Value::Nested("{\"a\":1}".into()))
        );
    }

    #[test]
    fn test_nested_objects_flatten_with_dotted_paths() {
        let set = table(br#"[{"a": {"b": {"c": 1}}, "d": [1, 2]}]"#);
        assert_eq!(set.headers, vec!["a.b.c", "d"]);
        assert_eq!(set.records[0].get("a.b.c"), Some(&Value::Int(1)));
        assert_eq!(set.records[0].get("d"), Some(&Value::Nested("[1,2]".into())));
    }

    #[test]
    fn test_mixed_list_wraps_every_element() {
        let set = table(br#"[1, {"a": 2}, "x"]"#);
        assert_eq!(set.headers, vec!["value"]);
        assert_eq!(set.records.len(), 3);
        assert_eq!(set.records[0].get("value"), Some(&Value::Int(1)));
        assert_eq!(
            set.records[1].get("value"),
            Some(&Value::Nested("{\"a\":2}".into()))
        );
        assert_eq!(set.records[2].get("value"), Some(&Value::Str("x".into())));
    }

    #[test]
    fn test_scalar_payload() {
        let set = table(b"42");
        assert_eq!(set.headers, vec!["value"]);
        assert_eq!(set.records[0].get("value"), Some(&Value::Int(42)));
    }

    #[test]
    fn test_table_metadata() {
        let set = table(br#"[{"a": 1}]"#);
        assert_eq!(set.file_type, FileType::Json);
        assert_eq!(set.delimiter, None);
        assert_eq!(set.total_rows, 1);
    }

    #[test]
    fn test_empty_array_is_empty_source() {
        let err = normalize_json(b"[]", "payload.json").unwrap_err();
        assert_eq!(err.kind(), tabcast_model::ErrorKind::EmptySource);
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = normalize_json(b"{not json", "payload.json").unwrap_err();
        assert_eq!(err.kind(), tabcast_model::ErrorKind::MalformedInput);
    }

    #[test]
    fn test_idempotent() {
        let bytes = br#"{"data": [{"a": 1, "b": {"c": true}}, {"a": 2}]}"#;
        let first = normalize_json(bytes, "payload.json").unwrap();
        let second = normalize_json(bytes, "payload.json").unwrap();
        assert_eq!(first, second);
    }
}
