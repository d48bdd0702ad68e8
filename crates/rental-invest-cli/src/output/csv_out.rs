use serde_json::{Map, Value};
use std::io;

use super::{format_cell, is_row_array, result_object};

/// Write output as CSV to stdout.
///
/// A result carrying rows (schedule, yearly summary) is written as one row
/// per entry; anything else as two-column `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let records = match result_object(value) {
        Value::Object(map) => match first_row_array(map) {
            Some(rows) => row_records(rows),
            None => field_records(map),
        },
        Value::Array(arr) if arr.first().is_some_and(Value::is_object) => row_records(arr),
        other => vec![vec![format_cell(other)]],
    };

    for record in records {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

fn first_row_array(map: &Map<String, Value>) -> Option<&[Value]> {
    ["schedule", "years"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find(|v| is_row_array(v))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

fn field_records(map: &Map<String, Value>) -> Vec<Vec<String>> {
    let mut records = vec![vec!["field".to_string(), "value".to_string()]];
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    records.push(vec![format!("{key}.{inner_key}"), format_cell(inner_val)]);
                }
            }
            // Rows do not fit a two-column layout
            v if is_row_array(v) => {}
            v => records.push(vec![key.clone(), format_cell(v)]),
        }
    }
    records
}

fn row_records(rows: &[Value]) -> Vec<Vec<String>> {
    let Some(Value::Object(first)) = rows.first() else {
        return Vec::new();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut records = vec![headers.clone()];
    for item in rows {
        if let Value::Object(map) = item {
            records.push(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                    .collect(),
            );
        }
    }
    records
}
