use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_cell, is_row_array, result_object};

/// Format output as tables using the tabled crate.
///
/// Scalar fields go into a Field/Value table; every array of rows
/// (schedule, projections) gets its own table underneath, titled by key.
pub fn print_table(value: &Value) {
    match result_object(value) {
        Value::Object(map) => print_object(map),
        Value::Array(arr) => print_rows(arr),
        other => println!("{}", other),
    }

    if let Value::Object(envelope) = value {
        print_envelope_notes(envelope);
    }
}

fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested: Vec<(String, &Value)> = Vec::new();

    for (key, val) in map {
        let name = key.clone();
        match val {
            Value::Object(inner) => {
                // Flatten small objects such as ratings into dotted fields
                for (inner_key, inner_val) in inner {
                    if is_row_array(inner_val) {
                        nested.push((format!("{name}.{inner_key}"), inner_val));
                    } else {
                        builder.push_record([format!("{name}.{inner_key}"), display(inner_val)]);
                    }
                }
            }
            v if is_row_array(v) => nested.push((name, v)),
            v => builder.push_record([name, display(v)]),
        }
    }

    println!("{}", Table::from(builder));

    for (name, rows) in nested {
        println!("\n{name}:");
        if let Value::Array(arr) = rows {
            print_rows(arr);
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(display).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", display(item));
        }
    }
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => arr.iter().map(display).collect::<Vec<_>>().join(", "),
        other => format_cell(other),
    }
}
