use serde_json::Value;

use super::result_object;

/// Headline figures, most important first.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_cash_flow",
    "monthly_payment",
    "gross_yield",
    "net_yield",
    "total_patrimonial_return",
    "loan_amount",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline figure in the result, then in a nested
/// `results` object, and falls back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = result_object(value);
    let candidates = [
        Some(result_obj),
        result_obj.as_object().and_then(|m| m.get("results")),
    ];

    for obj in candidates.into_iter().flatten() {
        if let Value::Object(map) = obj {
            for key in PRIORITY_KEYS {
                if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                    return format_minimal(val);
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
