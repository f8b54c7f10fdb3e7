use serde_json::Value;

use super::unwrap_result;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object. List views
/// print one compact line per record.
pub fn print_minimal(value: &Value) {
    let result = unwrap_result(value);

    // Priority list of key output fields
    let priority_keys = [
        "winrate",
        "expectancy",
        "profit_factor",
        "total_r",
        "max_drawdown_r",
        "discipline_rate",
    ];

    match result {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }

            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(rows) => {
            for row in rows {
                println!("{}", format_minimal(row));
            }
        }
        other => println!("{}", format_minimal(other)),
    }
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
