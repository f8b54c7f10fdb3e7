use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::unwrap_result;

/// Format output as a table using the tabled crate. The global summary
/// renders as a field/value table; the grouped, bucketed and curve views
/// render one row per record.
pub fn print_table(value: &Value) {
    match unwrap_result(value) {
        Value::Object(map) => print_record(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{other}"),
    }

    print_trailer(value);
}

fn print_record(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    // Column order comes from the first record
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", format_value(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

/// Warnings and methodology from the envelope, after the table.
fn print_trailer(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {s}");
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
