use serde_json::Value;
use std::io;

use super::unwrap_result;

/// Write output as CSV to stdout. The scalar summary becomes field/value
/// rows; list views become one CSV row per record.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match unwrap_result(value) {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        Value::Array(rows) => write_rows_csv(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
    } else {
        for row in rows {
            let _ = wtr.write_record([&format_csv_value(row)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
