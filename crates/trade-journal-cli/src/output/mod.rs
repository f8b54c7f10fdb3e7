pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The engine wraps every view in an envelope; the table/csv/minimal
/// formatters care about the `result` payload inside it.
pub(crate) fn unwrap_result(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}
