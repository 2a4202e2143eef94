pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Column order for amortization schedule rows.
pub(crate) const SCHEDULE_COLUMNS: [&str; 5] = [
    "period",
    "payment",
    "principal_component",
    "interest_component",
    "remaining_balance",
];

/// The computation result inside an output envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Split a result into its scalar/summary object and the schedule rows, if any.
pub(crate) fn split_schedule(result: &Value) -> (&Value, Option<&Vec<Value>>) {
    match (result.get("quote"), result.get("entries")) {
        (Some(quote), Some(Value::Array(entries))) => (quote, Some(entries)),
        _ => (result, None),
    }
}

pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_scalar).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_schedule_envelope() {
        let value = json!({
            "result": {
                "quote": {"periodic_payment": "4339.12"},
                "entries": [{"period": 1}, {"period": 2}]
            },
            "warnings": []
        });
        let (summary, entries) = split_schedule(result_of(&value));
        assert_eq!(summary["periodic_payment"], "4339.12");
        assert_eq!(entries.unwrap().len(), 2);
    }

    #[test]
    fn test_split_plain_quote() {
        let value = json!({"result": {"periodic_payment": "1000.00"}});
        let (summary, entries) = split_schedule(result_of(&value));
        assert_eq!(summary["periodic_payment"], "1000.00");
        assert!(entries.is_none());
    }

    #[test]
    fn test_format_scalar() {
        assert_eq!(format_scalar(&json!(["a", "b"])), "a, b");
        assert_eq!(format_scalar(&Value::Null), "");
        assert_eq!(format_scalar(&json!(240)), "240");
    }
}
