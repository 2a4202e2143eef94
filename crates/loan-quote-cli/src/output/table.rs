use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, result_of, split_schedule, SCHEDULE_COLUMNS};

/// Format output as tables: the quote summary, then the schedule if present,
/// then any warnings and the methodology.
pub fn print_table(value: &Value) {
    let (summary, entries) = split_schedule(result_of(value));

    match summary {
        Value::Object(_) => println!("{}", field_value_table(summary)),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", format_scalar(other)),
    }

    if let Some(rows) = entries {
        println!();
        println!("{}", rows_table(&SCHEDULE_COLUMNS, rows));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn field_value_table(value: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    if let Value::Object(map) = value {
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_scalar(val)]);
        }
    }
    Table::from(builder)
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };
    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    println!("{}", rows_table(&headers, rows));
}

fn rows_table(headers: &[&str], rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());
    for item in rows {
        let row: Vec<String> = headers
            .iter()
            .map(|h| item.get(*h).map(format_scalar).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    Table::from(builder)
}
