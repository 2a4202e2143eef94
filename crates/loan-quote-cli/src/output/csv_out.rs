use serde_json::Value;
use std::io::{self, Write};

use super::{format_scalar, result_of, split_schedule, SCHEDULE_COLUMNS};

/// Write output as CSV to stdout.
///
/// Schedules are written one row per period; quotes as `field,value` pairs;
/// loan type listings one row per type.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    let (summary, entries) = split_schedule(result_of(value));

    if let Some(rows) = entries {
        write_rows(wtr, &SCHEDULE_COLUMNS, rows);
        return;
    }

    match summary {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
            }
        }
        Value::Array(rows) => {
            if let Some(Value::Object(first)) = rows.first() {
                let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
                write_rows(wtr, &headers, rows);
            }
        }
        other => {
            let _ = wtr.write_record([&format_scalar(other)]);
        }
    }
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, headers: &[&str], rows: &[Value]) {
    let _ = wtr.write_record(headers);

    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, value);
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_rows() {
        let value = json!({"result": {
            "quote": {"periods": 2},
            "entries": [
                {"period": 1, "payment": "10.00", "principal_component": "9.90",
                 "interest_component": "0.10", "remaining_balance": "10.00"},
                {"period": 2, "payment": "10.05", "principal_component": "10.00",
                 "interest_component": "0.05", "remaining_balance": "0"}
            ]
        }});
        let out = render(&value);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "period,payment,principal_component,interest_component,remaining_balance"
        );
        assert_eq!(lines[2], "2,10.05,10.00,0.05,0");
    }

    #[test]
    fn test_quote_field_value_pairs() {
        let out = render(&json!({"result": {"periodic_payment": "1000.00"}}));
        assert_eq!(out, "field,value\nperiodic_payment,1000.00\n");
    }
}
