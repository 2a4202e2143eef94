use serde_json::Value;

use super::{format_scalar, result_of, split_schedule};

/// Print just the headline number: the monthly installment when present,
/// otherwise the first field of the result.
pub fn print_minimal(value: &Value) {
    let (summary, _) = split_schedule(result_of(value));

    let priority_keys = ["periodic_payment", "total_paid", "total_interest"];

    if let Value::Object(map) = summary {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    // Loan type listings: one id per line
    if let Value::Array(items) = summary {
        for item in items {
            match item.get("id") {
                Some(id) => println!("{}", format_scalar(id)),
                None => println!("{}", format_scalar(item)),
            }
        }
        return;
    }

    println!("{}", format_scalar(summary));
}
