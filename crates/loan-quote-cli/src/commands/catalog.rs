use clap::Args;
use serde_json::Value;

use loan_quote_core::catalog::LoanTypeCatalog;

/// Arguments for listing loan types
#[derive(Args)]
pub struct LoanTypesArgs {
    /// Show a single loan type
    #[arg(long)]
    pub id: Option<String>,

    /// Include each type's starting request (minimum amount, rate and tenure)
    #[arg(long)]
    pub with_defaults: bool,
}

pub fn run_loan_types(
    args: LoanTypesArgs,
    catalog: &LoanTypeCatalog,
) -> Result<Value, Box<dyn std::error::Error>> {
    let selected = match args.id {
        Some(ref id) => vec![catalog.lookup(id)?],
        None => catalog.loan_types().iter().collect(),
    };

    let mut rows = Vec::with_capacity(selected.len());
    for loan_type in selected {
        let mut row = serde_json::to_value(loan_type)?;
        if args.with_defaults {
            row["default_request"] = serde_json::to_value(loan_type.default_request())?;
        }
        rows.push(row);
    }

    Ok(Value::Array(rows))
}
