use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_quote_core::catalog::LoanTypeCatalog;
use loan_quote_core::quote::{self, QuoteDocument, QuoteInput};
use loan_quote_core::types::LoanRequest;

use crate::input;

/// Loan parameters shared by `quote` and `schedule`
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan type id (home, car, personal, education)
    #[arg(long, default_value = "home")]
    pub loan_type: String,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal interest rate in percent (e.g. 8.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in whole years
    #[arg(long)]
    pub tenure: Option<u32>,
}

/// Arguments for an EMI quote
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for an amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Only return the first N months (totals still cover the full term)
    #[arg(long)]
    pub max_periods: Option<u32>,
}

pub fn run_quote(
    args: QuoteArgs,
    catalog: &LoanTypeCatalog,
) -> Result<Value, Box<dyn std::error::Error>> {
    let quote_input = read_input(args.loan, catalog)?;
    let result = quote::quote_summary(catalog, &quote_input.request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: ScheduleArgs,
    catalog: &LoanTypeCatalog,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut quote_input = read_input(args.loan, catalog)?;
    if let Some(max_periods) = args.max_periods {
        quote_input.max_periods = Some(max_periods);
    }
    let result = quote::quote_loan(catalog, &quote_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Input file, then piped stdin, then flags. Documents are validated
/// field by field so a bad number reports its range error.
fn read_input(
    args: LoanArgs,
    catalog: &LoanTypeCatalog,
) -> Result<QuoteInput, Box<dyn std::error::Error>> {
    let document: Option<QuoteDocument> = match args.input {
        Some(ref path) => Some(input::file::read_json(path)?),
        None => input::stdin::read_stdin()?,
    };
    if let Some(document) = document {
        return Ok(catalog.validate_document(&document)?);
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let tenure = args
        .tenure
        .ok_or("--tenure is required (or provide --input)")?;

    Ok(QuoteInput {
        request: LoanRequest::new(args.loan_type, principal, rate, tenure),
        max_periods: None,
    })
}
