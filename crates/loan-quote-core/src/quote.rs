use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::amortization::{generate, generate_schedule};
use crate::catalog::LoanTypeCatalog;
use crate::types::*;
use crate::LoanQuoteResult;

const METHODOLOGY: &str = "Level-payment EMI amortization (monthly, round-half-up to 0.01)";

/// Validated request plus the schedule length to return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteInput {
    #[serde(flatten)]
    pub request: LoanRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_periods: Option<u32>,
}

/// Request document as received by the CLI and the bindings.
///
/// Fields stay untyped JSON until [`LoanTypeCatalog::validate_document`]
/// maps each one to its validation rule, so a `null` principal or a
/// fractional tenure reports a range error instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteDocument {
    #[serde(default)]
    pub loan_type_id: Option<Value>,
    #[serde(default)]
    pub principal: Option<Value>,
    #[serde(default)]
    pub annual_rate_percent: Option<Value>,
    #[serde(default)]
    pub tenure_years: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_periods: Option<u32>,
}

/// Validate against the builtin catalog, then quote the full term.
pub fn compute_quote(
    loan_type_id: &str,
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> LoanQuoteResult<LoanQuote> {
    let request = LoanTypeCatalog::builtin().validate(LoanRequest::new(
        loan_type_id,
        principal,
        annual_rate_percent,
        tenure_years,
    ))?;
    generate(
        request.principal,
        request.annual_rate_percent,
        request.tenure_years,
    )
}

/// As [`compute_quote`], also returning up to `max_periods` schedule entries.
pub fn compute_schedule(
    loan_type_id: &str,
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
    max_periods: Option<u32>,
) -> LoanQuoteResult<AmortizationSchedule> {
    let input = QuoteInput {
        request: LoanRequest::new(loan_type_id, principal, annual_rate_percent, tenure_years),
        max_periods,
    };
    schedule_for(LoanTypeCatalog::builtin(), &input)
}

/// Quote envelope without schedule entries.
pub fn quote_summary(
    catalog: &LoanTypeCatalog,
    request: &LoanRequest,
) -> LoanQuoteResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let input = QuoteInput {
        request: request.clone(),
        max_periods: Some(0),
    };
    let quote = schedule_for(catalog, &input)?.quote;
    let warnings = quote_warnings(&quote);
    let assumptions = describe_assumptions(catalog, request, None)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, quote))
}

/// Full quote envelope: schedule plus methodology, assumptions and warnings.
pub fn quote_loan(
    catalog: &LoanTypeCatalog,
    input: &QuoteInput,
) -> LoanQuoteResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();

    let schedule = schedule_for(catalog, input)?;
    let mut warnings = quote_warnings(&schedule.quote);
    if (schedule.entries.len() as u32) < schedule.quote.periods {
        warnings.push(format!(
            "Schedule truncated to {} of {} periods; totals reflect the full term",
            schedule.entries.len(),
            schedule.quote.periods
        ));
    }
    let assumptions = describe_assumptions(catalog, &input.request, input.max_periods)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, schedule))
}

fn quote_warnings(quote: &LoanQuote) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    if quote.annual_rate_percent.is_zero() {
        warnings.push(format!(
            "Zero-interest loan: principal split evenly across {} installments",
            quote.periods
        ));
    }

    let regular_total = quote.periodic_payment * Decimal::from(quote.periods);
    let final_adjustment = quote.total_paid - regular_total;
    if !final_adjustment.is_zero() {
        warnings.push(format!(
            "Final installment adjusted by {final_adjustment} to absorb rounding residue"
        ));
    }

    warnings
}

fn describe_assumptions(
    catalog: &LoanTypeCatalog,
    request: &LoanRequest,
    max_periods: Option<u32>,
) -> LoanQuoteResult<Value> {
    let loan_type = catalog.lookup(&request.loan_type_id)?;
    Ok(serde_json::json!({
        "loan_type": loan_type.name,
        "principal": request.principal.to_string(),
        "annual_rate_percent": request.annual_rate_percent.to_string(),
        "tenure_years": request.tenure_years,
        "periods_per_year": PERIODS_PER_YEAR,
        "max_periods": max_periods,
    }))
}

fn schedule_for(
    catalog: &LoanTypeCatalog,
    input: &QuoteInput,
) -> LoanQuoteResult<AmortizationSchedule> {
    let request = catalog.validate(input.request.clone())?;
    generate_schedule(
        request.principal,
        request.annual_rate_percent,
        request.tenure_years,
        input.max_periods,
    )
}
