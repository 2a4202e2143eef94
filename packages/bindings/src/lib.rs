use napi::Result as NapiResult;
use napi_derive::napi;

use loan_quote_core::catalog::LoanTypeCatalog;
use loan_quote_core::quote::{self, QuoteDocument, QuoteInput};
use loan_quote_core::LoanQuoteError;

/// Convert a core error into a napi::Error whose reason starts with the
/// stable error code, e.g. `PrincipalOutOfRange: Principal 10 outside ...`.
fn to_napi_error(e: LoanQuoteError) -> napi::Error {
    napi::Error::from_reason(format!("{}: {}", e.code(), e))
}

/// Parse loosely, then let the validator name the first failing rule.
/// A NaN principal from JS arrives as `null` and reports `PrincipalOutOfRange`.
fn parse_input(input_json: &str) -> NapiResult<QuoteInput> {
    let document: QuoteDocument =
        serde_json::from_str(input_json).map_err(|e| to_napi_error(e.into()))?;
    LoanTypeCatalog::builtin()
        .validate_document(&document)
        .map_err(to_napi_error)
}

fn to_json(value: &impl serde::Serialize) -> NapiResult<String> {
    serde_json::to_string(value).map_err(|e| to_napi_error(e.into()))
}

/// `{loan_type_id, principal, annual_rate_percent, tenure_years}` -> quote envelope
#[napi]
pub fn compute_quote(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = quote::quote_summary(LoanTypeCatalog::builtin(), &input.request)
        .map_err(to_napi_error)?;
    to_json(&output)
}

/// Same request plus optional `max_periods` -> quote and schedule envelope
#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let output = quote::quote_loan(LoanTypeCatalog::builtin(), &input).map_err(to_napi_error)?;
    to_json(&output)
}

/// Builtin loan types with their bounds and feature lists, for UI hints.
#[napi]
pub fn list_loan_types() -> NapiResult<String> {
    to_json(&LoanTypeCatalog::builtin().loan_types())
}

