use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::catalog::{LoanType, LoanTypeCatalog};
use crate::error::LoanQuoteError;
use crate::quote::{QuoteDocument, QuoteInput};
use crate::types::{LoanRequest, Money, Percent};
use crate::LoanQuoteResult;

impl LoanTypeCatalog {
    /// Check a request against its loan type's bounds.
    ///
    /// Rules run in a fixed order and the first failure is reported:
    /// loan type, principal, rate, tenure. Out-of-range values are never clamped.
    pub fn validate(&self, request: LoanRequest) -> LoanQuoteResult<LoanRequest> {
        let loan_type = self.lookup(&request.loan_type_id)?;
        let checked = check_principal(loan_type, request.principal)
            .and_then(|_| check_rate(loan_type, request.annual_rate_percent))
            .and_then(|_| check_tenure(loan_type, request.tenure_years));
        log_rejection(&request.loan_type_id, checked)?;
        Ok(request)
    }

    /// Validate an untyped request document, as sent by the CLI and bindings.
    ///
    /// Same rule order as [`LoanTypeCatalog::validate`]. A field that is
    /// missing, `null`, non-numeric, negative or (for tenure) fractional fails
    /// its own rule, so an unknown loan type still wins over a bad number.
    pub fn validate_document(&self, document: &QuoteDocument) -> LoanQuoteResult<QuoteInput> {
        let loan_type_id = match document.loan_type_id.as_ref() {
            Some(Value::String(id)) => id.as_str(),
            other => return Err(LoanQuoteError::UnknownLoanType(describe(other))),
        };
        let loan_type = self.lookup(loan_type_id)?;
        let request = log_rejection(loan_type_id, resolve_fields(loan_type, document))?;
        Ok(QuoteInput {
            request,
            max_periods: document.max_periods,
        })
    }
}

/// Validate against the builtin catalog.
pub fn validate(request: LoanRequest) -> LoanQuoteResult<LoanRequest> {
    LoanTypeCatalog::builtin().validate(request)
}

fn log_rejection<T>(loan_type_id: &str, checked: LoanQuoteResult<T>) -> LoanQuoteResult<T> {
    if let Err(ref err) = checked {
        tracing::debug!(
            loan_type = %loan_type_id,
            code = err.code(),
            "loan request rejected"
        );
    }
    checked
}

fn resolve_fields(loan_type: &LoanType, document: &QuoteDocument) -> LoanQuoteResult<LoanRequest> {
    let principal = match decimal_of(document.principal.as_ref()) {
        Some(principal) => principal,
        None => return Err(principal_error(loan_type, describe(document.principal.as_ref()))),
    };
    check_principal(loan_type, principal)?;

    let rate = match decimal_of(document.annual_rate_percent.as_ref()) {
        Some(rate) => rate,
        None => {
            return Err(rate_error(
                loan_type,
                describe(document.annual_rate_percent.as_ref()),
            ))
        }
    };
    check_rate(loan_type, rate)?;

    let tenure = match whole_years(document.tenure_years.as_ref()) {
        Some(tenure) => tenure,
        None => return Err(tenure_error(loan_type, describe(document.tenure_years.as_ref()))),
    };
    check_tenure(loan_type, tenure)?;

    Ok(LoanRequest::new(loan_type.id.clone(), principal, rate, tenure))
}

fn check_principal(loan_type: &LoanType, principal: Money) -> LoanQuoteResult<()> {
    if principal < loan_type.min_amount || principal > loan_type.max_amount {
        return Err(principal_error(loan_type, principal.to_string()));
    }
    Ok(())
}

fn check_rate(loan_type: &LoanType, rate: Percent) -> LoanQuoteResult<()> {
    if rate < loan_type.min_rate || rate > loan_type.max_rate {
        return Err(rate_error(loan_type, rate.to_string()));
    }
    Ok(())
}

fn check_tenure(loan_type: &LoanType, tenure_years: u32) -> LoanQuoteResult<()> {
    if tenure_years == 0
        || tenure_years < loan_type.min_tenure_years
        || tenure_years > loan_type.max_tenure_years
    {
        return Err(tenure_error(loan_type, tenure_years.to_string()));
    }
    Ok(())
}

fn principal_error(loan_type: &LoanType, value: String) -> LoanQuoteError {
    LoanQuoteError::PrincipalOutOfRange {
        loan_type: loan_type.id.clone(),
        value,
        min: loan_type.min_amount,
        max: loan_type.max_amount,
    }
}

fn rate_error(loan_type: &LoanType, value: String) -> LoanQuoteError {
    LoanQuoteError::RateOutOfRange {
        loan_type: loan_type.id.clone(),
        value,
        min: loan_type.min_rate,
        max: loan_type.max_rate,
    }
}

fn tenure_error(loan_type: &LoanType, value: String) -> LoanQuoteError {
    LoanQuoteError::TenureOutOfRange {
        loan_type: loan_type.id.clone(),
        value,
        min: loan_type.min_tenure_years,
        max: loan_type.max_tenure_years,
    }
}

/// JSON numbers and numeric strings; `1e21` style exponents are accepted.
fn decimal_of(value: Option<&Value>) -> Option<Decimal> {
    let text = match value? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Non-negative whole numbers only; `20.0` counts, `2.5` and `-1` do not.
fn whole_years(value: Option<&Value>) -> Option<u32> {
    let years = match value? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|y| y.fract() == 0.0 && *y >= 0.0 && *y <= f64::from(u32::MAX))
                .map(|y| y as u64)
        })?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u32::try_from(years).ok()
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
