use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanQuoteError {
    #[error("Unknown loan type: '{0}'")]
    UnknownLoanType(String),

    /// `value` is the offending input as received, e.g. `10` or `null`.
    #[error("Principal {value} outside {loan_type} range [{min}, {max}]")]
    PrincipalOutOfRange {
        loan_type: String,
        value: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("Rate {value}% outside {loan_type} range [{min}%, {max}%]")]
    RateOutOfRange {
        loan_type: String,
        value: String,
        min: Decimal,
        max: Decimal,
    },

    #[error("Tenure {value}y outside {loan_type} range [{min}y, {max}y]")]
    TenureOutOfRange {
        loan_type: String,
        value: String,
        min: u32,
        max: u32,
    },

    #[error("Invalid tenure: {0} years yields no repayment periods")]
    InvalidTenure(u32),

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },

    #[error("Invalid catalog: {loan_type}: {reason}")]
    InvalidCatalog { loan_type: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanQuoteError {
    /// Stable error kind, independent of the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            LoanQuoteError::UnknownLoanType(_) => "UnknownLoanType",
            LoanQuoteError::PrincipalOutOfRange { .. } => "PrincipalOutOfRange",
            LoanQuoteError::RateOutOfRange { .. } => "RateOutOfRange",
            LoanQuoteError::TenureOutOfRange { .. } => "TenureOutOfRange",
            LoanQuoteError::InvalidTenure(_) => "InvalidTenure",
            LoanQuoteError::NumericOverflow { .. } => "NumericOverflow",
            LoanQuoteError::InvalidCatalog { .. } => "InvalidCatalog",
            LoanQuoteError::SerializationError(_) => "SerializationError",
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        LoanQuoteError::NumericOverflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for LoanQuoteError {
    fn from(e: serde_json::Error) -> Self {
        LoanQuoteError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(
            LoanQuoteError::UnknownLoanType("boat".into()).code(),
            "UnknownLoanType"
        );
        assert_eq!(LoanQuoteError::InvalidTenure(0).code(), "InvalidTenure");
        assert_eq!(
            LoanQuoteError::overflow("EMI growth factor").code(),
            "NumericOverflow"
        );
    }

    #[test]
    fn test_message_carries_bounds() {
        let err = LoanQuoteError::PrincipalOutOfRange {
            loan_type: "car".into(),
            value: "10".into(),
            min: dec!(50000),
            max: dec!(2000000),
        };
        assert_eq!(
            err.to_string(),
            "Principal 10 outside car range [50000, 2000000]"
        );
    }

    #[test]
    fn test_catalog_message_uses_colon_separators() {
        let err = LoanQuoteError::InvalidCatalog {
            loan_type: "staff".into(),
            reason: "min_rate exceeds max_rate".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid catalog: staff: min_rate exceeds max_rate"
        );
    }
}
