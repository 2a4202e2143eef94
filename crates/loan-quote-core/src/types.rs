use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Periodic rates expressed as decimals (0.005 = 0.5% per period).
pub type Rate = Decimal;

/// Annual nominal rates as quoted to borrowers (8.5 = 8.5% p.a.).
pub type Percent = Decimal;

/// Repayment periods per year. Installments are monthly.
pub const PERIODS_PER_YEAR: u32 = 12;

/// A request for a quote against one catalog loan type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub loan_type_id: String,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
}

impl LoanRequest {
    pub fn new(
        loan_type_id: impl Into<String>,
        principal: Money,
        annual_rate_percent: Percent,
        tenure_years: u32,
    ) -> Self {
        LoanRequest {
            loan_type_id: loan_type_id.into(),
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }
}

/// Rollup of a fully amortized loan. Totals always cover the full term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
    pub periods: u32,
    pub periodic_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub period: u32,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
}

/// A quote together with its (possibly truncated) period-by-period schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub quote: LoanQuote,
    pub entries: Vec<AmortizationEntry>,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
