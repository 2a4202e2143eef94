use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::LoanQuoteError;
use crate::types::{LoanRequest, Money, Percent};
use crate::LoanQuoteResult;

/// A loan category and the parameter ranges it accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_rate: Percent,
    pub max_rate: Percent,
    pub min_tenure_years: u32,
    pub max_tenure_years: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl LoanType {
    /// The request a borrower starts from when picking this category:
    /// smallest amount, lowest rate, shortest tenure.
    pub fn default_request(&self) -> LoanRequest {
        LoanRequest::new(
            self.id.clone(),
            self.min_amount,
            self.min_rate,
            self.min_tenure_years,
        )
    }

    fn check_invariants(&self) -> LoanQuoteResult<()> {
        let invalid = |reason: &str| LoanQuoteError::InvalidCatalog {
            loan_type: self.id.clone(),
            reason: reason.into(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.min_amount <= Decimal::ZERO {
            return Err(invalid("min_amount must be positive"));
        }
        if self.min_amount > self.max_amount {
            return Err(invalid("min_amount exceeds max_amount"));
        }
        if self.min_rate < Decimal::ZERO {
            return Err(invalid("min_rate cannot be negative"));
        }
        if self.min_rate > self.max_rate {
            return Err(invalid("min_rate exceeds max_rate"));
        }
        if self.min_tenure_years == 0 {
            return Err(invalid("min_tenure_years must be at least 1"));
        }
        if self.min_tenure_years > self.max_tenure_years {
            return Err(invalid("min_tenure_years exceeds max_tenure_years"));
        }
        Ok(())
    }
}

/// Immutable registry of loan types. Replace the whole catalog to change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LoanType>", into = "Vec<LoanType>")]
pub struct LoanTypeCatalog {
    loan_types: Vec<LoanType>,
}

static BUILTIN: Lazy<LoanTypeCatalog> = Lazy::new(|| LoanTypeCatalog {
    loan_types: builtin_loan_types(),
});

impl LoanTypeCatalog {
    /// Build a catalog, rejecting entries that break their bounds or reuse an id.
    pub fn new(loan_types: Vec<LoanType>) -> LoanQuoteResult<Self> {
        let mut seen = HashSet::with_capacity(loan_types.len());
        for loan_type in &loan_types {
            loan_type.check_invariants()?;
            if !seen.insert(loan_type.id.as_str()) {
                return Err(LoanQuoteError::InvalidCatalog {
                    loan_type: loan_type.id.clone(),
                    reason: "duplicate id".into(),
                });
            }
        }
        Ok(LoanTypeCatalog { loan_types })
    }

    /// The process-wide catalog of home, car, personal and education loans.
    pub fn builtin() -> &'static LoanTypeCatalog {
        &BUILTIN
    }

    /// Parse a catalog from a JSON array of loan types.
    pub fn from_json(json: &str) -> LoanQuoteResult<Self> {
        let loan_types: Vec<LoanType> = serde_json::from_str(json)?;
        LoanTypeCatalog::new(loan_types)
    }

    pub fn lookup(&self, loan_type_id: &str) -> LoanQuoteResult<&LoanType> {
        self.loan_types
            .iter()
            .find(|t| t.id == loan_type_id)
            .ok_or_else(|| LoanQuoteError::UnknownLoanType(loan_type_id.to_string()))
    }

    /// Loan types in registration order.
    pub fn loan_types(&self) -> &[LoanType] {
        &self.loan_types
    }
}

impl TryFrom<Vec<LoanType>> for LoanTypeCatalog {
    type Error = LoanQuoteError;

    fn try_from(loan_types: Vec<LoanType>) -> LoanQuoteResult<Self> {
        LoanTypeCatalog::new(loan_types)
    }
}

impl From<LoanTypeCatalog> for Vec<LoanType> {
    fn from(catalog: LoanTypeCatalog) -> Self {
        catalog.loan_types
    }
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_loan_types() -> Vec<LoanType> {
    vec![
        LoanType {
            id: "home".into(),
            name: "Home Loan".into(),
            description: "Long-term loan for purchasing or constructing a house".into(),
            min_amount: dec!(100000),
            max_amount: dec!(10000000),
            min_rate: dec!(6.5),
            max_rate: dec!(12.0),
            min_tenure_years: 5,
            max_tenure_years: 30,
            features: features(&[
                "Tax benefits under Section 24",
                "Low interest rates",
                "Long repayment period",
                "Prepayment options",
            ]),
        },
        LoanType {
            id: "car".into(),
            name: "Car Loan".into(),
            description: "Loan for purchasing new or used vehicles".into(),
            min_amount: dec!(50000),
            max_amount: dec!(2000000),
            min_rate: dec!(7.0),
            max_rate: dec!(15.0),
            min_tenure_years: 1,
            max_tenure_years: 7,
            features: features(&[
                "Quick approval",
                "Flexible tenure",
                "No prepayment charges",
                "Insurance options",
            ]),
        },
        LoanType {
            id: "personal".into(),
            name: "Personal Loan".into(),
            description: "Unsecured loan for personal expenses".into(),
            min_amount: dec!(10000),
            max_amount: dec!(5000000),
            min_rate: dec!(10.0),
            max_rate: dec!(24.0),
            min_tenure_years: 1,
            max_tenure_years: 5,
            features: features(&[
                "No collateral required",
                "Quick disbursal",
                "Flexible usage",
                "Higher interest rates",
            ]),
        },
        LoanType {
            id: "education".into(),
            name: "Education Loan".into(),
            description: "Loan for higher education expenses".into(),
            min_amount: dec!(50000),
            max_amount: dec!(10000000),
            min_rate: dec!(6.0),
            max_rate: dec!(14.0),
            min_tenure_years: 1,
            max_tenure_years: 15,
            features: features(&[
                "Low interest rates",
                "Moratorium period",
                "Tax benefits",
                "No collateral for small amounts",
            ]),
        },
    ]
}
