pub mod amortization;
pub mod catalog;
pub mod emi;
pub mod error;
pub mod quote;
pub mod types;
pub mod validation;

pub use catalog::{LoanType, LoanTypeCatalog};
pub use error::LoanQuoteError;
pub use quote::{compute_quote, compute_schedule, quote_loan, quote_summary, QuoteDocument, QuoteInput};
pub use types::*;

/// Standard result type for all loan-quote operations
pub type LoanQuoteResult<T> = Result<T, LoanQuoteError>;
