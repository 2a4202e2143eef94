use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanQuoteError;
use crate::types::{Money, Percent, Rate, PERIODS_PER_YEAR};
use crate::LoanQuoteResult;

/// Decimal places of the smallest currency unit (cent / paisa).
pub const CURRENCY_DP: u32 = 2;

/// Round to the smallest currency unit, halves away from zero.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Monthly rate from an annual nominal percentage: 8.5 -> 0.0070833...
pub fn periodic_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(PERIODS_PER_YEAR)
}

/// Number of monthly installments in the tenure.
pub fn period_count(tenure_years: u32) -> LoanQuoteResult<u32> {
    if tenure_years == 0 {
        return Err(LoanQuoteError::InvalidTenure(tenure_years));
    }
    tenure_years
        .checked_mul(PERIODS_PER_YEAR)
        .ok_or_else(|| LoanQuoteError::overflow("period count"))
}

/// Equated Monthly Installment that fully amortizes `principal` over the tenure.
///
/// Uses the level-payment annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`, or
/// `P / n` for a zero-interest loan where that formula degenerates to 0/0.
/// Inputs are not range-checked here; validate the request first.
pub fn solve_emi(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> LoanQuoteResult<Money> {
    let n = period_count(tenure_years)?;
    let r = periodic_rate(annual_rate_percent);

    if r.is_zero() {
        return Ok(round_currency(principal / Decimal::from(n)));
    }

    let growth = (Decimal::ONE + r)
        .checked_powi(i64::from(n))
        .ok_or_else(|| LoanQuoteError::overflow("EMI growth factor (1+r)^n"))?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanQuoteError::overflow(
            "EMI denominator: periodic rate below decimal precision",
        ));
    }

    let payment = principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanQuoteError::overflow("EMI numerator"))?;

    Ok(round_currency(payment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_currency(dec!(1.005)), dec!(1.01));
        assert_eq!(round_currency(dec!(1.0049)), dec!(1.00));
        assert_eq!(round_currency(dec!(3541.666666)), dec!(3541.67));
        // Banker's rounding would give 2.12 here.
        assert_eq!(round_currency(dec!(2.125)), dec!(2.13));
    }

    #[test]
    fn test_periodic_rate() {
        let r = periodic_rate(dec!(12));
        assert_eq!(r, dec!(0.01));
        let r = periodic_rate(dec!(8.5));
        assert!((r - dec!(0.0070833333)).abs() < dec!(0.0000000001));
    }

    #[test]
    fn test_period_count() {
        assert_eq!(period_count(20).unwrap(), 240);
        assert_eq!(period_count(0).unwrap_err(), LoanQuoteError::InvalidTenure(0));
        assert_eq!(period_count(u32::MAX).unwrap_err().code(), "NumericOverflow");
    }

    #[test]
    fn test_home_loan_emi() {
        let emi = solve_emi(dec!(500000), dec!(8.5), 20).unwrap();
        assert_eq!(emi, dec!(4339.12));
    }

    #[test]
    fn test_one_year_twelve_percent() {
        // 100000 at 1% per month over 12 months
        let emi = solve_emi(dec!(100000), dec!(12), 1).unwrap();
        assert_eq!(emi, dec!(8884.88));
    }

    #[test]
    fn test_zero_rate_is_exact_split() {
        assert_eq!(solve_emi(dec!(120000), Decimal::ZERO, 10).unwrap(), dec!(1000.00));
        assert_eq!(solve_emi(dec!(100000), Decimal::ZERO, 1).unwrap(), dec!(8333.33));
    }

    #[test]
    fn test_zero_tenure() {
        let err = solve_emi(dec!(100000), dec!(8), 0).unwrap_err();
        assert_eq!(err.code(), "InvalidTenure");
    }

    #[test]
    fn test_extreme_rate_overflows() {
        let err = solve_emi(dec!(100000), dec!(100000), 30).unwrap_err();
        assert_eq!(err.code(), "NumericOverflow");
    }

    #[test]
    fn test_emi_exceeds_interest_only_payment() {
        let principal = dec!(250000);
        let rate = dec!(10);
        let emi = solve_emi(principal, rate, 15).unwrap();
        assert!(emi > principal * periodic_rate(rate));
    }
}
