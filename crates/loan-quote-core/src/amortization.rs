use rust_decimal::Decimal;

use crate::emi::{period_count, periodic_rate, round_currency, solve_emi};
use crate::error::LoanQuoteError;
use crate::types::*;
use crate::LoanQuoteResult;

/// Walks a level-payment loan one month at a time.
///
/// Interest is billed to the cent on the opening balance. The final period
/// repays whatever balance remains, so cent rounding never leaves residue
/// behind or overshoots below zero.
#[derive(Debug, Clone)]
pub struct Amortizer {
    periodic_rate: Rate,
    periodic_payment: Money,
    periods: u32,
    next_period: u32,
    balance: Money,
}

impl Amortizer {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        tenure_years: u32,
    ) -> LoanQuoteResult<Self> {
        let periodic_payment = solve_emi(principal, annual_rate_percent, tenure_years)?;
        Ok(Amortizer {
            periodic_rate: periodic_rate(annual_rate_percent),
            periodic_payment,
            periods: period_count(tenure_years)?,
            next_period: 1,
            balance: principal,
        })
    }

    pub fn periodic_payment(&self) -> Money {
        self.periodic_payment
    }

    pub fn periods(&self) -> u32 {
        self.periods
    }

    fn step(&mut self) -> LoanQuoteResult<AmortizationEntry> {
        let period = self.next_period;
        let interest = self
            .balance
            .checked_mul(self.periodic_rate)
            .map(round_currency)
            .ok_or_else(|| LoanQuoteError::overflow(format!("interest at period {period}")))?;

        let principal = if period == self.periods {
            self.balance
        } else {
            (self.periodic_payment - interest)
                .max(Decimal::ZERO)
                .min(self.balance)
        };

        // `principal <= balance` above keeps the balance non-negative.
        self.balance -= principal;
        self.next_period += 1;

        Ok(AmortizationEntry {
            period,
            payment: principal + interest,
            principal_component: principal,
            interest_component: interest,
            remaining_balance: self.balance,
        })
    }
}

impl Iterator for Amortizer {
    type Item = LoanQuoteResult<AmortizationEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_period > self.periods {
            return None;
        }
        Some(self.step())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.periods + 1).saturating_sub(self.next_period) as usize;
        (left, Some(left))
    }
}

/// Quote totals for the full term without materialising the schedule.
pub fn generate(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
) -> LoanQuoteResult<LoanQuote> {
    generate_schedule(principal, annual_rate_percent, tenure_years, Some(0))
        .map(|schedule| schedule.quote)
}

/// Quote plus the first `max_periods` entries (all of them when `None`).
/// Totals always cover every period regardless of truncation.
pub fn generate_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: u32,
    max_periods: Option<u32>,
) -> LoanQuoteResult<AmortizationSchedule> {
    let amortizer = Amortizer::new(principal, annual_rate_percent, tenure_years)?;
    let periodic_payment = amortizer.periodic_payment();
    let periods = amortizer.periods();
    let keep = max_periods.map_or(periods, |m| m.min(periods));

    let mut entries = Vec::with_capacity(keep as usize);
    let mut total_paid = Decimal::ZERO;

    for entry in amortizer {
        let entry = entry?;
        total_paid += entry.payment;
        if entry.period <= keep {
            entries.push(entry);
        }
    }

    let quote = LoanQuote {
        principal,
        annual_rate_percent,
        tenure_years,
        periods,
        periodic_payment,
        total_paid,
        total_interest: total_paid - principal,
    };

    tracing::debug!(
        periods,
        %periodic_payment,
        %total_paid,
        returned = entries.len(),
        "amortization schedule generated"
    );

    Ok(AmortizationSchedule { quote, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn full(principal: Decimal, rate: Decimal, tenure: u32) -> AmortizationSchedule {
        generate_schedule(principal, rate, tenure, None).unwrap()
    }

    #[test]
    fn test_home_loan_first_and_last_periods() {
        let sched = full(dec!(500000), dec!(8.5), 20);
        assert_eq!(sched.entries.len(), 240);

        let first = &sched.entries[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.payment, dec!(4339.12));
        assert_eq!(first.interest_component, dec!(3541.67));
        assert_eq!(first.principal_component, dec!(797.45));
        assert_eq!(first.remaining_balance, dec!(499202.55));

        let last = sched.entries.last().unwrap();
        assert_eq!(last.period, 240);
        assert_eq!(last.principal_component, dec!(4306.16));
        assert_eq!(last.interest_component, dec!(30.50));
        assert_eq!(last.payment, dec!(4336.66));
        assert_eq!(last.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_home_loan_totals() {
        let quote = generate(dec!(500000), dec!(8.5), 20).unwrap();
        assert_eq!(quote.periods, 240);
        assert_eq!(quote.periodic_payment, dec!(4339.12));
        assert_eq!(quote.total_paid, dec!(1041386.34));
        assert_eq!(quote.total_interest, dec!(541386.34));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let sched = full(dec!(120000), Decimal::ZERO, 10);
        assert_eq!(sched.quote.periodic_payment, dec!(1000.00));
        assert_eq!(sched.quote.total_interest, Decimal::ZERO);
        for e in &sched.entries {
            assert_eq!(e.payment, dec!(1000.00));
            assert_eq!(e.interest_component, Decimal::ZERO);
        }
        assert_eq!(sched.entries[119].remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_residue_lands_in_last_period() {
        let sched = full(dec!(100000), Decimal::ZERO, 1);
        assert_eq!(sched.entries[0].payment, dec!(8333.33));
        // 11 * 8333.33 = 91666.63, leaving 8333.37
        assert_eq!(sched.entries[11].payment, dec!(8333.37));
        assert_eq!(sched.quote.total_paid, dec!(100000));
    }

    #[test]
    fn test_truncation_keeps_full_totals() {
        let truncated = generate_schedule(dec!(500000), dec!(8.5), 20, Some(12)).unwrap();
        let whole = full(dec!(500000), dec!(8.5), 20);
        assert_eq!(truncated.entries.len(), 12);
        assert_eq!(truncated.entries[..], whole.entries[..12]);
        assert_eq!(truncated.quote, whole.quote);
    }

    #[test]
    fn test_max_periods_beyond_term() {
        let sched = generate_schedule(dec!(50000), dec!(9), 1, Some(500)).unwrap();
        assert_eq!(sched.entries.len(), 12);
    }

    #[test]
    fn test_iterator_is_exact_size() {
        let mut it = Amortizer::new(dec!(50000), dec!(9), 1).unwrap();
        assert_eq!(it.size_hint(), (12, Some(12)));
        it.next();
        assert_eq!(it.size_hint(), (11, Some(11)));
        assert_eq!(it.count(), 11);
    }

    #[test]
    fn test_propagates_solver_errors() {
        assert_eq!(
            generate(dec!(100000), dec!(8), 0).unwrap_err(),
            LoanQuoteError::InvalidTenure(0)
        );
        assert_eq!(
            generate(dec!(100000), dec!(100000), 30).unwrap_err().code(),
            "NumericOverflow"
        );
    }
}
