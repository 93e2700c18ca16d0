use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::dates::months_late;
use crate::decimal::Money;

/// interest charged per started month past the due date
pub const MONTHLY_INTEREST_RATE: Decimal = dec!(0.075);

/// interest assessment for a single payment event
#[derive(Debug, Clone, PartialEq)]
pub struct InterestAssessment {
    pub amount: Money,
    pub months_late: u32,
    pub principal_base: Money,
}

/// assess monthly interest for a payment date.
///
/// Interest is charged against the credit's original total amount, not the
/// remaining balance, at 7.5% per started month past the due date. The
/// product is rounded half-up to 2 decimal places once, at the final value.
pub fn assess(due_date: NaiveDate, payment_date: NaiveDate, principal: Money) -> InterestAssessment {
    let months = months_late(due_date, payment_date);

    if months == 0 {
        return InterestAssessment {
            amount: Money::ZERO,
            months_late: 0,
            principal_base: principal,
        };
    }

    let raw = principal.as_decimal() * MONTHLY_INTEREST_RATE * Decimal::from(months);

    InterestAssessment {
        amount: Money::from_decimal(raw),
        months_late: months,
        principal_base: principal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_interest_on_time_or_early() {
        let due = date(2024, 4, 1);
        let principal = Money::from_major(300);

        assert_eq!(assess(due, date(2024, 3, 1), principal).amount, Money::ZERO);
        assert_eq!(assess(due, due, principal).amount, Money::ZERO);
    }

    #[test]
    fn test_one_day_late_charges_a_full_month() {
        let due = date(2024, 1, 1);
        let result = assess(due, date(2024, 1, 2), Money::from_major(300));

        assert_eq!(result.months_late, 1);
        assert_eq!(result.amount, Money::from_str_exact("22.50").unwrap());
    }

    #[test]
    fn test_interest_scales_with_months() {
        let due = date(2024, 1, 1);
        let principal = Money::from_major(200);

        // two started months: 200 * 0.075 * 2
        let result = assess(due, date(2024, 2, 15), principal);
        assert_eq!(result.months_late, 2);
        assert_eq!(result.amount, Money::from_major(30));
    }

    #[test]
    fn test_rounds_half_up_at_final_value() {
        let due = date(2024, 1, 1);
        // 133.30 * 0.075 = 9.9975 -> 10.00
        let result = assess(due, date(2024, 1, 5), Money::from_str_exact("133.30").unwrap());
        assert_eq!(result.amount, Money::from_major(10));
    }

    #[test]
    fn test_principal_base_is_recorded() {
        let due = date(2024, 1, 1);
        let principal = Money::from_major(300);
        let result = assess(due, date(2024, 2, 2), principal);
        assert_eq!(result.principal_base, principal);
    }
}
