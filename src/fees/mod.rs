pub mod interest;
pub mod penalty;

pub use interest::{InterestAssessment, MONTHLY_INTEREST_RATE};
pub use penalty::PenaltyAssessment;

use chrono::NaiveDate;

use crate::decimal::Money;

/// combined fee assessment for one payment event
#[derive(Debug, Clone, PartialEq)]
pub struct FeeAssessment {
    pub penalty: PenaltyAssessment,
    pub interest: InterestAssessment,
}

impl FeeAssessment {
    /// total fees charged on top of the tendered amount
    pub fn total(&self) -> Money {
        self.penalty.amount + self.interest.amount
    }
}

/// assess penalty and interest for a payment against a credit's due date.
///
/// `principal` is the credit's original total amount; fees are charged per
/// payment event against the same due date, never accumulated across
/// events.
pub fn assess(due_date: NaiveDate, payment_date: NaiveDate, principal: Money) -> FeeAssessment {
    FeeAssessment {
        penalty: penalty::assess(due_date, payment_date),
        interest: interest::assess(due_date, payment_date, principal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_on_time_payment_carries_no_fees() {
        let due = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let fees = assess(due, due, Money::from_major(300));

        assert_eq!(fees.penalty.amount, Money::ZERO);
        assert_eq!(fees.interest.amount, Money::ZERO);
        assert_eq!(fees.total(), Money::ZERO);
    }

    #[test]
    fn test_late_payment_combines_both_fees() {
        let due = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let paid = NaiveDate::from_ymd_opt(2024, 4, 6).unwrap();
        let fees = assess(due, paid, Money::from_major(300));

        assert_eq!(fees.penalty.amount, Money::from_major(3));
        assert_eq!(fees.interest.amount, Money::from_str_exact("22.50").unwrap());
        assert_eq!(fees.total(), Money::from_str_exact("25.50").unwrap());
    }
}
