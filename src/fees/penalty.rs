use chrono::NaiveDate;

use crate::dates::days_late;
use crate::decimal::Money;

/// days late before the lower penalty band applies
pub const LOWER_BAND_DAYS: u32 = 3;
/// days late before the upper penalty band applies
pub const UPPER_BAND_DAYS: u32 = 5;

/// penalty assessment for a single payment event
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyAssessment {
    pub amount: Money,
    pub days_late: u32,
}

/// assess the fixed late penalty for a payment date.
///
/// Under 3 days late carries no penalty, 3 or 4 days carries 2.00, and 5 or
/// more carries 3.00. The fee is flat per payment event, never prorated and
/// never accumulated across multiple late payments on the same credit.
pub fn assess(due_date: NaiveDate, payment_date: NaiveDate) -> PenaltyAssessment {
    let days = days_late(due_date, payment_date);

    let amount = if days >= UPPER_BAND_DAYS {
        Money::from_major(3)
    } else if days >= LOWER_BAND_DAYS {
        Money::from_major(2)
    } else {
        Money::ZERO
    };

    PenaltyAssessment { amount, days_late: days }
}
