use chrono::{Months, NaiveDate};

/// number of calendar months a credit runs before it falls due
pub const CREDIT_TERM_MONTHS: u32 = 3;

/// due date for a credit: purchase date plus the credit term.
///
/// Month addition follows calendar clamping, so a purchase on Jan 31 falls
/// due on Apr 30 and a purchase on Nov 30 falls due on the last day of
/// February.
pub fn due_date(purchase_date: NaiveDate) -> NaiveDate {
    purchase_date + Months::new(CREDIT_TERM_MONTHS)
}

/// whole calendar days the payment is late; 0 when on time or early
pub fn days_late(due_date: NaiveDate, payment_date: NaiveDate) -> u32 {
    if payment_date <= due_date {
        0
    } else {
        (payment_date - due_date).num_days() as u32
    }
}

/// calendar months the payment is late, rounded up.
///
/// Any partial month counts as a full additional month: one day past the
/// due date is already one month late, one month and a day is two.
pub fn months_late(due_date: NaiveDate, payment_date: NaiveDate) -> u32 {
    if payment_date <= due_date {
        return 0;
    }

    let mut months = 1;
    while due_date + Months::new(months) < payment_date {
        months += 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_due_date_adds_three_months() {
        assert_eq!(due_date(date(2024, 1, 1)), date(2024, 4, 1));
        assert_eq!(due_date(date(2024, 10, 15)), date(2025, 1, 15));
    }

    #[test]
    fn test_due_date_clamps_short_months() {
        // Jan 31 has no Apr 31 counterpart
        assert_eq!(due_date(date(2024, 1, 31)), date(2024, 4, 30));
        // Nov 30 lands in February, leap and non-leap
        assert_eq!(due_date(date(2023, 11, 30)), date(2024, 2, 29));
        assert_eq!(due_date(date(2024, 11, 30)), date(2025, 2, 28));
    }

    #[test]
    fn test_days_late() {
        let due = date(2024, 4, 1);
        assert_eq!(days_late(due, date(2024, 3, 25)), 0);
        assert_eq!(days_late(due, due), 0);
        assert_eq!(days_late(due, date(2024, 4, 2)), 1);
        assert_eq!(days_late(due, date(2024, 4, 6)), 5);
        assert_eq!(days_late(due, date(2024, 5, 1)), 30);
    }

    #[test]
    fn test_months_late_rounds_up() {
        let due = date(2024, 1, 1);
        assert_eq!(months_late(due, due), 0);
        assert_eq!(months_late(due, date(2023, 12, 31)), 0);
        // a single day late is a full month
        assert_eq!(months_late(due, date(2024, 1, 2)), 1);
        // exactly one month is still one month
        assert_eq!(months_late(due, date(2024, 2, 1)), 1);
        // one month and a day rounds up to two
        assert_eq!(months_late(due, date(2024, 2, 2)), 2);
        assert_eq!(months_late(due, date(2024, 7, 1)), 6);
    }

    #[test]
    fn test_months_late_end_of_month_boundaries() {
        let due = date(2024, 1, 31);
        // due + 1 month clamps to Feb 29 in a leap year
        assert_eq!(months_late(due, date(2024, 2, 29)), 1);
        assert_eq!(months_late(due, date(2024, 3, 1)), 2);
    }
}
