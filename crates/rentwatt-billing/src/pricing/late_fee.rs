//! Late-fee accrual
//!
//! ```text
//! fee = bill × pct / 100 × days_overdue
//! fee = min(fee, bill × cap)
//! ```
//!
//! The percentage is charged once per day overdue, so 2% reaches the 50%
//! cap after 25 days. The due day itself is not late. Non-positive bills
//! accrue nothing; an accrual too large to represent is the cap.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

/// Computes overdue penalties
#[derive(Debug, Clone)]
pub struct LateFeeAccruer {
    /// Maximum fee as a share of the bill amount
    cap_ratio: Decimal,
}

impl LateFeeAccruer {
    /// Cap ratios above 50% are clamped down to it.
    pub fn new(cap_ratio: f64) -> Self {
        let cap_ratio = cap_ratio.clamp(0.0, rentwatt_common::LATE_FEE_CAP_RATIO);
        Self {
            cap_ratio: Decimal::try_from(cap_ratio).unwrap_or(dec!(0.5)),
        }
    }

    /// Whole days between `due_date` and `today`; zero when not yet overdue
    pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
        if today <= due_date {
            0
        } else {
            (today - due_date).num_days()
        }
    }

    /// Late fee owed on `bill_amount` as of `today`
    pub fn calculate(
        &self,
        bill_amount: Decimal,
        due_date: NaiveDate,
        late_fee_percentage: Decimal,
        today: NaiveDate,
    ) -> Decimal {
        let days = Self::days_overdue(due_date, today);
        if days == 0 || bill_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        // cap_ratio <= 0.5, so the cap itself cannot overflow
        let cap = bill_amount * self.cap_ratio;
        let accrued = bill_amount
            .checked_mul(late_fee_percentage)
            .and_then(|fee| fee.checked_div(dec!(100)))
            .and_then(|daily_fee| daily_fee.checked_mul(Decimal::from(days)));

        match accrued {
            Some(accrued) if accrued <= cap => {
                debug!(%accrued, days, "Late fee accrued");
                accrued
            }
            _ => {
                warn!(?accrued, %cap, days, "Late fee capped");
                cap
            }
        }
    }
}

impl Default for LateFeeAccruer {
    fn default() -> Self {
        Self::new(rentwatt_common::LATE_FEE_CAP_RATIO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_due_day_is_not_late() {
        let accruer = LateFeeAccruer::default();
        assert_eq!(
            accruer.calculate(dec!(1000), today(), dec!(2), today()),
            Decimal::ZERO
        );
        let tomorrow = today() + Duration::days(1);
        assert_eq!(
            accruer.calculate(dec!(1000), tomorrow, dec!(2), today()),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_per_day_accrual() {
        let accruer = LateFeeAccruer::default();
        let due = today() - Duration::days(10);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(2), today()), dec!(200));

        let due = today() - Duration::days(1);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(2), today()), dec!(20));
    }

    #[test]
    fn test_fee_capped_at_half_the_bill() {
        let accruer = LateFeeAccruer::default();
        let due = today() - Duration::days(40);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(5), today()), dec!(500));

        // 2% hits the cap exactly at 25 days
        let due = today() - Duration::days(25);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(2), today()), dec!(500));
    }

    #[test]
    fn test_zero_percentage() {
        let accruer = LateFeeAccruer::default();
        let due = today() - Duration::days(30);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(0), today()), Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_bill_accrues_nothing() {
        let accruer = LateFeeAccruer::default();
        let due = today() - Duration::days(30);
        assert_eq!(accruer.calculate(dec!(-1000), due, dec!(5), today()), Decimal::ZERO);
        assert_eq!(accruer.calculate(Decimal::ZERO, due, dec!(5), today()), Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_accrual_is_capped() {
        let accruer = LateFeeAccruer::default();
        let due = today() - Duration::days(3);
        let fee = accruer.calculate(Decimal::MAX, due, dec!(1000), today());
        assert_eq!(fee, Decimal::MAX * dec!(0.5));
    }

    #[test]
    fn test_cap_ratio_never_exceeds_half() {
        let accruer = LateFeeAccruer::new(1.0);
        let due = today() - Duration::days(40);
        assert_eq!(accruer.calculate(dec!(1000), due, dec!(5), today()), dec!(500));

        let stricter = LateFeeAccruer::new(0.25);
        assert_eq!(stricter.calculate(dec!(1000), due, dec!(5), today()), dec!(250));
    }

    #[test]
    fn test_days_overdue() {
        let due = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        assert_eq!(LateFeeAccruer::days_overdue(due, today()), 15);
        assert_eq!(LateFeeAccruer::days_overdue(today(), due), 0);
    }
}
