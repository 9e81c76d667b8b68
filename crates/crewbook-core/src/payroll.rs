//! # Payroll
//!
//! Turns attendance marks into days worked and pay.
//!
//! ```text
//!   Present ──► 1 day
//!   HalfDay ──► ½ day        pay = daily_rate × Σ days, rounded to the cent
//!   Absent  ──► 0
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AttendanceRecord, AttendanceStatus};

impl AttendanceStatus {
    /// Fraction of a working day this mark is worth.
    pub fn day_weight(&self) -> Decimal {
        match self {
            AttendanceStatus::Present => Decimal::ONE,
            AttendanceStatus::HalfDay => Decimal::new(5, 1),
            AttendanceStatus::Absent => Decimal::ZERO,
        }
    }
}

// =============================================================================
// Pay Period
// =============================================================================

/// Inclusive date range pay is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PayPeriod {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl PayPeriod {
    /// Fails with [`CoreError::InvalidPeriod`] when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidPeriod { start, end });
        }
        Ok(PayPeriod { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Sum of the day weights of all records.
pub fn days_worked(records: &[AttendanceRecord]) -> Decimal {
    records.iter().map(|r| r.status.day_weight()).sum()
}

/// `daily_rate × days_worked`, rounded half away from zero to the cent.
pub fn pay_for_period(daily_rate: Money, records: &[AttendanceRecord]) -> Money {
    daily_rate
        .to_decimal()
        .checked_mul(days_worked(records))
        .and_then(Money::from_decimal)
        .unwrap_or_default()
}

/// Pay breakdown of one worker over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaySummary {
    pub worker_id: String,
    pub period: PayPeriod,
    pub days_present: u32,
    pub days_half: u32,
    pub days_absent: u32,
    #[ts(as = "String")]
    pub days_worked: Decimal,
    pub daily_rate: Money,
    pub amount: Money,
}

impl PaySummary {
    /// Builds the summary from a worker's records. Records outside `period`
    /// are ignored.
    pub fn build(
        worker_id: impl Into<String>,
        daily_rate: Money,
        period: PayPeriod,
        records: &[AttendanceRecord],
    ) -> Self {
        let in_period: Vec<AttendanceRecord> = records
            .iter()
            .filter(|r| period.contains(r.work_date))
            .cloned()
            .collect();

        let count = |status: AttendanceStatus| {
            in_period.iter().filter(|r| r.status == status).count() as u32
        };

        PaySummary {
            worker_id: worker_id.into(),
            period,
            days_present: count(AttendanceStatus::Present),
            days_half: count(AttendanceStatus::HalfDay),
            days_absent: count(AttendanceStatus::Absent),
            days_worked: days_worked(&in_period),
            daily_rate,
            amount: pay_for_period(daily_rate, &in_period),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("att-{day}"),
            worker_id: "w-1".to_string(),
            work_date: date(day),
            status,
            recorded_by: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_two_days_and_a_half() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Present),
            record(3, AttendanceStatus::HalfDay),
            record(4, AttendanceStatus::Absent),
        ];
        assert_eq!(days_worked(&records), Decimal::new(25, 1));
        assert_eq!(
            pay_for_period(Money::from_cents(10000), &records).to_string(),
            "250.00"
        );
    }

    #[test]
    fn test_half_day_of_odd_rate_rounds_up() {
        let records = vec![record(1, AttendanceStatus::HalfDay)];
        assert_eq!(pay_for_period(Money::from_cents(10001), &records).cents(), 5001);
    }

    #[test]
    fn test_no_records_no_pay() {
        assert!(pay_for_period(Money::from_cents(10000), &[]).is_zero());
    }

    #[test]
    fn test_period_bounds_are_inclusive() {
        let period = PayPeriod::new(date(1), date(7)).unwrap();
        assert!(period.contains(date(1)));
        assert!(period.contains(date(7)));
        assert!(!period.contains(date(8)));
    }

    #[test]
    fn test_reversed_period_is_rejected() {
        assert!(matches!(
            PayPeriod::new(date(10), date(1)),
            Err(CoreError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_summary_ignores_records_outside_period() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::HalfDay),
            record(3, AttendanceStatus::Absent),
            record(20, AttendanceStatus::Present),
        ];
        let period = PayPeriod::new(date(1), date(7)).unwrap();
        let summary = PaySummary::build("w-1", Money::from_cents(20000), period, &records);

        assert_eq!(summary.days_present, 1);
        assert_eq!(summary.days_half, 1);
        assert_eq!(summary.days_absent, 1);
        assert_eq!(summary.days_worked, Decimal::new(15, 1));
        assert_eq!(summary.amount.cents(), 30000);
    }
}
