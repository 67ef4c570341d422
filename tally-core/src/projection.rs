//! Month-end projection from the month-to-date total.

use crate::clock::{days_in_month, first_day_of_month};
use crate::expense::Expense;
use crate::summary::round_half_up;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Where "now" sits inside its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthProgress {
    /// Days from the 1st through today, inclusive (>= 1).
    pub days_passed: u32,
    pub days_in_month: u32,
}

impl MonthProgress {
    pub fn at(now: NaiveDateTime) -> Self {
        let today = now.date();
        Self {
            days_passed: today.day(),
            days_in_month: days_in_month(today),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthProjection {
    pub month_total: f64,
    pub per_day_average: f64,
    pub projected_total: f64,
}

/// Extrapolate the month total assuming the rounded daily average holds.
///
/// Returns `None` when `days_passed` is 0.
pub fn project_month_end(
    month_total: f64,
    days_passed: u32,
    days_in_month: u32,
) -> Option<MonthProjection> {
    if days_passed == 0 {
        return None;
    }
    let per_day_average = round_half_up(month_total / f64::from(days_passed));
    let remaining = f64::from(days_in_month) - f64::from(days_passed);
    Some(MonthProjection {
        month_total,
        per_day_average,
        projected_total: month_total + per_day_average * remaining,
    })
}

impl MonthProjection {
    /// Projection for the month containing `now`, using every record dated
    /// on or after the 1st of that month.
    pub fn for_items(items: &[Expense], now: NaiveDateTime) -> Option<Self> {
        let month_start: NaiveDate = first_day_of_month(now.date());
        let month_total: f64 = items
            .iter()
            .filter(|e| e.date >= month_start)
            .map(|e| e.amount)
            .sum();
        let progress = MonthProgress::at(now);
        project_month_end(month_total, progress.days_passed, progress.days_in_month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::Category;

    #[test]
    fn test_projection_basic() {
        let p = project_month_end(3000.0, 10, 30).unwrap();
        assert_eq!(p.per_day_average, 300.0);
        assert_eq!(p.projected_total, 9000.0);
    }

    #[test]
    fn test_projection_zero_days_is_none() {
        assert!(project_month_end(3000.0, 0, 30).is_none());
    }

    #[test]
    fn test_projection_on_last_day_is_month_total() {
        let p = project_month_end(1234.0, 31, 31).unwrap();
        assert_eq!(p.projected_total, 1234.0);
    }

    #[test]
    fn test_projection_rounds_average() {
        // 1000 / 3 = 333.33 -> 333
        let p = project_month_end(1000.0, 3, 30).unwrap();
        assert_eq!(p.per_day_average, 333.0);
        assert_eq!(p.projected_total, 1000.0 + 333.0 * 27.0);
    }

    #[test]
    fn test_for_items_uses_current_month_only() {
        let now = NaiveDate::from_ymd_opt(2024, 4, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let items = vec![
            Expense::new("a", NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), "old", 500.0, Category::Food),
            Expense::new("b", NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), "rent", 2000.0, Category::Household),
            Expense::new("c", NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(), "beer", 1000.0, Category::Social),
        ];
        let p = MonthProjection::for_items(&items, now).unwrap();
        assert_eq!(p.month_total, 3000.0);
        assert_eq!(p.per_day_average, 300.0);
        assert_eq!(p.projected_total, 9000.0);
        assert_eq!(MonthProgress::at(now), MonthProgress { days_passed: 10, days_in_month: 30 });
    }
}
