//! Date-bucketed sums and the rolling period totals shown on the dashboard.
//!
//! Everything works at calendar-date granularity, the same as stored records.
//! `now` always comes from the caller.
//!
//! Periods:
//! - today / yesterday: exact date match
//! - this week: dates >= (now - 7x24h).date()
//! - this month: dates >= first day of the current month
//! - last month: dates inside [first, last] of the previous month
//!
//! "this week" and "this month" have no upper bound; a record dated in the
//! future still counts.

use crate::buckets::OrderedBuckets;
use crate::clock::{first_day_of_month, previous_month_range};
use crate::expense::Expense;
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};

/// Sum per date, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTotals {
    entries: Vec<(NaiveDate, f64)>,
}

impl DailyTotals {
    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, f64)> {
        self.entries.iter()
    }

    /// Up to `n` dates with the largest sums. Equal sums keep first-appearance order.
    pub fn top(&self, n: usize) -> Vec<(NaiveDate, f64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

pub fn by_date(items: &[Expense]) -> DailyTotals {
    let mut buckets: OrderedBuckets<NaiveDate, f64> = OrderedBuckets::default();
    for e in items {
        *buckets.entry(e.date) += e.amount;
    }
    DailyTotals {
        entries: buckets.into_entries(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub today: f64,
    pub yesterday: f64,
    pub this_week: f64,
    pub this_month: f64,
    pub last_month: f64,
}

pub fn period_totals(items: &[Expense], now: NaiveDateTime) -> PeriodTotals {
    let today = now.date();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap_or(today);
    let week_start = (now - Duration::days(7)).date();
    let month_start = first_day_of_month(today);
    let (last_start, last_end) = previous_month_range(today);

    let mut out = PeriodTotals::default();
    for e in items {
        if e.date == today {
            out.today += e.amount;
        }
        if e.date == yesterday {
            out.yesterday += e.amount;
        }
        if e.date >= week_start {
            out.this_week += e.amount;
        }
        if e.date >= month_start {
            out.this_month += e.amount;
        }
        if e.date >= last_start && e.date <= last_end {
            out.last_month += e.amount;
        }
    }
    out
}
