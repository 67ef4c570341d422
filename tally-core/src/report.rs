//! One-shot bundle of every derived figure for a given view.
//!
//! View-dependent parts (list, summary, categories, daily totals) use the
//! filtered set. Calendar periods and the projection always use the full
//! collection, so the "this month" card does not change with the search box.

use crate::category_stats::{CategoryBreakdown, by_category};
use crate::daily::{DailyTotals, PeriodTotals, by_date, period_totals};
use crate::expense::{Category, Expense};
use crate::projection::MonthProjection;
use crate::summary::{Summary, summarize_iter};
use crate::view::{ViewParams, filter, select};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub view: Vec<Expense>,
    pub summary: Summary<'a>,
    pub categories: CategoryBreakdown,
    pub top_category: Option<Category>,
    pub daily: DailyTotals,
    pub top_days: Vec<(NaiveDate, f64)>,
    pub periods: PeriodTotals,
    pub projection: Option<MonthProjection>,
}

impl<'a> Report<'a> {
    pub fn build(
        items: &'a [Expense],
        params: &ViewParams,
        now: NaiveDateTime,
        top_n: usize,
    ) -> Self {
        let filtered = filter(items, params);
        let summary = summarize_iter(items.iter().filter(|e| params.matches(e)));

        let categories = by_category(&filtered);
        let daily = by_date(&filtered);

        Self {
            view: select(items, params),
            top_category: categories.top_category(),
            top_days: daily.top(top_n),
            summary,
            categories,
            daily,
            periods: period_totals(items, now),
            projection: MonthProjection::for_items(items, now),
        }
    }
}
