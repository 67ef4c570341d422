//! tally-core: expense records, the aggregation engine, and the ledger commands

mod buckets;

pub mod category_stats;
pub mod clock;
pub mod daily;
pub mod expense;
pub mod ledger;
pub mod projection;
pub mod report;
pub mod store;
pub mod summary;
pub mod view;

pub use category_stats::{CategoryBreakdown, CategoryTotal, by_category};
pub use clock::{Clock, FixedClock, LocalClock, SystemClock};
pub use daily::{DailyTotals, PeriodTotals, by_date, period_totals};
pub use expense::{Category, Expense};
pub use ledger::{Ledger, LedgerError, parse_amount};
pub use projection::{MonthProgress, MonthProjection, project_month_end};
pub use report::Report;
pub use summary::{Summary, summarize, summarize_iter};
pub use view::{SortOrder, ViewParams, filter, select};
