//! Clock and calendar helpers: timezone-aware "now" plus month arithmetic.
//!
//! Aggregations take `now` as a plain argument; only the ledger's add path and
//! the CLI ask a [`Clock`].

use anyhow::Result;
use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub trait Clock {
    /// Current wall time in the user's local zone.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Real clock, read in a fixed IANA zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    /// Build from an IANA name like "Asia/Tokyo".
    pub fn from_name(tz: &str) -> Result<Self> {
        let tz: Tz = tz
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
        Ok(Self { tz })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// Real clock in the operating system's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date).day()
}

/// Inclusive [first, last] range of the month before the one containing `date`.
pub fn previous_month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_this = first_day_of_month(date);
    let first_prev = first_this
        .checked_sub_months(Months::new(1))
        .unwrap_or(first_this);
    (first_prev, last_day_of_month(first_prev))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_month_lengths() {
        assert_eq!(days_in_month(d(2024, 2, 10)), 29);
        assert_eq!(days_in_month(d(2023, 2, 10)), 28);
        assert_eq!(days_in_month(d(2024, 12, 31)), 31);
        assert_eq!(days_in_month(d(2024, 4, 1)), 30);
    }

    #[test]
    fn test_previous_month_range_crosses_year() {
        assert_eq!(previous_month_range(d(2024, 1, 15)), (d(2023, 12, 1), d(2023, 12, 31)));
        assert_eq!(previous_month_range(d(2024, 3, 31)), (d(2024, 2, 1), d(2024, 2, 29)));
    }

    #[test]
    fn test_fixed_clock_today() {
        let now = d(2026, 2, 20).and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(FixedClock(now).today(), d(2026, 2, 20));
    }

    #[test]
    fn test_local_clock_follows_os_zone() {
        let before = Local::now().naive_local();
        let now = LocalClock.now();
        let after = Local::now().naive_local();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_system_clock_rejects_bad_zone() {
        assert!(SystemClock::from_name("Asia/Tokyo").is_ok());
        let err = SystemClock::from_name("Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("invalid timezone"));
    }
}
