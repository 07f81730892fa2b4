//! Time-window resolver for analytics.
//!
//! Windows are rolling, not calendar-aligned: a week is the anchor day plus
//! the six days before it, a month is a 30-day span. "Now" is always an
//! explicit parameter so window math stays pure and testable.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::ops::RangeInclusive;

/// Analytics period selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePeriod {
    Day,
    Week,
    Month,
}

/// Bucket granularity hint for presentation-side chart bars
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendBucket {
    Hour,
    Day,
}

impl TimePeriod {
    /// Number of calendar days the rolling window spans
    pub fn span_days(&self) -> i64 {
        match self {
            TimePeriod::Day => 1,
            TimePeriod::Week => 7,
            TimePeriod::Month => 30,
        }
    }

    /// Fixed future lookahead for the scrollable offset range
    pub fn lookahead(&self) -> i64 {
        match self {
            TimePeriod::Day | TimePeriod::Month => 3,
            TimePeriod::Week => 4,
        }
    }

    /// Chart bucket granularity: hourly bars within a day, daily otherwise
    pub fn bucket(&self) -> TrendBucket {
        match self {
            TimePeriod::Day => TrendBucket::Hour,
            TimePeriod::Week | TimePeriod::Month => TrendBucket::Day,
        }
    }

    fn unit_name(&self) -> &'static str {
        match self {
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
        }
    }
}

/// A resolved date range, inclusive on both ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Compute the window for a period and an offset from "now".
    ///
    /// Offset 0 is the current period, negative offsets scroll into the
    /// past, positive into the future. The window always ends at
    /// 23:59:59.999 of the anchor day and starts at midnight span-1 days
    /// earlier.
    pub fn resolve(period: TimePeriod, offset: i64, now: DateTime<Utc>) -> Self {
        let span = period.span_days();
        let anchor = now.date_naive() + Duration::days(offset * span);

        let end = midnight(anchor) + Duration::days(1) - Duration::milliseconds(1);
        let start = midnight(anchor - Duration::days(span - 1));

        Self { start, end }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Day-granularity membership, for daily logs
    pub fn contains_day(&self, date: NaiveDate) -> bool {
        self.start.date_naive() <= date && date <= self.end.date_naive()
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc()
}

/// Human-relative label for a (period, offset) pair
pub fn relative_label(period: TimePeriod, offset: i64) -> String {
    match (period, offset) {
        (TimePeriod::Day, 0) => "today".into(),
        (TimePeriod::Day, -1) => "yesterday".into(),
        (TimePeriod::Week, 0) => "this week".into(),
        (TimePeriod::Week, -1) => "last week".into(),
        (TimePeriod::Month, 0) => "this month".into(),
        (TimePeriod::Month, -1) => "last month".into(),
        (period, offset) => {
            let n = offset.unsigned_abs();
            let unit = period.unit_name();
            let plural = if n == 1 { "" } else { "s" };
            if offset < 0 {
                format!("{} {}{} ago", n, unit, plural)
            } else {
                format!("in {} {}{}", n, unit, plural)
            }
        }
    }
}

/// Valid scrollable offset range for a period.
///
/// The lower bound reaches back to the earliest record in the journal
/// (defaults to today when the journal is empty, giving a degenerate
/// single-offset past range); the upper bound is a small fixed lookahead.
pub fn offset_range(
    earliest: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    period: TimePeriod,
) -> RangeInclusive<i64> {
    let today = now.date_naive();
    let earliest_day = earliest.map(|t| t.date_naive()).unwrap_or(today);
    let days_back = (today - earliest_day).num_days().max(0);
    let lower = -(days_back / period.span_days());
    lower..=period.lookahead()
}
