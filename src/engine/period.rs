use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::engine::constants::{DAY_PERIOD_DAYS, MONTH_PERIOD_DAYS, WEEK_PERIOD_DAYS};
use crate::error::{KitchenError, Result};
use crate::models::View;

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// The `len`-day window ending on (and including) `end`. A `len` of zero
    /// yields the single day `end`.
    pub fn trailing(end: NaiveDate, len: u32) -> Result<Self> {
        let span = len.saturating_sub(1);
        let start = days_before(end, span)?;
        Ok(Self::new(start, end))
    }

    /// The window of equal length immediately before this one.
    pub fn preceding(&self) -> Result<Self> {
        let end = days_before(self.start, 1)?;
        Self::trailing(end, self.num_days() as u32)
    }

    /// Number of calendar days covered; zero when `end < start`.
    pub fn num_days(&self) -> usize {
        let span = self.end.signed_duration_since(self.start).num_days();
        if span < 0 { 0 } else { span as usize + 1 }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the range, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take(self.num_days())
    }
}

/// Current period and the preceding period of equal length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periods {
    pub current: DateRange,
    pub previous: DateRange,
}

/// Length in days of the trailing window behind a view.
pub fn period_days(view: View) -> u32 {
    match view {
        View::Day => DAY_PERIOD_DAYS,
        View::Week => WEEK_PERIOD_DAYS,
        View::Month => MONTH_PERIOD_DAYS,
    }
}

/// Resolve the current and previous periods for a view anchored on a date.
///
/// All views are trailing windows ending on `anchor`, not calendar-aligned
/// periods.
pub fn resolve(view: View, anchor: NaiveDate) -> Result<Periods> {
    let current = DateRange::trailing(anchor, period_days(view))?;
    let previous = current.preceding()?;
    Ok(Periods { current, previous })
}

/// `date` minus `n` days, failing when the calendar runs out.
pub fn days_before(date: NaiveDate, n: u32) -> Result<NaiveDate> {
    date.checked_sub_days(Days::new(n as u64))
        .ok_or_else(|| KitchenError::InvalidDate(format!("{} minus {} days is out of range", date, n)))
}

/// `date` plus `n` days, failing when the calendar runs out.
pub fn days_after(date: NaiveDate, n: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(n as u64))
        .ok_or_else(|| KitchenError::InvalidDate(format!("{} plus {} days is out of range", date, n)))
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let well_formed = s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(KitchenError::InvalidDate(format!(
            "'{}' is not YYYY-MM-DD",
            s
        )));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| KitchenError::InvalidDate(format!("'{}': {}", s, e)))
}
