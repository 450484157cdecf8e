use chrono::NaiveDate;
use std::fmt::Debug;

use crate::error::Result;

/// Capability the grid and the navigation controller need from a date engine.
///
/// Values are plain copies; every "mutation" returns a new date. Ordering
/// follows the day count, so `a < b` means `a` is earlier.
pub trait CalendarDate: Copy + Ord + Debug {
    /// Builds a date, failing on combinations the calendar does not have
    /// (day 30 of a 29 day month, month 13 of a common year, ...).
    fn from_ymd(year: i32, month: u8, day: u8) -> Result<Self>;

    fn from_gregorian(date: NaiveDate) -> Result<Self>;

    fn year(&self) -> i32;
    fn month(&self) -> u8;
    fn day(&self) -> u8;

    /// 1 is the first day of the week (Sunday), 7 the last.
    fn day_of_week(&self) -> u8;

    fn months_in_year(&self) -> u8;
    fn days_in_month(&self) -> u8;

    /// Moves by `delta` days in either direction. Fails if the result is not
    /// representable by the engine.
    fn add_days(&self, delta: i64) -> Result<Self>;

    fn forward(&self) -> Result<Self> {
        self.add_days(1)
    }

    fn to_gregorian(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// Inclusive range of dates the viewer lets the selection reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange<D: CalendarDate> {
    min: D,
    max: D,
}

impl<D: CalendarDate> ValidRange<D> {
    pub fn new(min: D, max: D) -> Self {
        debug_assert!(min <= max);
        ValidRange { min, max }
    }

    pub fn min(&self) -> D {
        self.min
    }

    pub fn max(&self) -> D {
        self.max
    }

    pub fn contains(&self, date: &D) -> bool {
        &self.min <= date && date <= &self.max
    }

    /// Returns `date` pulled into the range together with the bound that was
    /// substituted, if any.
    pub fn clamp(&self, date: D) -> (D, Option<Bound>) {
        if date < self.min {
            (self.min, Some(Bound::Lower))
        } else if date > self.max {
            (self.max, Some(Bound::Upper))
        } else {
            (date, None)
        }
    }
}
