//! Calendar months and the three-month window that a points summary covers

use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::errors::Error;

/// English names of the months, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of months covered by a [`MonthRange`]
pub const RANGE_MONTHS: usize = 3;

/// A calendar month in a particular year
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, checking that the year has four digits and the month is 1 through 12.
    /// # Errors
    /// [`Error::InvalidYear`] or [`Error::InvalidMonth`]
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if !(1..=9999).contains(&year) {
            return Err(Error::InvalidYear(year.to_string()));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidMonth(month.to_string()));
        }
        Ok(Self { year, month })
    }

    /// Parses a year and month as entered by a user, e.g. `"2023"` and `"07"`.
    ///
    /// Leading zeros on the month are optional.
    pub fn parse(year: &str, month: &str) -> Result<Self, Error> {
        let year_text = year.trim();
        if year_text.len() != 4 || !year_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidYear(year.to_owned()));
        }
        let month_text = month.trim();
        if month_text.is_empty()
            || month_text.len() > 2
            || !month_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidMonth(month.to_owned()));
        }
        let year = year_text
            .parse()
            .map_err(|_| Error::InvalidYear(year.to_owned()))?;
        let month = month_text
            .parse()
            .map_err(|_| Error::InvalidMonth(month.to_owned()))?;
        Self::new(year, month)
    }

    /// The month that contains `date`.
    /// # Errors
    /// [`Error::InvalidYear`] if the date's year does not have four digits
    pub fn of(date: NaiveDate) -> Result<Self, Error> {
        Self::new(date.year(), date.month())
    }

    /// Returns whether `date` falls in this month
    #[must_use]
    pub fn holds(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month()
    }

    /// Returns the year
    #[must_use]
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number, 1 through 12
    #[must_use]
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month. December rolls over to January of the next year.
    #[must_use]
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// English name of the month, e.g. `"July"`
    #[must_use]
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// The first day of the month
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        calendar_date(self.year, self.month, 1)
    }

    /// The last day of the month, accounting for month length and leap years
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        let next = self.succ().first_day();
        let days = next.signed_duration_since(self.first_day()).num_days();
        calendar_date(self.year, self.month, days as u32)
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Years are limited to 1 through 10000 by [`YearMonth::new`] and [`YearMonth::succ`], well inside
/// chrono's range, and `day` is only ever a day inside the month.
fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        panic!("{year:04}-{month:02}-{day:02} is not a calendar date")
    })
}

/// Position of a month within a [`MonthRange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSlot {
    /// The starting month
    First,
    /// The month after the start
    Second,
    /// The last month of the range
    Third,
}

/// Three consecutive calendar months, starting at a chosen month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    first: YearMonth,
}

impl MonthRange {
    /// The range made of `first` and the two months that follow it
    #[must_use]
    pub fn starting(first: YearMonth) -> Self {
        Self { first }
    }

    /// Builds a range from explicit dates.
    ///
    /// `start` must be the first day of a month, and `end` must fall in the second month
    /// following it. Any day of that month is accepted for `end`.
    /// # Errors
    /// [`Error::InvalidRange`] if the dates do not describe three consecutive months
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self, Error> {
        let first = YearMonth::of(start).map_err(|_| Error::InvalidRange { start, end })?;
        let range = Self::starting(first);
        if start.day() != 1 || !range.months()[RANGE_MONTHS - 1].holds(end) {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(range)
    }

    /// The three months of the range, in order
    #[must_use]
    pub fn months(&self) -> [YearMonth; RANGE_MONTHS] {
        let second = self.first.succ();
        [self.first, second, second.succ()]
    }

    /// The first day of the range
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.first.first_day()
    }

    /// The last day of the range
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.months()[RANGE_MONTHS - 1].last_day()
    }

    /// Which month of the range `date` falls in, if any
    #[must_use]
    pub fn slot_of(&self, date: NaiveDate) -> Option<MonthSlot> {
        match self.months() {
            [first, ..] if first.holds(date) => Some(MonthSlot::First),
            [_, second, _] if second.holds(date) => Some(MonthSlot::Second),
            [.., third] if third.holds(date) => Some(MonthSlot::Third),
            _ => None,
        }
    }

    /// Returns whether `date` falls in the range
    #[must_use]
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.slot_of(date).is_some()
    }
}

impl Display for MonthRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.first, self.months()[RANGE_MONTHS - 1])
    }
}
