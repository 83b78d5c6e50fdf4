//! Time types for events.
//!
//! This module provides [`EventTime`] for event start/end values (either a
//! full timestamp or a bare date), and [`MonthWindow`] for selecting the
//! events of one calendar month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::value::Value;

/// German month names, January first.
pub const MONTHS_DE: [&str; 12] = [
    "Jänner",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// The start or end of an event.
///
/// Data files may give either:
/// - **DateTime**: a specific wall-clock time
/// - **AllDay**: a date without a time
///
/// Serializes as the plain ISO string so renderers see the value as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum EventTime {
    /// A specific timestamp.
    DateTime(NaiveDateTime),
    /// A date without a specific time.
    AllDay(NaiveDate),
}

impl EventTime {
    /// Reads an event time from a data value.
    ///
    /// Returns `None` for anything that is not a date or datetime.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(date) => Some(Self::AllDay(*date)),
            Value::DateTime(dt) => Some(Self::DateTime(*dt)),
            _ => None,
        }
    }

    /// The full timestamp used for sorting.
    ///
    /// Dates become midnight of that day; timestamps are returned unchanged.
    pub fn sort_date(&self) -> NaiveDateTime {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Returns the date portion of this event time.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::DateTime(dt) => dt.date(),
            Self::AllDay(date) => *date,
        }
    }
}

/// Error returned when a month argument is not `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid month {input:?}: expected YYYY-MM")]
pub struct MonthParseError {
    input: String,
}

/// One calendar month as a half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    year: i32,
    month: u32,
}

impl MonthWindow {
    /// Creates the window for the given month (1-12).
    ///
    /// Returns `None` unless both the month and the one after it are
    /// representable dates.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        let window = Self { year, month };
        window.following_first_day()?;
        Some(window)
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month after this one, if [`MonthWindow::new`] accepts it.
    pub fn next(&self) -> Option<Self> {
        self.following_first_day()
            .and_then(|day| Self::new(day.year(), day.month()))
    }

    fn following_first_day(&self) -> Option<NaiveDate> {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
    }

    /// First day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    /// Midnight on the first day of the month (inclusive).
    pub fn start(&self) -> NaiveDateTime {
        self.first_day().and_time(NaiveTime::MIN)
    }

    /// Midnight on the first day of the following month (exclusive).
    ///
    /// Saturates at the latest representable timestamp for the last month
    /// chrono supports.
    pub fn end(&self) -> NaiveDateTime {
        self.following_first_day()
            .map_or(NaiveDateTime::MAX, |day| day.and_time(NaiveTime::MIN))
    }

    /// Checks if a timestamp falls within this month.
    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        self.start() <= dt && dt < self.end()
    }

    /// Grouping key in the form `yy-mm`, e.g. `24-05`.
    pub fn key(&self) -> String {
        format!("{:02}-{:02}", self.year.rem_euclid(100), self.month)
    }

    /// German display name, e.g. `Mai 2024`.
    pub fn display_name_de(&self) -> String {
        format!("{} {}", MONTHS_DE[self.month as usize - 1], self.year)
    }
}

impl FromStr for MonthWindow {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MonthParseError {
            input: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        Self::new(year, month).ok_or_else(err)
    }
}

impl fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
