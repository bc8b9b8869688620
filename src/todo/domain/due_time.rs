//! Daily due time attached to a task.

use super::TaskDomainError;
use chrono::{DateTime, NaiveTime, TimeZone};
use std::fmt;

const DUE_TIME_FORMAT: &str = "%H:%M";

/// Time of day, without a date, at which a task is due.
///
/// A due time recurs conceptually every day; it is resolved against the
/// date of the instant it is compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueTime(NaiveTime);

impl DueTime {
    /// Parses a 24-hour `HH:MM` string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueTime`] when the value is not a
    /// valid hour and minute pair.
    pub fn parse(value: &str) -> Result<Self, TaskDomainError> {
        NaiveTime::parse_from_str(value.trim(), DUE_TIME_FORMAT)
            .map(Self)
            .map_err(|_| TaskDomainError::InvalidDueTime(value.to_owned()))
    }

    /// Returns the wrapped time of day.
    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0
    }

    /// Combines this due time with the calendar date of `now`.
    ///
    /// Returns `None` when the resulting local time does not exist in the
    /// timezone of `now`, which happens inside a daylight-saving gap.
    #[must_use]
    pub fn on_date_of<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        now.date_naive()
            .and_time(self.0)
            .and_local_timezone(now.timezone())
            .earliest()
    }
}

impl fmt::Display for DueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_TIME_FORMAT))
    }
}

/// Formats a stored due-time string for display.
///
/// Malformed values are returned unchanged so that rendering never fails.
#[must_use]
pub fn format_due_time(raw: &str) -> String {
    DueTime::parse(raw).map_or_else(|_| raw.to_owned(), |due| due.to_string())
}
