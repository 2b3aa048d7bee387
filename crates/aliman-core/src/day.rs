//! Calendar-day policy.
//!
//! The caller decides where a user's day starts and ends. Everything that
//! buckets sessions or plans by date goes through a [`DayBoundary`].

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Timelike, Utc};

use crate::error::DomainError;

/// Maps instants to local calendar dates using a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset_minutes: i32,
}

impl DayBoundary {
    pub fn utc() -> Self {
        Self { offset_minutes: 0 }
    }

    /// Build from an offset east of UTC, in minutes.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when the offset is a day or more.
    pub fn from_offset_minutes(offset_minutes: i32) -> Result<Self, DomainError> {
        let day = Self { offset_minutes };
        day.offset()?;
        Ok(day)
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    fn offset(&self) -> Result<FixedOffset, DomainError> {
        self.offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::invalid(
                    "utc_offset_minutes",
                    format!("{} is not a valid UTC offset", self.offset_minutes),
                )
            })
    }

    fn offset_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.offset_minutes))
    }

    fn local(&self, instant: DateTime<Utc>) -> chrono::NaiveDateTime {
        instant.naive_utc() + self.offset_duration()
    }

    /// Local calendar date that `instant` falls on.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date()
    }

    /// Local hour of day (0-23) at `instant`.
    pub fn hour_of(&self, instant: DateTime<Utc>) -> u32 {
        self.local(instant).hour()
    }

    /// Half-open UTC range `[start, end)` covering the local `date`.
    pub fn range_of(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let start = (local_midnight - self.offset_duration()).and_utc();
        (start, start + Duration::days(1))
    }

    pub fn contains(&self, date: NaiveDate, instant: DateTime<Utc>) -> bool {
        self.date_of(instant) == date
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}
