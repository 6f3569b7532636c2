// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Half-open stay intervals.
//!
//! A stay occupies `[check_in, check_out)`. The check-out instant is
//! excluded, so a stay ending at `T` never conflicts with one starting at `T`.
//!
//! Instants are normalised to UTC with millisecond precision. Inputs may be
//! RFC 3339 date-times or bare `YYYY-MM-DD` dates, which are read as
//! midnight UTC. Anything finer than a millisecond is dropped before the
//! ordering and overlap checks, so stored and requested stays compare alike.

use crate::error::DomainError;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// A validated `[check_in, check_out)` interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayInterval {
    check_in: OffsetDateTime,
    check_out: OffsetDateTime,
}

impl StayInterval {
    /// Creates a stay interval.
    ///
    /// Both instants are converted to UTC and truncated to whole
    /// milliseconds before the ordering check.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` unless `check_in < check_out`.
    pub fn new(check_in: OffsetDateTime, check_out: OffsetDateTime) -> Result<Self, DomainError> {
        let check_in: OffsetDateTime = normalize(check_in);
        let check_out: OffsetDateTime = normalize(check_out);

        if check_in >= check_out {
            return Err(DomainError::InvalidDateRange {
                check_in: format_instant(check_in),
                check_out: format_instant(check_out),
            });
        }

        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parses both endpoints and builds the interval.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInstant` if either endpoint is malformed,
    /// or `DomainError::InvalidDateRange` if the order is wrong.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, DomainError> {
        let start: OffsetDateTime = parse_instant(check_in)?;
        let end: OffsetDateTime = parse_instant(check_out)?;
        Self::new(start, end)
    }

    /// Rebuilds an interval from stored Unix milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if either timestamp is out of range or the
    /// ordering invariant does not hold.
    pub fn from_unix_millis(check_in: i64, check_out: i64) -> Result<Self, DomainError> {
        let start: OffsetDateTime = from_unix_millis(check_in)?;
        let end: OffsetDateTime = from_unix_millis(check_out)?;
        Self::new(start, end)
    }

    /// The inclusive start of the stay.
    #[must_use]
    pub const fn check_in(&self) -> OffsetDateTime {
        self.check_in
    }

    /// The exclusive end of the stay.
    #[must_use]
    pub const fn check_out(&self) -> OffsetDateTime {
        self.check_out
    }

    #[must_use]
    pub fn check_in_unix_millis(&self) -> i64 {
        unix_millis(self.check_in)
    }

    #[must_use]
    pub fn check_out_unix_millis(&self) -> i64 {
        unix_millis(self.check_out)
    }

    /// Returns true if the two half-open intervals share any instant.
    ///
    /// `[a, b)` and `[c, d)` overlap iff `a < d && c < b`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

fn normalize(instant: OffsetDateTime) -> OffsetDateTime {
    let utc: OffsetDateTime = instant.to_offset(UtcOffset::UTC);
    utc.replace_millisecond(utc.millisecond()).unwrap_or(utc)
}

fn unix_millis(instant: OffsetDateTime) -> i64 {
    instant.unix_timestamp() * 1_000 + i64::from(instant.millisecond())
}

fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, DomainError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).map_err(|e| {
        DomainError::InvalidInstant {
            value: millis.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Parses an RFC 3339 date-time or a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::InvalidInstant` if the value matches neither form.
pub fn parse_instant(value: &str) -> Result<OffsetDateTime, DomainError> {
    let trimmed: &str = value.trim();

    if let Ok(instant) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(normalize(instant));
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|e| DomainError::InvalidInstant {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Formats an instant as RFC 3339 in UTC.
///
/// Fractional seconds appear only when the instant has them.
///
/// Falls back to the Unix timestamp for years RFC 3339 cannot express.
#[must_use]
pub fn format_instant(instant: OffsetDateTime) -> String {
    normalize(instant)
        .format(&Rfc3339)
        .unwrap_or_else(|_| instant.unix_timestamp().to_string())
}
