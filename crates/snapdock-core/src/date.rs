//! Snapshot date resolution.
//!
//! Package repository snapshots are pinned to a calendar day. The day comes
//! from an explicit `Date:` field when the project declares one, otherwise
//! from the injected [`Clock`] minus 24 hours, so a snapshot that is still
//! being published is never selected.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Source of the current time.
///
/// Production code uses [`SystemClock`]; tests pin time with [`FixedClock`].
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

static DATE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Date:[ \t]*(.+)$").expect("Date field regex is valid"));

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// The day a package repository snapshot is pinned to.
///
/// Always renders as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use snapdock_core::SnapshotDate;
///
/// let date = SnapshotDate::parse("5 October 2018").unwrap();
/// assert_eq!(date.to_string(), "2018-10-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotDate(NaiveDate);

impl SnapshotDate {
    /// Resolve the snapshot date from an optional explicit date string.
    ///
    /// # Errors
    ///
    /// [`Error::DateParse`](crate::Error::DateParse) if `explicit` is present
    /// but not a recognisable date. An unparsable date is never replaced by
    /// the default.
    pub fn resolve(explicit: Option<&str>, clock: &dyn Clock) -> crate::Result<Self> {
        match explicit {
            Some(text) => {
                let date = Self::parse(text)?;
                tracing::debug!(%date, source = "explicit", "resolved snapshot date");
                Ok(date)
            }
            None => {
                let date = Self::yesterday(clock);
                tracing::debug!(%date, source = "clock", "resolved snapshot date");
                Ok(date)
            }
        }
    }

    /// Resolve the snapshot date from the `Date:` field of a DESCRIPTION-style
    /// manifest, falling back to yesterday when the field is absent.
    pub fn from_description(description: &str, clock: &dyn Clock) -> crate::Result<Self> {
        Self::resolve(date_field(description), clock)
    }

    /// Parse a free-text calendar date.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let trimmed = text.trim();

        // arch-lint: allow(no-silent-result-drop) reason="each format is a candidate; the caller gets DateParse if none match"
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(timestamp.with_timezone(&Utc).date_naive()));
        }
        // arch-lint: allow(no-silent-result-drop) reason="each format is a candidate; the caller gets DateParse if none match"
        if let Ok(timestamp) = DateTime::parse_from_rfc2822(trimmed) {
            return Ok(Self(timestamp.with_timezone(&Utc).date_naive()));
        }
        if let Some(date) = DATE_FORMATS
            .iter()
            // arch-lint: allow(no-silent-result-drop) reason="each format is a candidate; the caller gets DateParse if none match"
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        {
            return Ok(Self(date));
        }
        if let Some(timestamp) = DATETIME_FORMATS
            .iter()
            // arch-lint: allow(no-silent-result-drop) reason="each format is a candidate; the caller gets DateParse if none match"
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        {
            return Ok(Self(timestamp.date()));
        }

        Err(crate::Error::DateParse {
            text: text.to_owned(),
        })
    }

    /// Now minus 24 hours, in UTC.
    pub fn yesterday(clock: &dyn Clock) -> Self {
        Self((clock.now() - Duration::hours(24)).date_naive())
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for SnapshotDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for SnapshotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Extract the raw text of the first `Date:` line, if any.
pub fn date_field(description: &str) -> Option<&str> {
    DATE_FIELD
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
