//! Day stamps: the UTC calendar date as reset boundary and shuffle seed.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The UTC calendar date a puzzle belongs to.
///
/// A stamp serves two roles: cache entries are valid exactly while their
/// stamp equals the current stamp, and the `YYYY-MM-DD` rendering is the
/// sole seed for the daily pool shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayStamp(NaiveDate);

impl DayStamp {
    /// Stamp for the UTC day containing `now`.
    pub fn from_datetime(now: DateTime<Utc>) -> Self {
        Self(now.date_naive())
    }

    /// Stamp for the current UTC day.
    pub fn today() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Self)
    }

    /// The `YYYY-MM-DD` string used as the shuffle seed.
    pub fn seed_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.seed_string())
    }
}

/// Seconds remaining until the next UTC midnight after `now`.
pub fn next_reset_secs(now: DateTime<Utc>) -> i64 {
    let tomorrow = (now.date_naive() + Duration::days(1)).and_time(NaiveTime::MIN);
    (tomorrow.and_utc() - now).num_seconds().max(0)
}
