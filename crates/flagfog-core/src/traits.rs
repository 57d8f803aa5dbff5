//! Collaborator seams for the daily puzzle manager.
//!
//! The manager orchestrates a country provider, an image pipeline and a
//! clock. All three sit behind object-safe traits so tests can drive the
//! manager with mocks and a frozen clock.

use crate::error::{ImageError, SourceError};
use crate::stamp::DayStamp;
use crate::types::{CountryRecord, ImagePair};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Supplies the candidate country pool for a given day.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Fetch the filtered pool, deterministically shuffled for `stamp`.
    ///
    /// The head of the returned sequence is the country of the day.
    async fn fetch_pool(&self, stamp: DayStamp) -> Result<Vec<CountryRecord>, SourceError>;
}

/// Turns a flag URL into a blurred/unblurred encoded image pair.
#[async_trait]
pub trait ImageProcessor: Send + Sync {
    async fn process(&self, flag_url: &str) -> Result<ImagePair, ImageError>;
}

/// Time source, injectable so day-boundary behavior is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Stamp for the current UTC day.
    fn today(&self) -> DayStamp {
        DayStamp::from_datetime(self.now())
    }
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
