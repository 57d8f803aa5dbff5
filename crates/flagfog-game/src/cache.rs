//! Single-entry day-stamped puzzle cache.

use flagfog_core::{DayStamp, PuzzleRecord};

/// Holds at most one derived puzzle, tagged with the day it was computed
/// for. Validity is a pure stamp comparison recomputed on every read;
/// stale entries are never evicted, just ignored and overwritten by the
/// next `put`.
#[derive(Debug, Default)]
pub struct PuzzleCache {
    entry: Option<(DayStamp, PuzzleRecord)>,
}

impl PuzzleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored record, only if its stamp equals `today`.
    pub fn get(&self, today: DayStamp) -> Option<&PuzzleRecord> {
        match &self.entry {
            Some((stamp, record)) if *stamp == today => Some(record),
            _ => None,
        }
    }

    /// Replace any existing entry unconditionally.
    pub fn put(&mut self, today: DayStamp, record: PuzzleRecord) {
        self.entry = Some((today, record));
    }
}
