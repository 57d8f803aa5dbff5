//! The daily puzzle manager: orchestrates the country source, the image
//! pipeline and the puzzle cache, and owns the reset boundary.

use crate::cache::PuzzleCache;
use crate::guess;
use flagfog_core::{
    Clock, CountryRecord, CountrySource, DayStamp, GameError, GuessResult, ImagePair,
    ImageProcessor, PuzzleRecord, SystemClock,
};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Mutable manager state, guarded by one lock so a request arriving at day
/// rollover can never observe a half-updated record.
#[derive(Default)]
struct ManagerState {
    last_reset: Option<DayStamp>,
    current: Option<PuzzleRecord>,
    pool: Vec<CountryRecord>,
    cache: PuzzleCache,
}

/// Owns "today's puzzle": deterministic daily selection, derived-artifact
/// caching, the UTC-midnight reset and guess evaluation.
///
/// One instance per process, handed to request handlers by injection.
pub struct DailyPuzzleManager {
    source: Arc<dyn CountrySource>,
    images: Arc<dyn ImageProcessor>,
    clock: Arc<dyn Clock>,
    /// Re-run the image pipeline whenever a cached record is adopted
    /// (default on - cached blobs are never trusted to still be embedded
    /// correctly; the canonical flag URL is the source of truth).
    reprocess_on_adoption: bool,
    state: RwLock<ManagerState>,
    /// Serializes derivations: at most one miss-path derivation per day
    /// stamp, even under request concurrency.
    derive_flight: Mutex<()>,
}

impl DailyPuzzleManager {
    pub fn new(source: Arc<dyn CountrySource>, images: Arc<dyn ImageProcessor>) -> Self {
        Self::with_clock(source, images, Arc::new(SystemClock))
    }

    /// Construct with an explicit clock; tests freeze and advance it.
    pub fn with_clock(
        source: Arc<dyn CountrySource>,
        images: Arc<dyn ImageProcessor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            images,
            clock,
            reprocess_on_adoption: true,
            state: RwLock::new(ManagerState::default()),
            derive_flight: Mutex::new(()),
        }
    }

    /// Toggle the re-derive-images-on-adoption step.
    pub fn reprocess_on_adoption(mut self, enabled: bool) -> Self {
        self.reprocess_on_adoption = enabled;
        self
    }

    /// The stamp of the last completed reset, if any.
    pub async fn current_stamp(&self) -> Option<DayStamp> {
        self.state.read().await.last_reset
    }

    /// Get or derive the puzzle for the current UTC day.
    pub async fn get_todays_puzzle(&self) -> Result<PuzzleRecord, GameError> {
        let today = self.clock.today();

        if let Some(record) = self.live_record(today).await {
            return Ok(record);
        }

        // Day boundary crossed or first call. The flight lock guarantees a
        // single derivation; everyone else re-checks and adopts its result.
        let _flight = self.derive_flight.lock().await;
        if let Some(record) = self.live_record(today).await {
            return Ok(record);
        }

        let cached = self.state.read().await.cache.get(today).cloned();
        if let Some(mut record) = cached {
            if self.reprocess_on_adoption {
                record.set_images(self.process_or_placeholder(&record.flag_url).await);
            }
            self.adopt(today, record.clone()).await;
            tracing::info!("adopted cached puzzle for {}: {}", today, record.country_name);
            return Ok(record);
        }

        self.derive(today).await
    }

    /// Daily-check hook for the external timer. If the calendar day has
    /// advanced, drop the held pool and force a fresh provider fetch and
    /// derivation, even if a cache entry technically exists - the pool
    /// ordering must come from the live provider at least once per day.
    pub async fn check_and_reset_if_needed(&self) {
        let today = self.clock.today();
        if self.state.read().await.last_reset == Some(today) {
            return;
        }

        let _flight = self.derive_flight.lock().await;
        {
            let mut state = self.state.write().await;
            if state.last_reset == Some(today) {
                return;
            }
            state.pool.clear();
            state.current = None;
        }

        match self.derive(today).await {
            Ok(record) => {
                tracing::info!("daily reset for {}: {}", today, record.country_name);
            }
            Err(e) => {
                // Not fatal; the timer retries on its next firing.
                tracing::warn!("daily reset for {} failed: {}", today, e);
            }
        }
    }

    /// Evaluate a guess against the current puzzle. The hint level is
    /// caller-supplied and not persisted; see [`crate::guess`].
    pub async fn evaluate_guess(
        &self,
        guess_text: &str,
        hint_level: u8,
    ) -> Result<GuessResult, GameError> {
        let state = self.state.read().await;
        let puzzle = state.current.as_ref().ok_or(GameError::NoActivePuzzle)?;
        Ok(guess::evaluate(puzzle, guess_text, hint_level))
    }

    /// Fast path: the live in-memory record, if it belongs to `today`.
    async fn live_record(&self, today: DayStamp) -> Option<PuzzleRecord> {
        let state = self.state.read().await;
        if state.last_reset == Some(today) {
            state.current.clone()
        } else {
            None
        }
    }

    /// Miss-path derivation. Must run with the flight lock held.
    async fn derive(&self, today: DayStamp) -> Result<PuzzleRecord, GameError> {
        let needs_pool = self.state.read().await.pool.is_empty();
        if needs_pool {
            match self.source.fetch_pool(today).await {
                Ok(pool) => self.state.write().await.pool = pool,
                Err(e) => tracing::warn!("pool fetch for {} failed: {}", today, e),
            }
        }

        // Head of the seeded-shuffled pool is the country of the day.
        let country = self
            .state
            .read()
            .await
            .pool
            .first()
            .cloned()
            .ok_or(GameError::NoPuzzleAvailable)?;

        let images = self.process_or_placeholder(&country.flag_url).await;
        let record = PuzzleRecord::new(&country, images);
        self.adopt(today, record.clone()).await;
        Ok(record)
    }

    /// Store a derived record: cache entry, live slot and reset stamp move
    /// together under one write lock.
    async fn adopt(&self, today: DayStamp, record: PuzzleRecord) {
        let mut state = self.state.write().await;
        state.cache.put(today, record.clone());
        state.current = Some(record);
        state.last_reset = Some(today);
    }

    /// Image-processing failure never propagates; it degrades to the
    /// placeholder pair for the day.
    async fn process_or_placeholder(&self, flag_url: &str) -> ImagePair {
        match self.images.process(flag_url).await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("image pipeline failed for {}: {}", flag_url, e);
                ImagePair::placeholder()
            }
        }
    }

    /// Pre-seed the cache, standing in for an entry that outlived the
    /// in-memory state.
    #[cfg(test)]
    async fn seed_cache(&self, stamp: DayStamp, record: PuzzleRecord) {
        self.state.write().await.cache.put(stamp, record);
    }
}
