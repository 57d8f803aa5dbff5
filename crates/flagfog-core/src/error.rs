//! Error taxonomy shared across the flagfog crates.
//!
//! Propagation policy:
//! - [`ImageError`] is always recovered locally by substituting placeholder
//!   images; it never fails a request.
//! - [`SourceError`] escalates to [`GameError::NoPuzzleAvailable`] only when
//!   no fallback pool exists.
//! - [`GameError::NoActivePuzzle`] surfaces directly to the caller.

use thiserror::Error;

/// Errors from the country provider.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider call failed (transport error or non-success status).
    #[error("country provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but no record passed the qualifying filter.
    #[error("provider returned no qualifying countries")]
    EmptyPool,
}

/// Errors from the flag image pipeline.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP fetch of the flag bytes failed.
    #[error("flag fetch failed: {0}")]
    Fetch(String),

    /// The fetched bytes did not decode as an image.
    #[error("flag decode failed: {0}")]
    Decode(String),

    /// Re-encoding a processed buffer failed.
    #[error("flag encode failed: {0}")]
    Encode(String),
}

/// Errors surfaced by the daily puzzle manager.
#[derive(Debug, Error)]
pub enum GameError {
    /// Neither the provider, a cached entry, nor the backup pool could
    /// produce a puzzle for today.
    #[error("no puzzle available today")]
    NoPuzzleAvailable,

    /// A guess arrived before any puzzle was derived.
    #[error("no active puzzle")]
    NoActivePuzzle,
}
