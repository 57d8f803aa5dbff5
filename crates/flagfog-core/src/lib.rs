//! # Flagfog Core
//!
//! Shared foundation for the flagfog daily flag-guessing backend:
//!
//! - **Data model**: [`CountryRecord`], [`PuzzleRecord`], [`ImagePair`],
//!   [`GuessResult`]
//! - **Day stamps**: [`DayStamp`] - the UTC calendar date that acts as both
//!   the reset boundary and the shuffle seed
//! - **Collaborator seams**: [`CountrySource`], [`ImageProcessor`] and
//!   [`Clock`] traits, so the game manager can be driven by mocks in tests
//! - **Error taxonomy**: [`SourceError`], [`ImageError`], [`GameError`]
//! - **Config**: environment-driven [`Config`]

pub mod config;
pub mod error;
pub mod stamp;
pub mod traits;
pub mod types;

pub use config::Config;
pub use error::{GameError, ImageError, SourceError};
pub use stamp::{next_reset_secs, DayStamp};
pub use traits::{Clock, CountrySource, ImageProcessor, SystemClock};
pub use types::{CountryRecord, GuessResult, ImagePair, PuzzleRecord, PLACEHOLDER_IMAGE};
