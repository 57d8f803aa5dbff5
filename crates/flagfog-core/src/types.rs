//! Data model: country records, puzzle records and guess results.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Placeholder `data:` URI substituted for both image slots when the flag
/// pipeline fails. 1x1 transparent PNG.
pub const PLACEHOLDER_IMAGE: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// A qualifying country as produced by the source: filtered raw provider
/// data, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Common name, unique within the pool.
    pub name: String,
    /// Canonical flag image URL.
    pub flag_url: String,
    /// Capital city, "N/A" when the provider lists none.
    pub capital: String,
    /// Continent / region name.
    pub continent: String,
    /// Population count.
    pub population: u64,
}

/// Encoded image pair produced by the flag pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    /// Gaussian-blurred variant, as a base64 `data:` URI.
    pub blurred: String,
    /// Untouched variant, as a base64 `data:` URI.
    pub unblurred: String,
}

impl ImagePair {
    /// The pair substituted when fetch/decode/blur/encode fails.
    pub fn placeholder() -> Self {
        Self {
            blurred: PLACEHOLDER_IMAGE.to_string(),
            unblurred: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// The fully derived state for one day's puzzle.
///
/// Created once per day by the manager, read by every guess and hint
/// request until it is superseded at the next reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub country_name: String,
    pub flag_url: String,
    pub capital: String,
    pub continent: String,
    pub population: u64,
    /// Blurred flag as a base64 `data:` URI.
    pub blurred_image: String,
    /// Unblurred flag as a base64 `data:` URI.
    pub unblurred_image: String,
}

impl PuzzleRecord {
    /// Build a record from a country plus its processed images.
    pub fn new(country: &CountryRecord, images: ImagePair) -> Self {
        Self {
            country_name: country.name.clone(),
            flag_url: country.flag_url.clone(),
            capital: country.capital.clone(),
            continent: country.continent.clone(),
            population: country.population,
            blurred_image: images.blurred,
            unblurred_image: images.unblurred,
        }
    }

    /// Replace both image fields.
    pub fn set_images(&mut self, images: ImagePair) {
        self.blurred_image = images.blurred;
        self.unblurred_image = images.unblurred;
    }

    /// Stable per-country identifier: first 8 bytes of SHA-256 of the
    /// country name. Deterministic across runs; not a security boundary.
    pub fn game_id(&self) -> u64 {
        let digest = Sha256::digest(self.country_name.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(bytes)
    }
}

/// Outcome of one guess evaluation.
///
/// `next_reset` is attached by the HTTP layer; everything else comes from
/// the hint state machine.
#[derive(Debug, Clone, Serialize)]
pub struct GuessResult {
    pub correct: bool,
    pub hint_level: u8,
    pub hint_text: Option<String>,
    pub hint_image: Option<String>,
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl GuessResult {
    /// Terminal result: round over, reveal the answer.
    pub fn is_terminal(&self) -> bool {
        self.player_name.is_some()
    }
}

/// Render a population count with thousands separators, e.g. `331,002,651`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
