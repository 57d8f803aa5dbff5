//! Shared application state for the HTTP layer.

use flagfog_game::DailyPuzzleManager;
use std::path::PathBuf;
use std::sync::Arc;

/// State handed to every request handler by injection; no handler touches
/// global mutable state directly.
pub struct AppState {
    /// The one puzzle manager instance for this process.
    pub manager: Arc<DailyPuzzleManager>,
    /// Path of the autocomplete name list written by the country source.
    pub names_file: PathBuf,
}

impl AppState {
    pub fn new(manager: Arc<DailyPuzzleManager>, names_file: PathBuf) -> Self {
        Self {
            manager,
            names_file,
        }
    }
}
