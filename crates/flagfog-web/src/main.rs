//! Flagfog server binary.
//!
//! Wires the REST Countries source, the flag image pipeline and the daily
//! puzzle manager together, spawns the daily reset timer, and serves the
//! API.

use flagfog_core::{next_reset_secs, Config};
use flagfog_game::DailyPuzzleManager;
use flagfog_image::FlagProcessor;
use flagfog_source::RestCountriesSource;
use flagfog_web::{serve, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flagfog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        "starting flagfog: provider {}, blur kernel {}",
        config.provider_url,
        config.blur_kernel
    );

    let source = Arc::new(RestCountriesSource::new(&config));
    let images = Arc::new(FlagProcessor::new(&config));
    let manager = Arc::new(DailyPuzzleManager::new(source, images));

    // Daily reset timer: sleeps to the next UTC midnight, then invokes the
    // daily-check hook. A small skew guard keeps the firing on the far
    // side of the boundary.
    {
        let manager = manager.clone();
        tokio::spawn(async move {
            loop {
                let secs = next_reset_secs(chrono::Utc::now()).max(1) as u64;
                tokio::time::sleep(Duration::from_secs(secs + 5)).await;
                manager.check_and_reset_if_needed().await;
            }
        });
    }

    let state = Arc::new(AppState::new(manager, config.names_file.clone()));
    serve(state, &config.bind).await
}
