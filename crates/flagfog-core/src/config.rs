//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration, read from environment variables with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address for the HTTP server.
    pub bind: String,
    /// Country provider endpoint.
    pub provider_url: String,
    /// Timeout for provider and flag-image fetches.
    pub fetch_timeout: Duration,
    /// Gaussian blur kernel size (odd, symmetric).
    pub blur_kernel: u32,
    /// Path of the autocomplete country-name list.
    pub names_file: PathBuf,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind: std::env::var("FLAGFOG_BIND").unwrap_or(defaults.bind),
            provider_url: std::env::var("FLAGFOG_PROVIDER_URL").unwrap_or(defaults.provider_url),
            fetch_timeout: std::env::var("FLAGFOG_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            blur_kernel: std::env::var("FLAGFOG_BLUR_KERNEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.blur_kernel),
            names_file: std::env::var("FLAGFOG_NAMES_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.names_file),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
            provider_url: "https://restcountries.com/v3.1/all".to_string(),
            fetch_timeout: Duration::from_secs(10),
            blur_kernel: 99,
            names_file: PathBuf::from("country_names.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.blur_kernel, 99);
        assert_eq!(config.provider_url, "https://restcountries.com/v3.1/all");
        assert_eq!(config.names_file, PathBuf::from("country_names.json"));
    }
}
