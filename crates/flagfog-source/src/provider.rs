//! REST Countries client with retry, filtering and the autocomplete
//! name-list side channel.

use crate::backup::backup_pool;
use crate::shuffle::shuffle_pool;
use async_trait::async_trait;
use flagfog_core::{Config, CountryRecord, CountrySource, DayStamp, SourceError};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const MIN_POPULATION: u64 = 500_000;

/// Raw record shape from the REST Countries v3.1 API, limited to the
/// fields the puzzle consumes.
#[derive(Debug, Deserialize)]
struct RawCountry {
    name: RawName,
    #[serde(default)]
    cca2: Option<String>,
    #[serde(default)]
    capital: Vec<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    population: u64,
    #[serde(default)]
    flags: Option<RawFlags>,
}

#[derive(Debug, Deserialize)]
struct RawName {
    common: String,
}

#[derive(Debug, Deserialize)]
struct RawFlags {
    #[serde(default)]
    png: Option<String>,
}

impl RawCountry {
    /// A record qualifies with population > 500,000 and a resolvable
    /// country code + flag URL.
    fn qualifies(&self) -> bool {
        self.population > MIN_POPULATION
            && self.cca2.as_deref().is_some_and(|c| !c.is_empty())
            && self
                .flags
                .as_ref()
                .and_then(|f| f.png.as_deref())
                .is_some_and(|u| !u.is_empty())
    }

    fn into_record(self) -> Option<CountryRecord> {
        let flag_url = self.flags.and_then(|f| f.png)?;
        Some(CountryRecord {
            name: self.name.common,
            flag_url,
            capital: self
                .capital
                .into_iter()
                .next()
                .unwrap_or_else(|| "N/A".to_string()),
            continent: self.region.unwrap_or_else(|| "Unknown".to_string()),
            population: self.population,
        })
    }
}

/// Filter raw provider records down to the qualifying pool.
fn build_pool(raw: Vec<RawCountry>) -> Vec<CountryRecord> {
    raw.into_iter()
        .filter(RawCountry::qualifies)
        .filter_map(RawCountry::into_record)
        .collect()
}

/// Country pool source backed by the REST Countries API.
///
/// Falls back to the built-in backup pool when the provider is down, so a
/// provider outage degrades variety rather than killing the puzzle.
pub struct RestCountriesSource {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
    names_file: PathBuf,
    use_backup: bool,
}

impl RestCountriesSource {
    /// Create a source from the runtime config.
    pub fn new(config: &Config) -> Self {
        Self {
            endpoint: config.provider_url.clone(),
            client: reqwest::Client::builder()
                .timeout(config.fetch_timeout)
                .build()
                .unwrap_or_default(),
            max_retries: 3,
            names_file: config.names_file.clone(),
            use_backup: true,
        }
    }

    /// Override the provider endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the names-list path.
    pub fn names_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.names_file = path.into();
        self
    }

    /// Set the retry budget for the provider call.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries.max(1);
        self
    }

    /// Disable the backup pool, so provider failures propagate.
    pub fn without_backup(mut self) -> Self {
        self.use_backup = false;
        self
    }

    /// Single provider call.
    async fn fetch_raw_once(&self) -> Result<Vec<RawCountry>, SourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))
    }

    /// Provider call with exponential backoff: 1s, 2s, 4s between tries.
    async fn fetch_raw_with_retry(&self) -> Result<Vec<RawCountry>, SourceError> {
        let mut last_error = SourceError::Unavailable("no attempt made".to_string());

        for attempt in 0..self.max_retries {
            match self.fetch_raw_once().await {
                Ok(raw) => return Ok(raw),
                Err(e) => {
                    tracing::debug!("provider attempt {} failed: {}", attempt + 1, e);
                    last_error = e;
                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(Duration::from_secs(1 << attempt)).await;
                    }
                }
            }
        }

        Err(last_error)
    }

    /// Write the sorted autocomplete name list.
    ///
    /// Side channel only: failures are logged and swallowed, never allowed
    /// to fail pool generation.
    fn write_names_list(&self, pool: &[CountryRecord]) {
        let mut names: Vec<&str> = pool.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();

        let written = serde_json::to_string(&names)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                std::fs::write(&self.names_file, json).map_err(|e| e.to_string())
            });
        if let Err(e) = written {
            tracing::warn!(
                "failed to write country name list {}: {}",
                self.names_file.display(),
                e
            );
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    async fn fetch_pool(&self, stamp: DayStamp) -> Result<Vec<CountryRecord>, SourceError> {
        let mut pool = match self.fetch_raw_with_retry().await {
            Ok(raw) => build_pool(raw),
            Err(e) if self.use_backup => {
                tracing::warn!("provider fetch failed, using backup pool: {}", e);
                backup_pool()
            }
            Err(e) => return Err(e),
        };

        if pool.is_empty() {
            if !self.use_backup {
                return Err(SourceError::EmptyPool);
            }
            tracing::warn!("provider returned no qualifying countries, using backup pool");
            pool = backup_pool();
        }

        self.write_names_list(&pool);

        shuffle_pool(&mut pool, stamp);
        tracing::info!(
            "country pool ready for {}: {} candidates, head {:?}",
            stamp,
            pool.len(),
            pool.first().map(|c| c.name.as_str())
        );
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from(value: serde_json::Value) -> Vec<RawCountry> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_filter_excludes_small_and_codeless() {
        let raw = raw_from(json!([
            {
                "name": {"common": "A-Land"},
                "cca2": "AL",
                "capital": ["Alpha"],
                "region": "Europe",
                "population": 10_000_000,
                "flags": {"png": "https://flagcdn.com/w320/al.png"}
            },
            {
                "name": {"common": "B-Isle"},
                "cca2": "BI",
                "capital": ["Beta"],
                "region": "Oceania",
                "population": 100_000,
                "flags": {"png": "https://flagcdn.com/w320/bi.png"}
            },
            {
                "name": {"common": "C-Stan"},
                "capital": ["Gamma"],
                "region": "Asia",
                "population": 2_000_000,
                "flags": {"png": "https://flagcdn.com/w320/cs.png"}
            },
            {
                "name": {"common": "D-Republic"},
                "cca2": "DR",
                "capital": ["Delta"],
                "region": "Africa",
                "population": 3_000_000
            }
        ]));

        let pool = build_pool(raw);
        let names: Vec<&str> = pool.iter().map(|c| c.name.as_str()).collect();

        // B-Isle: population too small. C-Stan: no country code.
        // D-Republic: no flag reference.
        assert_eq!(names, vec!["A-Land"]);
    }

    #[test]
    fn test_missing_capital_and_region_defaults() {
        let raw = raw_from(json!([
            {
                "name": {"common": "Capital-less"},
                "cca2": "CL",
                "population": 1_000_000,
                "flags": {"png": "https://flagcdn.com/w320/cl.png"}
            }
        ]));

        let pool = build_pool(raw);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].capital, "N/A");
        assert_eq!(pool[0].continent, "Unknown");
    }

    #[test]
    fn test_restcountries_shape_parses() {
        // Trimmed real-world record shape from /v3.1/all.
        let raw = raw_from(json!([
            {
                "name": {"common": "France", "official": "French Republic"},
                "cca2": "FR",
                "capital": ["Paris"],
                "region": "Europe",
                "subregion": "Western Europe",
                "population": 67_391_582,
                "flags": {
                    "png": "https://flagcdn.com/w320/fr.png",
                    "svg": "https://flagcdn.com/fr.svg"
                },
                "maps": {"googleMaps": "https://goo.gl/maps/x"}
            }
        ]));

        let pool = build_pool(raw);
        assert_eq!(pool[0].name, "France");
        assert_eq!(pool[0].flag_url, "https://flagcdn.com/w320/fr.png");
        assert_eq!(pool[0].capital, "Paris");
    }

    #[test]
    fn test_filtered_pool_orders_deterministically() {
        // A qualifies (10M), B is filtered out (100k), C qualifies (2M);
        // the date seed then fixes the order of {A, C}.
        let raw = || {
            raw_from(json!([
                {
                    "name": {"common": "A-Land"},
                    "cca2": "AL",
                    "population": 10_000_000,
                    "flags": {"png": "https://flagcdn.com/w320/al.png"}
                },
                {
                    "name": {"common": "B-Isle"},
                    "cca2": "BI",
                    "population": 100_000,
                    "flags": {"png": "https://flagcdn.com/w320/bi.png"}
                },
                {
                    "name": {"common": "C-Stan"},
                    "cca2": "CS",
                    "population": 2_000_000,
                    "flags": {"png": "https://flagcdn.com/w320/cs.png"}
                }
            ]))
        };

        let stamp = DayStamp::parse("2024-11-09").unwrap();
        let mut first = build_pool(raw());
        crate::shuffle::shuffle_pool(&mut first, stamp);
        let mut second = build_pool(raw());
        crate::shuffle::shuffle_pool(&mut second, stamp);

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(["A-Land", "C-Stan"].contains(&first[0].name.as_str()));
    }

    #[tokio::test]
    async fn test_unreachable_provider_falls_back_to_backup() {
        let dir = std::env::temp_dir().join(format!("flagfog_src_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let names = dir.join("names.json");

        let source = RestCountriesSource::new(&Config::default())
            .endpoint("http://127.0.0.1:9/unreachable")
            .names_file(&names)
            .max_retries(1);

        let stamp = DayStamp::parse("2024-11-09").unwrap();
        let pool = source.fetch_pool(stamp).await.unwrap();
        assert!(!pool.is_empty());
        assert!(pool.iter().any(|c| c.name == "United States"));

        // Side channel still ran, sorted alphabetically.
        let written: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&names).unwrap()).unwrap();
        let mut sorted = written.clone();
        sorted.sort();
        assert_eq!(written, sorted);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_unreachable_provider_without_backup_errors() {
        let source = RestCountriesSource::new(&Config::default())
            .endpoint("http://127.0.0.1:9/unreachable")
            .max_retries(1)
            .without_backup();

        let stamp = DayStamp::parse("2024-11-09").unwrap();
        let result = source.fetch_pool(stamp).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_pool_is_deterministic_per_stamp() {
        let dir = std::env::temp_dir().join(format!("flagfog_det_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let source = RestCountriesSource::new(&Config::default())
            .endpoint("http://127.0.0.1:9/unreachable")
            .names_file(dir.join("names.json"))
            .max_retries(1);

        let stamp = DayStamp::parse("2024-11-09").unwrap();
        let first = source.fetch_pool(stamp).await.unwrap();
        let second = source.fetch_pool(stamp).await.unwrap();
        assert_eq!(first, second);

        std::fs::remove_dir_all(&dir).ok();
    }
}
