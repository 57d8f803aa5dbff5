//! Built-in fallback pool used when the provider is unreachable.
//!
//! Keeps the puzzle alive through provider outages; the entries all pass
//! the qualifying filter.

use flagfog_core::CountryRecord;

/// Static fallback country list.
pub fn backup_pool() -> Vec<CountryRecord> {
    vec![
        CountryRecord {
            name: "United States".to_string(),
            flag_url: "https://flagcdn.com/w320/us.png".to_string(),
            capital: "Washington, D.C.".to_string(),
            continent: "Americas".to_string(),
            population: 331_002_651,
        },
        CountryRecord {
            name: "France".to_string(),
            flag_url: "https://flagcdn.com/w320/fr.png".to_string(),
            capital: "Paris".to_string(),
            continent: "Europe".to_string(),
            population: 67_391_582,
        },
        CountryRecord {
            name: "Japan".to_string(),
            flag_url: "https://flagcdn.com/w320/jp.png".to_string(),
            capital: "Tokyo".to_string(),
            continent: "Asia".to_string(),
            population: 125_836_021,
        },
        CountryRecord {
            name: "Brazil".to_string(),
            flag_url: "https://flagcdn.com/w320/br.png".to_string(),
            capital: "Brasília".to_string(),
            continent: "Americas".to_string(),
            population: 212_559_417,
        },
        CountryRecord {
            name: "Kenya".to_string(),
            flag_url: "https://flagcdn.com/w320/ke.png".to_string(),
            capital: "Nairobi".to_string(),
            continent: "Africa".to_string(),
            population: 53_771_296,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_pool_qualifies() {
        let pool = backup_pool();
        assert!(!pool.is_empty());
        for record in &pool {
            assert!(record.population > 500_000);
            assert!(record.flag_url.starts_with("https://"));
        }
    }
}
