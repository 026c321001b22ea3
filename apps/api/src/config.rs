use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::catalog::CatalogSource;
use crate::matching::scorer::ScoringConfig;

/// Application configuration loaded from environment variables.
/// Fails at startup if any value is present but unparsable.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub catalog_source: CatalogSource,
    pub default_top_n: usize,
    pub max_top_n: usize,
    pub scoring: ScoringConfig,
    pub chunk_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        // A remote catalog takes precedence over the bundled file.
        let catalog_source = match std::env::var("CATALOG_URL") {
            Ok(url) if !url.trim().is_empty() => CatalogSource::Url(url),
            _ => CatalogSource::File(PathBuf::from(
                std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data/careers.json".to_string()),
            )),
        };

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_source,
            default_top_n: parse_env("MATCH_DEFAULT_TOP_N", 10)?,
            max_top_n: parse_env("MATCH_MAX_TOP_N", 100)?,
            scoring: ScoringConfig {
                numeric_weight: parse_env("MATCH_NUMERIC_WEIGHT", 0.6)?,
                set_weight: parse_env("MATCH_SET_WEIGHT", 0.4)?,
            },
            chunk_size: parse_env("MATCH_CHUNK_SIZE", 256)?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.default_top_n > self.max_top_n {
            bail!(
                "MATCH_DEFAULT_TOP_N ({}) must not exceed MATCH_MAX_TOP_N ({})",
                self.default_top_n,
                self.max_top_n
            );
        }
        if self.chunk_size == 0 {
            bail!("MATCH_CHUNK_SIZE must be at least 1");
        }
        self.scoring
            .validate()
            .context("MATCH_NUMERIC_WEIGHT / MATCH_SET_WEIGHT are invalid")?;
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            catalog_source: CatalogSource::File(PathBuf::from("data/careers.json")),
            default_top_n: 10,
            max_top_n: 100,
            scoring: ScoringConfig::default(),
            chunk_size: 256,
        }
    }

    #[test]
    fn test_defaults_pass_checks() {
        assert!(base().check().is_ok());
    }

    #[test]
    fn test_default_top_n_above_max_rejected() {
        let mut config = base();
        config.default_top_n = 500;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let mut config = base();
        config.chunk_size = 0;
        assert!(config.check().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = base();
        config.scoring.set_weight = -0.5;
        let err = config.check().unwrap_err();
        assert!(format!("{err:#}").contains("weights.setWeight"));
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: usize = parse_env("CAREERMATCH_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
