// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Maximum memoized stats results (0 disables the cache)
    pub stats_cache_capacity: usize,
    /// Upper bound on records accepted in one request
    pub max_records_per_request: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            stats_cache_capacity: 256,
            max_records_per_request: 50_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first when present. Unset values fall back to
    /// the defaults; set-but-malformed numbers are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();
        Ok(Self {
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            port: parse_var("PORT", defaults.port)?,
            stats_cache_capacity: parse_var("STATS_CACHE_CAPACITY", defaults.stats_cache_capacity)?,
            max_records_per_request: parse_var(
                "MAX_RECORDS_PER_REQUEST",
                defaults.max_records_per_request,
            )?,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Only variables no other test touches
        env::set_var("STATS_CACHE_CAPACITY", "16");
        env::set_var("FRONTEND_URL", "https://trainbook.example");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.stats_cache_capacity, 16);
        assert_eq!(config.frontend_url, "https://trainbook.example");
        assert_eq!(config.max_records_per_request, 50_000);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TRAINBOOK_TEST_PORT", "eighty");
        let err = parse_var::<u16>("TRAINBOOK_TEST_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("TRAINBOOK_TEST_PORT"));
    }

    #[test]
    fn test_parse_var_default_when_unset() {
        env::remove_var("TRAINBOOK_TEST_UNSET");
        assert_eq!(parse_var("TRAINBOOK_TEST_UNSET", 7usize).unwrap(), 7);
    }
}
