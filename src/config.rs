use std::str::FromStr;

use crate::params::ParameterSet;

#[derive(Debug, Clone)]
pub struct Config {
    /// Parameters applied to new hashes. Existing records keep their own.
    pub params: ParameterSet,
    pub max_concurrency: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ParameterSet::DEFAULT;

        let mut params = defaults
            .clone()
            .with_memory_cost(parse_or(&lookup, "PASSWORDS_MEMORY_COST", defaults.memory_cost)?)
            .with_time_cost(parse_or(&lookup, "PASSWORDS_TIME_COST", defaults.time_cost)?)
            .with_parallelism(parse_or(&lookup, "PASSWORDS_PARALLELISM", defaults.parallelism)?)
            .with_salt_length(parse_or(&lookup, "PASSWORDS_SALT_LENGTH", defaults.salt_length)?)
            .with_key_length(parse_or(&lookup, "PASSWORDS_KEY_LENGTH", defaults.key_length)?);

        if let Some(algorithm) = lookup("PASSWORDS_ALGORITHM").filter(|s| !s.trim().is_empty()) {
            params = params.with_algorithm(algorithm.trim().to_string());
        }

        params
            .validate()
            .map_err(|e| format!("Invalid PASSWORDS_* parameters: {e}"))?;

        let default_concurrency = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        let max_concurrency: usize =
            parse_or(&lookup, "PASSWORDS_MAX_CONCURRENCY", default_concurrency)?;
        if max_concurrency == 0 {
            return Err("Invalid PASSWORDS_MAX_CONCURRENCY: must be at least 1".to_string());
        }

        let log_level = lookup("PASSWORDS_LOG_LEVEL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Config {
            params,
            max_concurrency,
            log_level,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| format!("Invalid {key}: {e}")),
        None => Ok(default),
    }
}
