//! Driver configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_POPULATION_SIZE: usize = 24;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from a TOML file. Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub population_size: usize,
    pub mutation_rate: f64,
    pub seed: u64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: DEFAULT_SEED,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Config {
    /// The defaults, or the contents of `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests unwrap freely")]

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn keys_override_defaults() {
        let config = Config::from_toml("population_size = 8\nseed = 7\n").unwrap();
        assert_eq!(config.population_size, 8);
        assert_eq!(config.seed, 7);
        assert_eq!(config.mutation_rate, DEFAULT_MUTATION_RATE);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml("populaton_size = 8"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file() {
        let error = Config::load(Some(Path::new("/nonexistent/seni.toml"))).unwrap_err();
        assert!(error.to_string().starts_with("cannot read /nonexistent/seni.toml"));
    }
}
