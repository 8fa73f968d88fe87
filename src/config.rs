use anyhow::{bail, Context, Result};
#[cfg(test)]
use std::collections::HashMap;
use std::env;

use crate::advancer::{DEFAULT_WINDOW_SECS, MAX_WINDOW_SECS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Open-time seconds added to the reference timestamp
    // Default: 10800 (3 working hours)
    pub window_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env if present, ignore if missing
        Self::from_getter(|key| env::var(key).ok())
    }

    /// Parse config from a custom getter function (for testing)
    pub fn from_getter<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            window_secs: match get("EXPIRY_WINDOW_SECS").filter(|s| !s.trim().is_empty()) {
                Some(value) => value
                    .trim()
                    .parse()
                    .context("EXPIRY_WINDOW_SECS must be a whole number of seconds")?,
                None => DEFAULT_WINDOW_SECS,
            },
        })
    }

    /// Create config from a HashMap (convenience for testing)
    #[cfg(test)]
    pub fn from_map(map: &HashMap<&str, &str>) -> Result<Self> {
        Self::from_getter(|key| map.get(key).map(|v| v.to_string()))
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_window_secs(mut self, window_secs: Option<u64>) -> Self {
        if let Some(secs) = window_secs {
            self.window_secs = secs;
        }
        self
    }

    /// Validate configuration values at startup.
    /// Returns Ok(()) if all validations pass, or Err with details of what failed.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.window_secs > MAX_WINDOW_SECS {
            errors.push(format!(
                "EXPIRY_WINDOW_SECS={} is too large (max: {}).",
                self.window_secs, MAX_WINDOW_SECS
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )
        }
    }
}
