//! CLI configuration.
//!
//! Read once from the environment at startup and passed down explicitly;
//! nothing here is global.

use anyhow::{anyhow, Result};
use padron_id::SystemClock;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Clock used when generating company keys.
    pub key_clock: SystemClock,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            key_clock: SystemClock::Local,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup("PADRON_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("PADRON_LOG_FORMAT") {
            None => defaults.log_format,
            Some(v) => match v.to_lowercase().as_str() {
                "text" | "pretty" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => return Err(anyhow!("PADRON_LOG_FORMAT: unknown format '{other}'")),
            },
        };

        let key_clock = match lookup("PADRON_KEY_CLOCK") {
            None => defaults.key_clock,
            Some(v) => v
                .parse()
                .map_err(|e: String| anyhow!("PADRON_KEY_CLOCK: {e}"))?,
        };

        Ok(Self {
            log_level,
            log_format,
            key_clock,
        })
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, log_level: Option<String>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.key_clock, SystemClock::Local);
    }

    #[test]
    fn test_from_vars() {
        let config = Config::from_lookup(lookup(&[
            ("PADRON_LOG_LEVEL", "debug"),
            ("PADRON_LOG_FORMAT", "JSON"),
            ("PADRON_KEY_CLOCK", "utc"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.key_clock, SystemClock::Utc);
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(Config::from_lookup(lookup(&[("PADRON_LOG_FORMAT", "xml")])).is_err());
        assert!(Config::from_lookup(lookup(&[("PADRON_KEY_CLOCK", "mars")])).is_err());
    }

    #[test]
    fn test_override_log_level() {
        let config = Config::default().with_overrides(Some("trace".to_string()));
        assert_eq!(config.log_level, "trace");
        let config = config.with_overrides(None);
        assert_eq!(config.log_level, "trace");
    }
}
