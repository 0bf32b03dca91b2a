//! Runtime settings.
//!
//! Defaults match the batch job's fixed behavior. Each can be overridden
//! through the environment or a `.env` file in the working directory.
//!
//! | Variable                 | Default                               |
//! |--------------------------|---------------------------------------|
//! | `HEARTPREP_TIMEOUT_SECS` | `30`                                  |
//! | `HEARTPREP_OUTPUT`       | `heart_failure_dataset_procesado.csv` |
//! | `HEARTPREP_LOG_FORMAT`   | `text` (`text` or `json`)             |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logs::LogFormat;
use crate::output::OUTPUT_FILE;

pub const TIMEOUT_VAR: &str = "HEARTPREP_TIMEOUT_SECS";
pub const OUTPUT_VAR: &str = "HEARTPREP_OUTPUT";
pub const LOG_FORMAT_VAR: &str = "HEARTPREP_LOG_FORMAT";

/// Upper bound on the whole HTTP request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Sent with every request.
pub const USER_AGENT: &str = concat!("heartprep/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub timeout: Duration,
    pub output_path: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_path: PathBuf::from(OUTPUT_FILE),
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(TIMEOUT_VAR, &raw, e.to_string()))?;
            if secs == 0 {
                return Err(invalid(TIMEOUT_VAR, &raw, "must be at least 1".to_string()));
            }
            settings.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(OUTPUT_VAR) {
            if raw.trim().is_empty() {
                return Err(invalid(OUTPUT_VAR, &raw, "must not be empty".to_string()));
            }
            settings.output_path = PathBuf::from(raw);
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            settings.log_format = match raw.trim().to_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(invalid(LOG_FORMAT_VAR, &raw, "expected 'text' or 'json'".to_string()))
                }
            };
        }

        Ok(settings)
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn invalid(var: &'static str, value: &str, message: String) -> ConfigError {
    ConfigError::InvalidVar {
        var,
        value: value.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.output_path, PathBuf::from("heart_failure_dataset_procesado.csv"));
        assert_eq!(settings.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (TIMEOUT_VAR, "5"),
            (OUTPUT_VAR, "/tmp/out.csv"),
            (LOG_FORMAT_VAR, "JSON"),
        ]))
        .unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.output_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Settings::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));

        assert!(Settings::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let err = Settings::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(err.to_string().contains("xml"));
    }
}
