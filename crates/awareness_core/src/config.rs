//! Process configuration resolved from `AWARENESS_*` environment variables.
//!
//! # Responsibility
//! - Collect runtime knobs for hosts (CLI, embedders) in one value.
//! - Fall back to defaults for unset or blank variables.
//!
//! # Invariants
//! - Present but malformed values are rejected, never silently defaulted.
//! - `log_dir` is absolute so it can be passed to `init_logging` as is.

use crate::logging::{default_log_level, normalize_level};
use crate::service::articles::DEFAULT_FETCH_LATENCY;
use crate::service::contact::DEFAULT_SUBMIT_LATENCY;
use crate::service::overlay::OverlayPosition;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_LOG_LEVEL: &str = "AWARENESS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "AWARENESS_LOG_DIR";
pub const ENV_DB_PATH: &str = "AWARENESS_DB_PATH";
pub const ENV_OVERLAY_POSITION: &str = "AWARENESS_OVERLAY_POSITION";
pub const ENV_ARTICLE_LATENCY_MS: &str = "AWARENESS_ARTICLE_LATENCY_MS";
pub const ENV_SUBMIT_LATENCY_MS: &str = "AWARENESS_SUBMIT_LATENCY_MS";

const DEFAULT_DB_FILE_NAME: &str = "awareness.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "awareness-logs";

/// Configuration rejection for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(String),
    InvalidOverlayPosition(String),
    InvalidLatency { variable: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(value) => {
                write!(f, "{ENV_LOG_LEVEL}: unsupported level `{value}`")
            }
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR}: `{value}` is not an absolute path")
            }
            Self::InvalidOverlayPosition(value) => write!(
                f,
                "{ENV_OVERLAY_POSITION}: `{value}` is not one of top-left|top-right|bottom-left|bottom-right"
            ),
            Self::InvalidLatency { variable, value } => {
                write!(f, "{variable}: `{value}` is not a millisecond count")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
    pub overlay_position: OverlayPosition,
    pub article_latency: Duration,
    pub submit_latency: Duration,
}

impl Default for CoreConfig {
    fn default() -> Self {
        let temp_dir = std::env::temp_dir();
        Self {
            log_level: default_log_level(),
            log_dir: temp_dir.join(DEFAULT_LOG_DIR_NAME),
            db_path: temp_dir.join(DEFAULT_DB_FILE_NAME),
            overlay_position: OverlayPosition::default(),
            article_latency: DEFAULT_FETCH_LATENCY,
            submit_latency: DEFAULT_SUBMIT_LATENCY,
        }
    }
}

impl CoreConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&level).map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            let path = PathBuf::from(&dir);
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = path;
        }
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(position) = read(ENV_OVERLAY_POSITION) {
            config.overlay_position = OverlayPosition::parse(&position)
                .ok_or(ConfigError::InvalidOverlayPosition(position))?;
        }
        if let Some(value) = read(ENV_ARTICLE_LATENCY_MS) {
            config.article_latency = parse_latency(ENV_ARTICLE_LATENCY_MS, value)?;
        }
        if let Some(value) = read(ENV_SUBMIT_LATENCY_MS) {
            config.submit_latency = parse_latency(ENV_SUBMIT_LATENCY_MS, value)?;
        }
        Ok(config)
    }
}

fn parse_latency(variable: &'static str, value: String) -> Result<Duration, ConfigError> {
    match value.parse::<u64>() {
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(_) => Err(ConfigError::InvalidLatency { variable, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, CoreConfig, ENV_ARTICLE_LATENCY_MS, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL,
        ENV_OVERLAY_POSITION, ENV_SUBMIT_LATENCY_MS,
    };
    use crate::service::overlay::OverlayPosition;
    use std::collections::HashMap;
    use std::time::Duration;

    fn resolve(pairs: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = resolve(&[]).expect("defaults should resolve");
        assert_eq!(config, CoreConfig::default());
        assert!(config.log_dir.is_absolute());
        assert_eq!(config.overlay_position, OverlayPosition::TopRight);
        assert_eq!(config.article_latency, Duration::from_millis(1_000));
        assert_eq!(config.submit_latency, Duration::from_millis(2_000));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = resolve(&[(ENV_LOG_LEVEL, "  "), (ENV_DB_PATH, "")])
            .expect("blank values should resolve");
        assert_eq!(config, CoreConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let log_dir = std::env::temp_dir().join("awareness-config-test");
        let log_dir_str = log_dir.to_str().expect("temp dir should be valid UTF-8");
        let config = resolve(&[
            (ENV_LOG_LEVEL, "WARNING"),
            (ENV_LOG_DIR, log_dir_str),
            (ENV_DB_PATH, "data/awareness.db"),
            (ENV_OVERLAY_POSITION, "bottom-left"),
            (ENV_ARTICLE_LATENCY_MS, "0"),
            (ENV_SUBMIT_LATENCY_MS, " 25 "),
        ])
        .expect("overrides should resolve");

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, log_dir);
        assert_eq!(config.db_path.to_str(), Some("data/awareness.db"));
        assert_eq!(config.overlay_position, OverlayPosition::BottomLeft);
        assert_eq!(config.article_latency, Duration::ZERO);
        assert_eq!(config.submit_latency, Duration::from_millis(25));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            resolve(&[(ENV_LOG_LEVEL, "loud")]),
            Err(ConfigError::InvalidLogLevel("loud".to_string()))
        );
        assert_eq!(
            resolve(&[(ENV_LOG_DIR, "relative/logs")]),
            Err(ConfigError::RelativeLogDir("relative/logs".to_string()))
        );
        assert_eq!(
            resolve(&[(ENV_OVERLAY_POSITION, "center")]),
            Err(ConfigError::InvalidOverlayPosition("center".to_string()))
        );
        let err = resolve(&[(ENV_SUBMIT_LATENCY_MS, "-5")]).expect_err("negative latency");
        assert!(err.to_string().starts_with(ENV_SUBMIT_LATENCY_MS));
    }
}
