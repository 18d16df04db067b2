use crate::Pacing;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::Level;

/// Configuration for the [crate::Simulator] and the `highroller` binary.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Fixed seed for the reels and die. Entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_reel_delay_ms")]
    pub reel_delay_ms: u64,
    #[serde(default = "default_autoplay_delay_ms")]
    pub autoplay_delay_ms: u64,
    #[serde(default = "default_risk_reveal_delay_ms")]
    pub risk_reveal_delay_ms: u64,

    #[serde(default)]
    pub demo_history: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    pub data_dir: PathBuf,
    pub log_level: Level,
    pub seed: Option<u64>,
    pub pacing: Pacing,
    pub demo_history: bool,
}

fn default_data_dir() -> String {
    ".highroller".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_reel_delay_ms() -> u64 {
    2_200
}

fn default_autoplay_delay_ms() -> u64 {
    600
}

fn default_risk_reveal_delay_ms() -> u64 {
    900
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            seed: None,
            reel_delay_ms: default_reel_delay_ms(),
            autoplay_delay_ms: default_autoplay_delay_ms(),
            risk_reveal_delay_ms: default_risk_reveal_delay_ms(),
            demo_history: false,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.autoplay_delay_ms == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "autoplay_delay_ms",
                value: self.autoplay_delay_ms,
            });
        }

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        Ok(ValidatedConfig {
            data_dir: PathBuf::from(self.data_dir),
            log_level,
            seed: self.seed,
            pacing: Pacing {
                reel: Duration::from_millis(self.reel_delay_ms),
                autoplay: Duration::from_millis(self.autoplay_delay_ms),
                risk_reveal: Duration::from_millis(self.risk_reveal_delay_ms),
            },
            demo_history: self.demo_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        let validated = config.validate().unwrap();
        assert_eq!(validated.data_dir, PathBuf::from(".highroller"));
        assert_eq!(validated.log_level, Level::WARN);
        assert_eq!(validated.seed, None);
        assert_eq!(validated.pacing, Pacing::default());
        assert!(!validated.demo_history);
    }

    #[test]
    fn test_overrides() {
        let yaml = "\
data_dir: /tmp/hr
log_level: debug
seed: 42
reel_delay_ms: 0
risk_reveal_delay_ms: 10
demo_history: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let validated = config.validate().unwrap();
        assert_eq!(validated.data_dir, PathBuf::from("/tmp/hr"));
        assert_eq!(validated.log_level, Level::DEBUG);
        assert_eq!(validated.seed, Some(42));
        assert_eq!(validated.pacing.reel, Duration::ZERO);
        assert_eq!(validated.pacing.risk_reveal, Duration::from_millis(10));
        assert!(validated.demo_history);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let config = Config {
            log_level: "loud".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel { value }) if value == "loud"
        ));
    }

    #[test]
    fn test_rejects_zero_autoplay_delay() {
        let config = Config {
            autoplay_delay_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNonZero {
                field: "autoplay_delay_ms",
                ..
            })
        ));
    }
}
