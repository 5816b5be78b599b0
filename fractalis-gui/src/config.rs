use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::filter;

use fractalis::{contact::DEFAULT_AGENCY_PHONE, latency::Latency};

pub const DEFAULT_FILE_NAME: &str = "gui.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// log level, can be "info", "debug", "trace".
    pub log_level: Option<String>,
    /// Log at debug level when no log level is set.
    pub debug: Option<bool>,
    /// Replaces every simulated delay of the mocked backend, in milliseconds.
    pub mock_latency_ms: Option<u64>,
    /// Agency line used by the call and WhatsApp intents.
    pub contact_phone: Option<String>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = std::fs::read_to_string(path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound,
                _ => ConfigError::ReadingFile(format!("Reading configuration file: {}", e)),
            })
            .and_then(|file_content| {
                toml::from_str::<Config>(&file_content).map_err(|e| {
                    ConfigError::ReadingFile(format!("Parsing configuration file: {}", e))
                })
            })?;

        // check if log_level field is valid
        config.log_level()?;
        Ok(config)
    }

    /// Missing file means default values.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::from_file(path) {
            Err(ConfigError::NotFound) => Ok(Self::default()),
            res => res,
        }
    }

    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string(&self)
            .map_err(|e| ConfigError::WritingFile(format!("Failed to serialize config: {}", e)))?;

        let mut config_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ConfigError::WritingFile(e.to_string()))?;

        config_file.write_all(content.as_bytes()).map_err(|e| {
            tracing::warn!("failed to write to file: {:?}", e);
            ConfigError::WritingFile(e.to_string())
        })?;

        tracing::info!("Done writing gui configuration file");
        Ok(())
    }

    pub fn log_level(&self) -> Result<filter::LevelFilter, ConfigError> {
        if let Some(level) = &self.log_level {
            match level.as_ref() {
                "info" => Ok(filter::LevelFilter::INFO),
                "debug" => Ok(filter::LevelFilter::DEBUG),
                "trace" => Ok(filter::LevelFilter::TRACE),
                _ => Err(ConfigError::InvalidField(
                    "log_level",
                    format!("Unknown value '{}'", level),
                )),
            }
        } else if let Some(true) = self.debug {
            Ok(filter::LevelFilter::DEBUG)
        } else {
            Ok(filter::LevelFilter::INFO)
        }
    }

    pub fn latency(&self) -> Latency {
        self.mock_latency_ms
            .map(|ms| Latency::fixed(Duration::from_millis(ms)))
            .unwrap_or_default()
    }

    pub fn contact_phone(&self) -> &str {
        self.contact_phone.as_deref().unwrap_or(DEFAULT_AGENCY_PHONE)
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum ConfigError {
    InvalidField(&'static str, String),
    NotFound,
    ReadingFile(String),
    WritingFile(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Config file not found"),
            Self::InvalidField(field, message) => {
                write!(f, "Config field {} is invalid: {}", field, message)
            }
            Self::ReadingFile(e) => write!(f, "Error while reading file: {}", e),
            Self::WritingFile(e) => write!(f, "Error while writing file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        assert_eq!(Config::from_file(&path), Err(ConfigError::NotFound));

        let config = Config::from_file_or_default(&path).unwrap();
        assert_eq!(config.log_level(), Ok(filter::LevelFilter::INFO));
        assert_eq!(config.latency(), Latency::default());
        assert_eq!(config.contact_phone(), DEFAULT_AGENCY_PHONE);
    }

    #[test]
    fn parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(
            &path,
            r#"
            log_level = "trace"
            mock_latency_ms = 0
            contact_phone = "+225 01 02 03 04 05"
            "#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_level(), Ok(filter::LevelFilter::TRACE));
        assert_eq!(config.latency(), Latency::none());
        assert_eq!(config.contact_phone(), "+225 01 02 03 04 05");

        config.to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn debug_flag_sets_default_level() {
        let config = Config {
            debug: Some(true),
            ..Default::default()
        };
        assert_eq!(config.log_level(), Ok(filter::LevelFilter::DEBUG));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(&path, "log_level = \"verbose\"\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::InvalidField("log_level", _))
        ));
    }
}
