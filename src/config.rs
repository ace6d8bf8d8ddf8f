use serde::{Deserialize, Serialize};
use std::env;

use crate::policy::UpdateMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service_name: String,
    pub http_port: u16,
    pub update_mode: UpdateMode,
    pub seed_mock_reports: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "report-moderation".to_string());

        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "9090".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("HTTP_PORT".to_string(), e.to_string()))?;

        let update_mode = env::var("UPDATE_MODE")
            .unwrap_or_else(|_| "lenient".to_string())
            .parse::<UpdateMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("UPDATE_MODE".to_string(), e))?;

        let seed_mock_reports = parse_bool(
            "SEED_MOCK_REPORTS",
            &env::var("SEED_MOCK_REPORTS").unwrap_or_else(|_| "true".to_string()),
        )?;

        Ok(Config {
            service_name,
            http_port,
            update_mode,
            seed_mock_reports,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::InvalidEnvVar("SERVICE_NAME".to_string(), "cannot be empty".to_string()));
        }

        if self.http_port == 0 {
            return Err(ConfigError::InvalidEnvVar("HTTP_PORT".to_string(), "must be a valid port number".to_string()));
        }

        Ok(())
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(name.to_string(), format!("not a boolean: {}", other))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn init_config() -> Result<&'static Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG.set(config)
        .map_err(|_| ConfigError::InvalidEnvVar("CONFIG".to_string(), "Config already initialized".to_string()))?;

    CONFIG.get().ok_or_else(|| ConfigError::MissingEnvVar("CONFIG".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            service_name: "report-moderation".to_string(),
            http_port: 9090,
            update_mode: UpdateMode::Lenient,
            seed_mock_reports: true,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(config().validate().is_ok());

        let no_port = Config { http_port: 0, ..config() };
        assert!(no_port.validate().is_err());

        let no_name = Config { service_name: String::new(), ..config() };
        assert!(no_name.validate().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}
