//! Configuration management for flightdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "flightdesk";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTDESK_`, sections split on `__`,
///    e.g. `FLIGHTDESK_DISPLAY__COLOR=false`)
/// 2. TOML config file at `~/.config/flightdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry rules.
    pub registry: RegistryConfig,
    /// Table output.
    pub display: DisplayConfig,
    /// Session behaviour.
    pub session: SessionConfig,
}

/// Rules applied by the registry when a draft is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Also require the departure time to be a 24-hour `HH:MM` value.
    pub strict_departure_time: bool,
    /// Maximum number of flights on the board.
    /// Set to 0 for unlimited.
    pub max_flights: usize,
}

/// Table output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour the status column by category.
    pub color: bool,
    /// Print the table after every change.
    pub echo_table: bool,
    /// Text shown in place of an empty table.
    pub empty_message: String,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prompt printed before each line in interactive mode.
    pub prompt: String,
    /// End the session on the first input error.
    pub stop_on_error: bool,
    /// List the missing fields when a submit is rejected.
    pub show_validation_hints: bool,
}

impl RegistryConfig {
    /// Get the flight limit, if one is set.
    #[must_use]
    pub fn flight_limit(&self) -> Option<usize> {
        match self.max_flights {
            0 => None,
            n => Some(n),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            echo_table: true,
            empty_message: "No flights scheduled yet...".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            stop_on_error: false,
            show_validation_hints: false,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.session.prompt.is_empty() {
            return Err(Error::ConfigValidation {
                message: "session.prompt must not be empty".to_string(),
            });
        }

        if self.display.empty_message.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "display.empty_message must not be blank".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(!config.registry.strict_departure_time);
        assert_eq!(config.registry.max_flights, 0);
        assert!(config.display.color);
        assert!(config.display.echo_table);
        assert!(!config.session.stop_on_error);
        assert!(!config.session.show_validation_hints);
    }

    #[test]
    fn test_default_display_config() {
        let display = DisplayConfig::default();
        assert_eq!(display.empty_message, "No flights scheduled yet...");
    }

    #[test]
    fn test_default_session_config() {
        let session = SessionConfig::default();
        assert_eq!(session.prompt, "> ");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_prompt() {
        let mut config = Config::default();
        config.session.prompt = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("session.prompt"));
    }

    #[test]
    fn test_validate_blank_empty_message() {
        let mut config = Config::default();
        config.display.empty_message = "   ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("display.empty_message"));
    }

    #[test]
    fn test_max_flights_unlimited_when_zero() {
        assert!(Config::default().registry.flight_limit().is_none());
    }

    #[test]
    fn test_max_flights_some_when_set() {
        let mut config = Config::default();
        config.registry.max_flights = 3;
        assert_eq!(config.registry.flight_limit(), Some(3));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flightdesk"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Missing file falls back to defaults
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "flightdesk_config_test_{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[registry]\nstrict_departure_time = true\nmax_flights = 10\n\n[display]\ncolor = false\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert!(config.registry.strict_departure_time);
        assert_eq!(config.registry.flight_limit(), Some(10));
        assert!(!config.display.color);
        // Untouched sections keep their defaults
        assert_eq!(config.session, SessionConfig::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "flightdesk_config_invalid_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[session]\nprompt = \"\"\n").unwrap();

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("strict_departure_time"));
        assert!(json.contains("echo_table"));
        assert!(json.contains("show_validation_hints"));
    }

    #[test]
    fn test_registry_config_deserialize() {
        let json = r#"{"max_flights": 5}"#;
        let registry: RegistryConfig = serde_json::from_str(json).unwrap();
        assert_eq!(registry.max_flights, 5);
        assert!(!registry.strict_departure_time);
    }
}
