//! Console configuration: defaults, optional YAML file, environment overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "PROVIDER_CONSOLE_CONFIG";
pub const SHOPKEEPER_BASE_ENV: &str = "SHOPKEEPER_BASE_URL";
pub const AUTH_BASE_ENV: &str = "AUTH_BASE_URL";
pub const TIMEOUT_ENV: &str = "PROVIDER_CONSOLE_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for talking to the provider backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL for organization, service, agent and booking endpoints
    pub shopkeeper_base_url: String,
    /// Base URL for account endpoints
    pub auth_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Refuse assignments the cached snapshots say cannot succeed
    pub enforce_assignment_preconditions: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            shopkeeper_base_url: "http://localhost:3000/api/v1/shopkeeper".to_string(),
            auth_base_url: "http://localhost:3000/api/v1/auth".to_string(),
            timeout_secs: 30,
            user_agent: concat!("provider-console/", env!("CARGO_PKG_VERSION")).to_string(),
            enforce_assignment_preconditions: false,
        }
    }
}

impl ConsoleConfig {
    /// Load from a YAML file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ConsoleConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path wins over `PROVIDER_CONSOLE_CONFIG`; environment
    /// variables are applied last.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var(CONFIG_PATH_ENV).ok();
        let path = path.or(from_env.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(SHOPKEEPER_BASE_ENV) {
            self.shopkeeper_base_url = url;
        }
        if let Some(url) = lookup(AUTH_BASE_ENV) {
            self.auth_base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{TIMEOUT_ENV} must be a number, got {raw:?}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, url) in [
            ("shopkeeper_base_url", &self.shopkeeper_base_url),
            ("auth_base_url", &self.auth_base_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be > 0".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_are_valid() {
        let config = ConsoleConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.enforce_assignment_preconditions);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: ConsoleConfig = serde_yaml::from_str(
            "shopkeeper_base_url: https://api.example.com/shop\nenforce_assignment_preconditions: true\n",
        )
        .unwrap();

        assert_eq!(config.shopkeeper_base_url, "https://api.example.com/shop");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.enforce_assignment_preconditions);
    }

    #[test]
    fn environment_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            (AUTH_BASE_ENV, "https://auth.example.com"),
            (TIMEOUT_ENV, " 5 "),
        ]);
        let mut config = ConsoleConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.auth_base_url, "https://auth.example.com");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn bad_timeout_override_is_rejected() {
        let mut config = ConsoleConfig::default();
        let err = config
            .apply_overrides(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn validation_catches_bad_values() {
        let config = ConsoleConfig {
            shopkeeper_base_url: "ftp://nope".to_string(),
            ..ConsoleConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ConsoleConfig {
            timeout_secs: 0,
            ..ConsoleConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
