//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use serde::Deserialize;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Quorum used when `GOVERNANCE_QUORUM` is not set
pub const DEFAULT_QUORUM: u64 = 3;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Governance rule configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GovernanceConfig {
    /// Minimum total votes before a proposal can be approved
    pub quorum: u64,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self { quorum: DEFAULT_QUORUM }
    }
}

/// Which advisory oracle backs finalize/execute reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryMode {
    #[default]
    Disabled,
    Static,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdvisoryConfig {
    pub mode: AdvisoryMode,
    /// Text returned by the static oracle
    pub static_text: Option<String>,
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub governance: GovernanceConfig,
    pub advisory: AdvisoryConfig,
}

impl Settings {
    /// Load settings from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().port),
        };

        let cors = CorsConfig {
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let quorum = match lookup("GOVERNANCE_QUORUM") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(q) if q >= 1 => q,
                _ => {
                    return Err(ConfigError::InvalidValue(format!(
                        "GOVERNANCE_QUORUM must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => DEFAULT_QUORUM,
        };

        let mode = match lookup("ADVISORY_MODE").map(|m| m.trim().to_ascii_lowercase()) {
            None => AdvisoryMode::Disabled,
            Some(m) if m.is_empty() || m == "disabled" => AdvisoryMode::Disabled,
            Some(m) if m == "static" => AdvisoryMode::Static,
            Some(other) => {
                return Err(ConfigError::InvalidValue(format!(
                    "ADVISORY_MODE must be 'disabled' or 'static', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            server,
            cors,
            governance: GovernanceConfig { quorum },
            advisory: AdvisoryConfig {
                mode,
                static_text: lookup("ADVISORY_STATIC_TEXT"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.governance.quorum, DEFAULT_QUORUM);
        assert_eq!(settings.advisory.mode, AdvisoryMode::Disabled);
        assert_eq!(settings.cors.allowed_origins, vec!["http://localhost:3001".to_string()]);
    }

    #[test]
    fn test_reads_overrides() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ("GOVERNANCE_QUORUM", "5"),
            ("ADVISORY_MODE", "Static"),
            ("ADVISORY_STATIC_TEXT", "looks fine"),
        ]))
        .unwrap();

        assert_eq!(settings.server.host, Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(settings.governance.quorum, 5);
        assert_eq!(settings.advisory.mode, AdvisoryMode::Static);
        assert_eq!(settings.advisory.static_text.as_deref(), Some("looks fine"));
    }

    #[test]
    fn test_rejects_zero_or_garbage_quorum() {
        for bad in ["0", "-1", "three"] {
            assert!(Settings::from_lookup(lookup_from(&[("GOVERNANCE_QUORUM", bad)])).is_err());
        }
    }

    #[test]
    fn test_rejects_unknown_advisory_mode() {
        assert!(Settings::from_lookup(lookup_from(&[("ADVISORY_MODE", "openai")])).is_err());
    }
}
