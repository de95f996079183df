//! Configuration for the enrich-snippet service.
//!
//! Settings are resolved in layers, later layers winning:
//! 1. Built-in defaults
//! 2. TOML config file (`--config` / `ENRICH_SNIPPET_CONFIG`)
//! 3. Environment variables (`ENRICH_SNIPPET_HOST`, `PORT`, `ENRICH_SNIPPET_BODY_LIMIT`,
//!    `ENRICH_SNIPPET_CORS`)
//! 4. Command line `--bind`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default maximum request body size (16 MiB).
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub const ENV_HOST: &str = "ENRICH_SNIPPET_HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_BODY_LIMIT: &str = "ENRICH_SNIPPET_BODY_LIMIT";
pub const ENV_CORS: &str = "ENRICH_SNIPPET_CORS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid bind address {0}")]
    InvalidAddress(String),
}

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Host or IP to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Maximum accepted request body in bytes.
    pub body_limit: usize,
    /// Whether to attach a permissive CORS layer.
    pub cors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            body_limit: DEFAULT_BODY_LIMIT,
            cors: true,
        }
    }
}

impl Settings {
    /// Display form of the listen address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply a bind address that can be:
    /// - Just a port: "8080" -> keeps the configured host
    /// - Just a host: "127.0.0.1" -> keeps the configured port
    /// - Host and port: "127.0.0.1:8080"
    pub fn apply_bind(&mut self, bind: &str) -> Result<(), ConfigError> {
        let bind = bind.trim();
        if bind.is_empty() {
            return Err(ConfigError::InvalidAddress(bind.to_string()));
        }

        if let Ok(port) = bind.parse::<u16>() {
            self.port = port;
            return Ok(());
        }

        if let Some((host, port_str)) = bind.rsplit_once(':') {
            if let Ok(port) = port_str.parse::<u16>() {
                self.host = host.to_string();
                self.port = port;
                return Ok(());
            }
            return Err(ConfigError::InvalidAddress(bind.to_string()));
        }

        self.host = bind.to_string();
        Ok(())
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = get(ENV_HOST) {
            tracing::debug!("Using {} from environment: {}", ENV_HOST, host);
            self.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.port = parse_value(ENV_PORT, &port)?;
        }
        if let Some(limit) = get(ENV_BODY_LIMIT) {
            self.body_limit = parse_value(ENV_BODY_LIMIT, &limit)?;
        }
        if let Some(cors) = get(ENV_CORS) {
            self.cors = parse_flag(ENV_CORS, &cors)?;
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Contents of a TOML config file. Every key is optional.
///
/// ```toml
/// host = "127.0.0.1"
/// port = 8080
/// body_limit = 1048576
/// cors = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cors: Option<bool>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay the keys present in this config onto `settings`.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(body_limit) = self.body_limit {
            settings.body_limit = body_limit;
        }
        if let Some(cors) = self.cors {
            settings.cors = cors;
        }
    }
}

/// Options controlling how settings are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Config file path.
    pub config_path: Option<PathBuf>,
    /// Bind address from the command line.
    pub bind: Option<String>,
}

/// Resolve settings from defaults, config file, environment and CLI options.
pub async fn load_settings(options: &LoadOptions) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(path) = &options.config_path {
        tracing::debug!("Loading config from {}", path.display());
        Config::load_from_path(path)
            .await?
            .apply_to_settings(&mut settings);
    }

    settings.apply_env(|key| std::env::var(key).ok())?;

    if let Some(bind) = &options.bind {
        settings.apply_bind(bind)?;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.body_limit, DEFAULT_BODY_LIMIT);
        assert!(settings.cors);
        assert_eq!(settings.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_apply_bind() {
        let mut settings = Settings::default();
        settings.apply_bind("3030").unwrap();
        assert_eq!((settings.host.as_str(), settings.port), ("0.0.0.0", 3030));

        settings.apply_bind("127.0.0.1").unwrap();
        assert_eq!((settings.host.as_str(), settings.port), ("127.0.0.1", 3030));

        settings.apply_bind("localhost:9000").unwrap();
        assert_eq!((settings.host.as_str(), settings.port), ("localhost", 9000));

        assert!(settings.apply_bind("host:notaport").is_err());
        assert!(settings.apply_bind("  ").is_err());
    }

    #[test]
    fn test_apply_env() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[
                ("ENRICH_SNIPPET_HOST", "127.0.0.1"),
                ("PORT", "8080"),
                ("ENRICH_SNIPPET_BODY_LIMIT", "1024"),
                ("ENRICH_SNIPPET_CORS", "off"),
            ]))
            .unwrap();

        assert_eq!(
            settings,
            Settings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                body_limit: 1024,
                cors: false,
            }
        );
    }

    #[test]
    fn test_apply_env_ignores_empty_and_rejects_garbage() {
        let mut settings = Settings::default();
        settings.apply_env(env(&[("PORT", "")])).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);

        let err = settings.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));

        assert!(settings
            .apply_env(env(&[("ENRICH_SNIPPET_CORS", "maybe")]))
            .is_err());
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("enrich-snippet.toml");
        std::fs::write(&path, "port = 9100\ncors = false\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.port, Some(9100));
        assert_eq!(config.host, None);

        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.port, 9100);
        assert!(!settings.cors);
        assert_eq!(settings.host, DEFAULT_HOST);
    }

    #[tokio::test]
    async fn test_load_from_path_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_from_path(&missing).await,
            Err(ConfigError::Read { .. })
        ));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "listen = true\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&bad).await,
            Err(ConfigError::Parse { .. })
        ));
    }
}
