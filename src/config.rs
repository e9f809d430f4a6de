use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Origins allowed to receive cross-origin response access. `"*"`
    /// opens the API to any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 1234,
            cors_allowed_origins: vec![
                "http://localhost:8080".to_string(),
                "http://localhost:1234".to_string(),
                "https://movies.com".to_string(),
                "https://midu.dev".to_string(),
            ],
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory when present, falls
    /// back to defaults otherwise, then applies the `PORT` environment
    /// override.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = {
            let path = Self::default_config_path();
            if path.exists() {
                info!("Loading config from: {}", path.display());
                Self::load_from_path(&path)?
            } else {
                Self::default()
            }
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT environment value: {port}"))?;
        }

        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be non-zero");
        }

        for origin in &self.server.cors_allowed_origins {
            if origin != "*" && origin.parse::<HeaderValue>().is_err() {
                bail!("Invalid CORS origin: {origin}");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_seeded_deployment() {
        let config = Config::default();
        assert_eq!(config.server.port, 1234);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.server.cors_allowed_origins.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_missing_sections() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.general.log_level, "info");
        assert!(!config.server.cors_allowed_origins.is_empty());
    }

    #[test]
    fn test_validate_rejects_malformed_origin() {
        let mut config = Config::default();
        config
            .server
            .cors_allowed_origins
            .push("not an origin\u{7f}".to_string());
        assert!(config.validate().is_err());
    }
}
