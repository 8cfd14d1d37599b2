use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub sync: SyncConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Local database file. Empty means: resolve once at startup (user data
    /// directory preferred, working directory fallback).
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: String::new(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Remote base URL. `VITALOG_BACKEND_URL` overrides this, read once at
    /// startup.
    pub backend_url: String,

    /// Reachability probe timeout (default: 2)
    pub health_timeout_seconds: u64,

    /// Timeout for the create calls (default: 5)
    pub request_timeout_seconds: u64,

    /// Attempt a sync right after every local mutation (default: true)
    pub after_mutation: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            health_timeout_seconds: 2,
            request_timeout_seconds: 5,
            after_mutation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    /// Server database file, independent of the client's. Empty means:
    /// resolve at startup like the client path.
    pub database_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            database_path: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            sync: SyncConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                return Ok(config);
            }
        }

        info!("No config file found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Environment-level override for the remote base URL, read once.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("VITALOG_BACKEND_URL")
            && !url.is_empty()
        {
            self.sync.backend_url = url;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("vitalog").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".vitalog").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sync.backend_url.is_empty() {
            anyhow::bail!("Sync backend URL cannot be empty");
        }

        if self.sync.health_timeout_seconds == 0 || self.sync.request_timeout_seconds == 0 {
            anyhow::bail!("Sync timeouts must be > 0");
        }

        Ok(())
    }

    /// The client database URL, resolving the path once when unset.
    #[must_use]
    pub fn database_url(&self) -> String {
        if self.general.database_path.is_empty() {
            format!("sqlite:{}", crate::db::default_database_path().display())
        } else {
            format!("sqlite:{}", self.general.database_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sync.backend_url, "http://127.0.0.1:5000");
        assert_eq!(config.sync.health_timeout_seconds, 2);
        assert_eq!(config.sync.request_timeout_seconds, 5);
        assert!(config.sync.after_mutation);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[sync]"));
        assert!(toml_str.contains("[server]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [sync]
            backend_url = "http://backend.local:8080"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.sync.backend_url, "http://backend.local:8080");

        assert_eq!(config.sync.request_timeout_seconds, 5);
        assert_eq!(config.server.port, 5000);
    }
}
