//! Application configuration.
//!
//! Sources, later ones winning: built-in defaults, the TOML file at
//! `$CONFIG_PATH` (default `config.toml`, optional), then environment
//! variables (`DBTYPE`, `LOGLEVEL`, `LOGFORMAT`, `SERVER_HOST`, `SERVER_PORT`,
//! `TOKIO_WORKER_THREADS`).

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

/// Store backend selector; `memory` is the only implemented backend.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for StorageConfig {
    fn default() -> Self { Self { backend: default_backend() } }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown log format '{other}' (expected compact or json)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: default_level(), format: LogFormat::default() } }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_backend() -> String { "memory".into() }
fn default_level() -> String { "debug".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (or defaults when it is absent), then environment overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DBTYPE") { self.storage.backend = v; }
        if let Some(v) = lookup("LOGLEVEL") { self.logging.level = v; }
        if let Some(v) = lookup("LOGFORMAT") { self.logging.format = v.parse()?; }
        if let Some(v) = lookup("SERVER_HOST") { self.server.host = v; }
        if let Some(v) = lookup("SERVER_PORT") {
            self.server.port = v.parse().map_err(|e| anyhow!("SERVER_PORT '{v}': {e}"))?;
        }
        if let Some(v) = lookup("TOKIO_WORKER_THREADS") {
            self.server.worker_threads = Some(v.parse().map_err(|e| anyhow!("TOKIO_WORKER_THREADS '{v}': {e}"))?);
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.storage.backend.trim().is_empty() {
            self.storage.backend = default_backend();
        }
        if self.logging.level.trim().is_empty() {
            self.logging.level = default_level();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_yields_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.storage.backend, "memory");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        Ok(())
    }

    #[test]
    fn file_sections_are_read() -> Result<()> {
        let cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [storage]
            backend = "memory"

            [logging]
            level = "info"
            format = "json"
            "#,
        )?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        Ok(())
    }

    #[test]
    fn missing_file_is_distinguishable() {
        let err = load_from_file("/nonexistent-config-for-tests.toml").unwrap_err();
        assert!(is_missing_file(&err));
        let bad = load_from_str("[server]\nport = \"x\"").unwrap_err();
        assert!(!is_missing_file(&bad));
    }

    #[test]
    fn env_overrides_file() -> Result<()> {
        let env: HashMap<&str, &str> =
            [("DBTYPE", "postgres"), ("LOGLEVEL", "warn"), ("SERVER_PORT", "8181"), ("LOGFORMAT", "JSON")].into();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()))?;
        assert_eq!(cfg.storage.backend, "postgres");
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.server.port, 8181);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn bad_env_values_are_errors() {
        let mut cfg = AppConfig::default();
        assert!(cfg.apply_env(|k| (k == "SERVER_PORT").then(|| "http".to_string())).is_err());
        assert!(cfg.apply_env(|k| (k == "LOGFORMAT").then(|| "xml".to_string())).is_err());
    }

    #[test]
    fn normalize_fills_blanks_and_rejects_port_zero() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = " ".into();
        cfg.server.worker_threads = Some(0);
        cfg.storage.backend = "".into();
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.storage.backend, "memory");

        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }
}
