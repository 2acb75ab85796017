//! Runtime configuration.
//!
//! Layered in order: built-in defaults, an optional YAML file named by
//! `BIRTHDAY_CONFIG`, then individual environment variables.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::clock::ReferenceClock;
use crate::domain::upcoming::{DEFAULT_LISTING_WINDOW_DAYS, DEFAULT_NOTIFICATION_WINDOW_DAYS};
use crate::storage::{StorageBackend, StorageConfig};

pub const CONFIG_PATH_VAR: &str = "BIRTHDAY_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage_backend: StorageBackend,
    /// Window for the reminder pass
    pub notification_days: u32,
    /// Default window for `GET /birthdays/upcoming`
    pub upcoming_days: u32,
    /// `+HH:MM` / `-HH:MM`; the host's local zone when unset
    pub reference_utc_offset: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            storage_backend: StorageBackend::default(),
            notification_days: DEFAULT_NOTIFICATION_WINDOW_DAYS,
            upcoming_days: DEFAULT_LISTING_WINDOW_DAYS,
            reference_utc_offset: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the YAML file from `BIRTHDAY_CONFIG`, then the environment
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.reference_clock()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from a variable lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?;
        }
        if let Some(data_dir) = var("DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
        if let Some(backend) = var("STORAGE_BACKEND") {
            self.storage_backend = backend.parse()?;
        }
        if let Some(days) = var("NOTIFICATION_DAYS") {
            self.notification_days = parse_days("NOTIFICATION_DAYS", &days)?;
        }
        if let Some(days) = var("UPCOMING_DAYS") {
            self.upcoming_days = parse_days("UPCOMING_DAYS", &days)?;
        }
        if let Some(offset) = var("REFERENCE_UTC_OFFSET") {
            self.reference_utc_offset = Some(offset);
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level;
        }
        Ok(())
    }

    /// Clock for the configured reference timezone
    pub fn reference_clock(&self) -> Result<ReferenceClock> {
        match self.reference_utc_offset.as_deref() {
            None => Ok(ReferenceClock::Local),
            Some(value) => ReferenceClock::parse_offset(value)
                .map(ReferenceClock::Offset)
                .ok_or_else(|| anyhow!("REFERENCE_UTC_OFFSET must look like +HH:MM or -HH:MM, got '{}'", value)),
        }
    }

    /// Window for the startup summary, which lists what the reminder pass covers
    pub fn startup_summary_days(&self) -> u32 {
        self.notification_days
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            backend: self.storage_backend,
            data_dir: self.data_dir.clone(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_days(key: &str, value: &str) -> Result<u32> {
    value
        .parse()
        .with_context(|| format!("{} must be a non-negative number of days, got '{}'", key, value))
}
