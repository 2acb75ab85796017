//! Backend selection: turns a [`StorageConfig`] into a shared store handle.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::csv::CsvBirthdayRepository;
use super::json::JsonBirthdayRepository;
use super::sqlite::{DbConnection, SqliteBirthdayRepository};
use super::traits::BirthdayStorage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Json,
    Csv,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "csv" => Ok(StorageBackend::Csv),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => bail!("unknown storage backend '{}' (expected json, csv or sqlite)", other),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageBackend::Json => "json",
            StorageBackend::Csv => "csv",
            StorageBackend::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

/// Where and how records are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

/// Open the configured backend
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn BirthdayStorage>> {
    let storage: Arc<dyn BirthdayStorage> = match config.backend {
        StorageBackend::Json => Arc::new(JsonBirthdayRepository::open(&config.data_dir)?),
        StorageBackend::Csv => Arc::new(CsvBirthdayRepository::open(&config.data_dir)?),
        StorageBackend::Sqlite => {
            let db = DbConnection::open(&config.data_dir).await?;
            Arc::new(SqliteBirthdayRepository::new(db))
        }
    };

    info!(
        "Opened {} storage in {}",
        storage.backend_name(),
        config.data_dir.display()
    );
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("json".parse::<StorageBackend>().unwrap(), StorageBackend::Json);
        assert_eq!(" CSV ".parse::<StorageBackend>().unwrap(), StorageBackend::Csv);
        assert_eq!("sqlite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert!("mongodb".parse::<StorageBackend>().is_err());
        assert_eq!(StorageBackend::default(), StorageBackend::Json);
        assert_eq!(StorageBackend::Sqlite.to_string(), "sqlite");
    }

    #[tokio::test]
    async fn test_open_storage_selects_backend() {
        for backend in [StorageBackend::Json, StorageBackend::Csv, StorageBackend::Sqlite] {
            let temp_dir = TempDir::new().unwrap();
            let config = StorageConfig {
                backend,
                data_dir: temp_dir.path().join("data"),
            };

            let storage = open_storage(&config).await.unwrap();
            assert_eq!(storage.backend_name(), backend.to_string());
            assert_eq!(storage.count().await.unwrap(), 0);
        }
    }
}
