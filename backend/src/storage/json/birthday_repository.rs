use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::Birthday;
use crate::storage::atomic::write_atomically;
use crate::storage::traits::{sort_birthdays, BirthdayStorage, StorageResult};

pub const JSON_FILE_NAME: &str = "birthdays.json";

/// JSON-file birthday repository.
///
/// The whole record set lives in memory; every mutation rewrites the file
/// while the write guard is held.
pub struct JsonBirthdayRepository {
    file_path: PathBuf,
    records: RwLock<HashMap<String, Birthday>>,
}

impl JsonBirthdayRepository {
    /// Open (or create) `birthdays.json` inside `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        let file_path = data_dir.join(JSON_FILE_NAME);

        if !file_path.exists() {
            write_atomically(&file_path, b"[]")?;
            info!("Created empty birthday file: {}", file_path.display());
        }

        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("failed to read {}", file_path.display()))?;
        let birthdays: Vec<Birthday> = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", file_path.display()))?
        };

        debug!("Loaded {} birthdays from {}", birthdays.len(), file_path.display());

        let records = birthdays
            .into_iter()
            .map(|birthday| (birthday.id.clone(), birthday))
            .collect();

        Ok(Self {
            file_path,
            records: RwLock::new(records),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn sorted(records: &HashMap<String, Birthday>) -> Vec<Birthday> {
        let mut birthdays: Vec<Birthday> = records.values().cloned().collect();
        sort_birthdays(&mut birthdays);
        birthdays
    }

    fn persist(&self, records: &HashMap<String, Birthday>) -> Result<()> {
        let content = serde_json::to_string_pretty(&Self::sorted(records))
            .context("failed to encode birthdays as JSON")?;
        write_atomically(&self.file_path, content.as_bytes())?;
        debug!("Persisted {} birthdays to {}", records.len(), self.file_path.display());
        Ok(())
    }
}

#[async_trait]
impl BirthdayStorage for JsonBirthdayRepository {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn get_all(&self) -> StorageResult<Vec<Birthday>> {
        let records = self.records.read().await;
        Ok(Self::sorted(&records))
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Birthday>> {
        let records = self.records.read().await;
        Ok(records.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Birthday>> {
        let records = self.records.read().await;
        Ok(Self::sorted(&records)
            .into_iter()
            .find(|birthday| birthday.email.as_deref() == Some(email)))
    }

    async fn create(&self, command: CreateBirthdayCommand) -> StorageResult<Birthday> {
        let birthday = command.into_birthday(Birthday::generate_id())?;

        let mut records = self.records.write().await;
        records.insert(birthday.id.clone(), birthday.clone());
        if let Err(e) = self.persist(&records) {
            records.remove(&birthday.id);
            return Err(e.into());
        }

        Ok(birthday)
    }

    async fn update(&self, id: &str, command: UpdateBirthdayCommand) -> StorageResult<Option<Birthday>> {
        let mut records = self.records.write().await;
        let Some(existing) = records.get(id).cloned() else {
            return Ok(None);
        };

        let mut updated = existing.clone();
        command.apply_to(&mut updated)?;

        records.insert(id.to_string(), updated.clone());
        if let Err(e) = self.persist(&records) {
            records.insert(id.to_string(), existing);
            return Err(e.into());
        }

        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut records = self.records.write().await;
        let Some(removed) = records.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&records) {
            records.insert(id.to_string(), removed);
            return Err(e.into());
        }

        Ok(true)
    }

    async fn count(&self) -> StorageResult<usize> {
        Ok(self.records.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonBirthdayRepository::open(temp_dir.path()).unwrap();

        assert!(repo.file_path().exists());
        assert_eq!(fs::read_to_string(repo.file_path()).unwrap(), "[]");
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reopen_sees_persisted_records() {
        let temp_dir = TempDir::new().unwrap();
        let created = {
            let repo = JsonBirthdayRepository::open(temp_dir.path()).unwrap();
            repo.create(CreateBirthdayCommand::new("Ana", "1990-03-10")).await.unwrap()
        };

        let reopened = JsonBirthdayRepository::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.get_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonBirthdayRepository::open(temp_dir.path()).unwrap();
        repo.create(CreateBirthdayCommand::new("Ana", "1990-03-10")).await.unwrap();

        let content = fs::read_to_string(repo.file_path()).unwrap();
        assert!(content.starts_with("[\n"));
        assert!(content.contains("\"date_of_birth\": \"1990-03-10\""));
        // Absent optionals are not written
        assert!(!content.contains("nickname"));
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_to_open() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(JSON_FILE_NAME), "{ not json").unwrap();

        assert!(JsonBirthdayRepository::open(temp_dir.path()).is_err());
    }
}
