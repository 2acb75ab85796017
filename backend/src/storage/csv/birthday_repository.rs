use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::Birthday;
use crate::storage::atomic::write_atomically;
use crate::storage::traits::{sort_birthdays, BirthdayStorage, StorageResult};

pub const CSV_FILE_NAME: &str = "birthdays.csv";

const CSV_HEADER: [&str; 10] = [
    "id",
    "name",
    "nickname",
    "email",
    "date_of_birth",
    "phone",
    "address",
    "relationship",
    "interests",
    "gender",
];

/// One line of `birthdays.csv`. Empty cells are absent optionals.
#[derive(Debug, Serialize, Deserialize)]
struct CsvBirthdayRow {
    id: String,
    name: String,
    nickname: Option<String>,
    email: Option<String>,
    date_of_birth: String,
    phone: Option<String>,
    address: Option<String>,
    relationship: Option<String>,
    interests: Option<String>,
    gender: Option<String>,
}

impl From<CsvBirthdayRow> for Birthday {
    fn from(row: CsvBirthdayRow) -> Self {
        let blank_to_none = |value: Option<String>| value.filter(|v| !v.is_empty());
        Birthday {
            id: row.id,
            name: row.name,
            nickname: blank_to_none(row.nickname),
            email: blank_to_none(row.email),
            date_of_birth: row.date_of_birth,
            phone: blank_to_none(row.phone),
            address: blank_to_none(row.address),
            relationship: blank_to_none(row.relationship),
            interests: blank_to_none(row.interests),
            gender: blank_to_none(row.gender),
        }
    }
}

impl From<&Birthday> for CsvBirthdayRow {
    fn from(birthday: &Birthday) -> Self {
        CsvBirthdayRow {
            id: birthday.id.clone(),
            name: birthday.name.clone(),
            nickname: birthday.nickname.clone(),
            email: birthday.email.clone(),
            date_of_birth: birthday.date_of_birth.clone(),
            phone: birthday.phone.clone(),
            address: birthday.address.clone(),
            relationship: birthday.relationship.clone(),
            interests: birthday.interests.clone(),
            gender: birthday.gender.clone(),
        }
    }
}

/// CSV-file birthday repository.
///
/// Nothing is cached; reads parse the file each time. Writers take
/// `write_lock` for the whole read-modify-write cycle.
pub struct CsvBirthdayRepository {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvBirthdayRepository {
    /// Open (or create) `birthdays.csv` inside `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self> {
        let repo = Self {
            file_path: data_dir.join(CSV_FILE_NAME),
            write_lock: Mutex::new(()),
        };

        if !repo.file_path.exists() {
            repo.write_birthdays(&[])?;
            info!("Created empty birthday file: {}", repo.file_path.display());
        }

        Ok(repo)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn read_birthdays(&self) -> Result<Vec<Birthday>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.file_path)
            .with_context(|| format!("failed to open {}", self.file_path.display()))?;

        let mut birthdays = Vec::new();
        for (index, row) in reader.deserialize::<CsvBirthdayRow>().enumerate() {
            let row = row.with_context(|| {
                format!("malformed row {} in {}", index + 1, self.file_path.display())
            })?;
            birthdays.push(Birthday::from(row));
        }

        sort_birthdays(&mut birthdays);
        debug!("Read {} birthdays from {}", birthdays.len(), self.file_path.display());
        Ok(birthdays)
    }

    fn write_birthdays(&self, birthdays: &[Birthday]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for birthday in birthdays {
            writer.serialize(CsvBirthdayRow::from(birthday))?;
        }

        let content = writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush CSV buffer: {}", e.error()))?;
        write_atomically(&self.file_path, &content)?;
        debug!("Wrote {} birthdays to {}", birthdays.len(), self.file_path.display());
        Ok(())
    }
}

#[async_trait]
impl BirthdayStorage for CsvBirthdayRepository {
    fn backend_name(&self) -> &'static str {
        "csv"
    }

    async fn get_all(&self) -> StorageResult<Vec<Birthday>> {
        Ok(self.read_birthdays()?)
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Birthday>> {
        Ok(self.read_birthdays()?.into_iter().find(|b| b.id == id))
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Birthday>> {
        Ok(self
            .read_birthdays()?
            .into_iter()
            .find(|b| b.email.as_deref() == Some(email)))
    }

    async fn create(&self, command: CreateBirthdayCommand) -> StorageResult<Birthday> {
        let birthday = command.into_birthday(Birthday::generate_id())?;

        let _guard = self.write_lock.lock().await;
        let mut birthdays = self.read_birthdays()?;
        birthdays.push(birthday.clone());
        sort_birthdays(&mut birthdays);
        self.write_birthdays(&birthdays)?;

        Ok(birthday)
    }

    async fn update(&self, id: &str, command: UpdateBirthdayCommand) -> StorageResult<Option<Birthday>> {
        let _guard = self.write_lock.lock().await;
        let mut birthdays = self.read_birthdays()?;

        let Some(position) = birthdays.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let mut updated = birthdays[position].clone();
        command.apply_to(&mut updated)?;
        birthdays[position] = updated.clone();
        sort_birthdays(&mut birthdays);
        self.write_birthdays(&birthdays)?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut birthdays = self.read_birthdays()?;

        let before = birthdays.len();
        birthdays.retain(|b| b.id != id);
        if birthdays.len() == before {
            return Ok(false);
        }

        self.write_birthdays(&birthdays)?;
        Ok(true)
    }
}
