use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use tokio::sync::Mutex;
use tracing::debug;

use super::db::DbConnection;
use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::Birthday;
use crate::storage::traits::{BirthdayStorage, StorageResult};

const SELECT_COLUMNS: &str = "SELECT id, name, nickname, email, date_of_birth, phone, address, \
                              relationship, interests, gender FROM birthdays";

/// SQLite-backed birthday repository
pub struct SqliteBirthdayRepository {
    db: DbConnection,
    write_lock: Mutex<()>,
}

impl SqliteBirthdayRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            db,
            write_lock: Mutex::new(()),
        }
    }

    fn row_to_birthday(row: &SqliteRow) -> Result<Birthday> {
        Ok(Birthday {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            nickname: row.try_get("nickname")?,
            email: row.try_get("email")?,
            date_of_birth: row.try_get("date_of_birth")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            relationship: row.try_get("relationship")?,
            interests: row.try_get("interests")?,
            gender: row.try_get("gender")?,
        })
    }

    async fn fetch_in_tx(tx: &mut Transaction<'_, Sqlite>, id: &str) -> Result<Option<Birthday>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .context("failed to load birthday")?;
        row.as_ref().map(Self::row_to_birthday).transpose()
    }

    async fn insert(&self, birthday: &Birthday) -> Result<()> {
        sqlx::query(
            "INSERT INTO birthdays (id, name, nickname, email, date_of_birth, phone, address, \
             relationship, interests, gender) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&birthday.id)
        .bind(&birthday.name)
        .bind(&birthday.nickname)
        .bind(&birthday.email)
        .bind(&birthday.date_of_birth)
        .bind(&birthday.phone)
        .bind(&birthday.address)
        .bind(&birthday.relationship)
        .bind(&birthday.interests)
        .bind(&birthday.gender)
        .execute(self.db.pool())
        .await
        .context("failed to insert birthday")?;
        Ok(())
    }

    async fn update_in_tx(&self, id: &str, command: UpdateBirthdayCommand) -> StorageResult<Option<Birthday>> {
        let mut tx = self.db.pool().begin().await.context("failed to begin transaction")?;

        let Some(mut birthday) = Self::fetch_in_tx(&mut tx, id).await? else {
            return Ok(None);
        };
        command.apply_to(&mut birthday)?;

        sqlx::query(
            "UPDATE birthdays SET name = ?, nickname = ?, email = ?, date_of_birth = ?, phone = ?, \
             address = ?, relationship = ?, interests = ?, gender = ? WHERE id = ?",
        )
        .bind(&birthday.name)
        .bind(&birthday.nickname)
        .bind(&birthday.email)
        .bind(&birthday.date_of_birth)
        .bind(&birthday.phone)
        .bind(&birthday.address)
        .bind(&birthday.relationship)
        .bind(&birthday.interests)
        .bind(&birthday.gender)
        .bind(id)
        .execute(&mut *tx)
        .await
        .context("failed to update birthday")?;

        tx.commit().await.context("failed to commit update")?;
        Ok(Some(birthday))
    }
}

#[async_trait]
impl BirthdayStorage for SqliteBirthdayRepository {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn get_all(&self) -> StorageResult<Vec<Birthday>> {
        let rows = sqlx::query(&format!("{} ORDER BY name, id", SELECT_COLUMNS))
            .fetch_all(self.db.pool())
            .await
            .context("failed to list birthdays")?;

        let birthdays = rows
            .iter()
            .map(Self::row_to_birthday)
            .collect::<Result<Vec<_>>>()?;
        debug!("Fetched {} birthdays from SQLite", birthdays.len());
        Ok(birthdays)
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Birthday>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .context("failed to load birthday")?;
        Ok(row.as_ref().map(Self::row_to_birthday).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Birthday>> {
        let row = sqlx::query(&format!(
            "{} WHERE email = ? ORDER BY name, id LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.db.pool())
        .await
        .context("failed to look up birthday by email")?;
        Ok(row.as_ref().map(Self::row_to_birthday).transpose()?)
    }

    async fn create(&self, command: CreateBirthdayCommand) -> StorageResult<Birthday> {
        let birthday = command.into_birthday(Birthday::generate_id())?;

        let _guard = self.write_lock.lock().await;
        self.insert(&birthday).await?;

        Ok(birthday)
    }

    async fn update(&self, id: &str, command: UpdateBirthdayCommand) -> StorageResult<Option<Birthday>> {
        let _guard = self.write_lock.lock().await;
        self.update_in_tx(id, command).await
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let _guard = self.write_lock.lock().await;
        let result = sqlx::query("DELETE FROM birthdays WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await
            .context("failed to delete birthday")?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StorageResult<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM birthdays")
            .fetch_one(self.db.pool())
            .await
            .context("failed to count birthdays")?;
        let total: i64 = row.try_get("total").context("failed to read count")?;
        Ok(total as usize)
    }
}
