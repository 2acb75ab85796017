use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::{Birthday, BirthdayError};
use crate::domain::upcoming::{rank_upcoming, UpcomingBatch};
use crate::storage::traits::BirthdayStorage;

/// Service for managing tracked birthdays
#[derive(Clone)]
pub struct BirthdayService {
    storage: Arc<dyn BirthdayStorage>,
}

impl BirthdayService {
    pub fn new(storage: Arc<dyn BirthdayStorage>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> Arc<dyn BirthdayStorage> {
        self.storage.clone()
    }

    /// List every record in store order
    pub async fn list_birthdays(&self) -> Result<Vec<Birthday>, BirthdayError> {
        info!("Listing all birthdays");
        let birthdays = self.storage.get_all().await?;
        info!("Found {} birthdays", birthdays.len());
        Ok(birthdays)
    }

    pub async fn get_birthday(&self, id: &str) -> Result<Birthday, BirthdayError> {
        info!("Getting birthday: {}", id);
        self.storage.get_by_id(id).await?.ok_or_else(|| {
            warn!("Birthday not found: {}", id);
            BirthdayError::not_found(id)
        })
    }

    /// Create a record, rejecting an email already owned by another record
    pub async fn create_birthday(&self, command: CreateBirthdayCommand) -> Result<Birthday, BirthdayError> {
        info!("Creating birthday: name={:?}", command.name);

        if let Some(email) = normalized_email(command.email.as_deref()) {
            self.ensure_email_available(email, None).await?;
        }

        let birthday = self.storage.create(command).await?;
        info!("Created birthday: {} with ID: {}", birthday.name, birthday.id);
        Ok(birthday)
    }

    /// Merge the supplied fields into an existing record
    pub async fn update_birthday(
        &self,
        id: &str,
        command: UpdateBirthdayCommand,
    ) -> Result<Birthday, BirthdayError> {
        info!("Updating birthday: {}", id);

        if let Some(email) = normalized_email(command.email.as_deref()) {
            self.ensure_email_available(email, Some(id)).await?;
        }

        let birthday = self
            .storage
            .update(id, command)
            .await?
            .ok_or_else(|| BirthdayError::not_found(id))?;

        info!("Updated birthday: {} with ID: {}", birthday.name, birthday.id);
        Ok(birthday)
    }

    pub async fn delete_birthday(&self, id: &str) -> Result<(), BirthdayError> {
        info!("Deleting birthday: {}", id);

        if !self.storage.delete(id).await? {
            warn!("Birthday not found for deletion: {}", id);
            return Err(BirthdayError::not_found(id));
        }

        info!("Deleted birthday: {}", id);
        Ok(())
    }

    /// Rank everyone whose birthday falls within `window` days of `today`
    pub async fn list_upcoming(&self, today: NaiveDate, window: u32) -> Result<UpcomingBatch, BirthdayError> {
        let birthdays = self.storage.get_all().await?;
        let batch = rank_upcoming(birthdays, today, window);
        info!(
            "Found {} upcoming birthdays within {} days of {} ({} skipped)",
            batch.len(),
            window,
            today,
            batch.skipped
        );
        Ok(batch)
    }

    pub async fn tracked_count(&self) -> Result<usize, BirthdayError> {
        self.storage.count().await
    }

    async fn ensure_email_available(&self, email: &str, owner_id: Option<&str>) -> Result<(), BirthdayError> {
        match self.storage.find_by_email(email).await? {
            Some(existing) if Some(existing.id.as_str()) != owner_id => {
                warn!("Email {} already used by birthday {}", email, existing.id);
                Err(BirthdayError::Conflict(format!(
                    "A birthday with email {} already exists",
                    email
                )))
            }
            _ => Ok(()),
        }
    }
}

fn normalized_email(email: Option<&str>) -> Option<&str> {
    email.map(str::trim).filter(|e| !e.is_empty())
}
