//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different storage
//! backends to be used interchangeably by the domain layer.

use async_trait::async_trait;

use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::{Birthday, BirthdayError};

pub type StorageResult<T> = Result<T, BirthdayError>;

/// Trait defining the interface for birthday record storage
///
/// Every implementation behaves identically: `get_all` is ordered by name
/// with ties broken by id, mutations are durable before they return, and
/// concurrent mutations on one instance are serialised.
#[async_trait]
pub trait BirthdayStorage: Send + Sync {
    /// Short name of the backend, used in logs
    fn backend_name(&self) -> &'static str;

    /// List all records ordered by name, then id
    async fn get_all(&self) -> StorageResult<Vec<Birthday>>;

    /// Retrieve a specific record by ID
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<Birthday>>;

    /// Find the record owning an email address
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Birthday>>;

    /// Validate and store a new record under a freshly generated ID
    async fn create(&self, command: CreateBirthdayCommand) -> StorageResult<Birthday>;

    /// Merge the supplied fields into an existing record.
    /// Returns `None` if no record has this ID.
    async fn update(&self, id: &str, command: UpdateBirthdayCommand) -> StorageResult<Option<Birthday>>;

    /// Delete a record. Returns true if it existed.
    async fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Number of stored records
    async fn count(&self) -> StorageResult<usize> {
        Ok(self.get_all().await?.len())
    }
}

/// Sort records into the canonical store order
pub fn sort_birthdays(birthdays: &mut [Birthday]) {
    birthdays.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}
