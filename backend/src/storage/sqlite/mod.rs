//! # SQLite Storage Module
//!
//! Records live in the `birthdays` table of `birthdays.db`, one column per
//! field. Reads go straight to the pool; writes are serialised per repository.

pub mod birthday_repository;
pub mod db;

pub use birthday_repository::SqliteBirthdayRepository;
pub use db::{DbConnection, SQLITE_FILE_NAME};
