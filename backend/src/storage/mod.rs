//! # Storage Layer
//!
//! One [`BirthdayStorage`] trait with three interchangeable implementations
//! (JSON file, CSV file, SQLite). The backend is chosen at startup through
//! [`open_storage`]; the domain layer only ever sees `Arc<dyn BirthdayStorage>`.

pub mod atomic;
pub mod connection;
pub mod csv;
pub mod json;
pub mod sqlite;
pub mod traits;


pub use connection::{open_storage, StorageBackend, StorageConfig};
pub use self::csv::CsvBirthdayRepository;
pub use self::json::JsonBirthdayRepository;
pub use self::sqlite::{DbConnection, SqliteBirthdayRepository};
pub use traits::{sort_birthdays, BirthdayStorage, StorageResult};
