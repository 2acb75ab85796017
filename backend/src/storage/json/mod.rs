//! # JSON Storage Module
//!
//! Stores every record in a single pretty-printed array:
//!
//! ```json
//! [
//!   {
//!     "id": "5f0c...",
//!     "name": "Ana",
//!     "date_of_birth": "1990-03-10"
//!   }
//! ]
//! ```

pub mod birthday_repository;

pub use birthday_repository::{JsonBirthdayRepository, JSON_FILE_NAME};
