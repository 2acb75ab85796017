//! # CSV Storage Module
//!
//! File-based storage using a single CSV file with a header row:
//!
//! ```csv
//! id,name,nickname,email,date_of_birth,phone,address,relationship,interests,gender
//! 5f0c...,Ana,Annie,,1990-03-10,,,Sister,"Climbing, jazz",
//! ```
//!
//! Empty cells are absent optional fields.

pub mod birthday_repository;

pub use birthday_repository::{CsvBirthdayRepository, CSV_FILE_NAME};
