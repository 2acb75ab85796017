pub mod birthday;

pub use birthday::{Birthday, BirthdayError};
