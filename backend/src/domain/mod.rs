//! Domain layer: record model, birthday recurrence and ranking, reminder
//! rendering, and the services that tie them to a store.

pub mod birthday_service;
pub mod clock;
pub mod commands;
pub mod models;
pub mod notification;
pub mod notifier;
pub mod recurrence;
pub mod reminder_service;
pub mod upcoming;

pub use birthday_service::BirthdayService;
pub use clock::ReferenceClock;
pub use models::{Birthday, BirthdayError};
pub use notifier::{LogNotifier, Notifier};
pub use reminder_service::{ReminderReport, ReminderService};
pub use upcoming::{BatchCheck, UpcomingBatch, UpcomingEntry};
