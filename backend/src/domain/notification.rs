//! Reminder message rendering.
//!
//! Pure functions turning a ranked entry into the text handed to a
//! [`Notifier`](crate::domain::notifier::Notifier). Tone depends on how close
//! the birthday is.

use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use crate::domain::models::Birthday;
use crate::domain::upcoming::UpcomingEntry;

/// Maximum number of upcoming birthdays listed in the startup summary
pub const STARTUP_SUMMARY_LIMIT: usize = 5;

/// How close a birthday is, which decides the tone of its reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Today,
    Tomorrow,
    ThisWeek,
    Reminder,
}

impl NotificationCategory {
    pub fn from_days_until(days_until: u32) -> Self {
        match days_until {
            0 => NotificationCategory::Today,
            1 => NotificationCategory::Tomorrow,
            2..=7 => NotificationCategory::ThisWeek,
            _ => NotificationCategory::Reminder,
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            NotificationCategory::Today => "🎂 BIRTHDAY TODAY! 🎂",
            NotificationCategory::Tomorrow => "🎂 Birthday Tomorrow!",
            NotificationCategory::ThisWeek => "🎂 Birthday Coming Up!",
            NotificationCategory::Reminder => "🎂 Birthday Reminder!",
        }
    }

    fn closing(&self) -> &'static str {
        match self {
            NotificationCategory::Today => "Reach out and make their day special! 🎉🎊",
            NotificationCategory::Tomorrow | NotificationCategory::ThisWeek => {
                "Plenty of time to plan something special! 🎉"
            }
            NotificationCategory::Reminder => "Don't forget to wish them a happy birthday! 🎉",
        }
    }
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long month/day form, e.g. `March 10th`
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{} {}{}", date.format("%B"), date.day(), ordinal_suffix(date.day()))
}

/// Short month/day form, e.g. `Mar 10th`
pub fn format_short_month_day(date: NaiveDate) -> String {
    format!("{} {}{}", date.format("%b"), date.day(), ordinal_suffix(date.day()))
}

/// Render the reminder for one upcoming birthday.
///
/// `occurs_on` is the resolved date of the next occurrence (Feb 28 for a leap
/// day birthday in a common year).
pub fn render_notification(birthday: &Birthday, days_until: u32, occurs_on: NaiveDate) -> String {
    let category = NotificationCategory::from_days_until(days_until);
    let name = birthday.display_name();
    let month_day = format_month_day(occurs_on);

    let mut message = String::new();
    message.push_str(category.headline());
    message.push_str("\n\n");

    let summary = match category {
        NotificationCategory::Today => format!("It's {}'s birthday TODAY!", name),
        NotificationCategory::Tomorrow => {
            format!("{}'s birthday is TOMORROW ({})!", name, month_day)
        }
        NotificationCategory::ThisWeek => format!(
            "{}'s birthday is this {} ({}) - in {} days",
            name,
            occurs_on.format("%A"),
            month_day,
            days_until
        ),
        NotificationCategory::Reminder => format!(
            "{}'s birthday is coming up on {} (in {} days)",
            name, month_day, days_until
        ),
    };
    message.push_str(&summary);
    message.push_str("\n\n");

    if let Some(relationship) = &birthday.relationship {
        let _ = writeln!(message, "Relationship: {}", relationship);
    }
    if let Some(interests) = &birthday.interests {
        let _ = writeln!(message, "Interests: {}", interests);
    }

    message.push('\n');
    message.push_str(category.closing());
    message
}

/// Render the reminder for a ranked entry
pub fn render_entry(entry: &UpcomingEntry) -> String {
    render_notification(&entry.birthday, entry.days_until, entry.occurs_on)
}

/// Render the message sent once when the service starts
pub fn render_startup_summary(entries: &[UpcomingEntry], tracked_count: usize) -> String {
    let mut message = String::from(
        "🎂 Birthday Tracker\n\n✅ Service started successfully\n🚀 Ready to track birthdays",
    );

    if tracked_count > 0 {
        let noun = if tracked_count == 1 { "person" } else { "people" };
        let _ = write!(message, "\n👥 Tracking {} {}", tracked_count, noun);
    }

    message.push_str("\n\nI'll notify you about upcoming birthdays every day! 🎉");

    if entries.is_empty() {
        return message;
    }

    message.push_str("\n\n📅 Upcoming Birthdays:\n");
    for entry in entries.iter().take(STARTUP_SUMMARY_LIMIT) {
        let name = entry.birthday.display_name();
        let date = format_short_month_day(entry.occurs_on);
        let _ = match entry.days_until {
            0 => write!(message, "\n🎉 {} - TODAY! {}", name, date),
            1 => write!(message, "\n⭐ {} - Tomorrow {}", name, date),
            days => write!(message, "\n• {} - {} (in {} days)", name, date, days),
        };
    }

    if entries.len() > STARTUP_SUMMARY_LIMIT {
        let _ = write!(
            message,
            "\n\n...and {} more",
            entries.len() - STARTUP_SUMMARY_LIMIT
        );
    }

    message
}
