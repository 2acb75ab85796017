use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::models::BirthdayError;
use crate::domain::notification::{render_entry, render_startup_summary};
use crate::domain::notifier::Notifier;
use crate::domain::upcoming::{check_upcoming, rank_upcoming, BatchCheck};
use crate::storage::traits::BirthdayStorage;

/// Tally of one reminder pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderReport {
    pub upcoming: usize,
    pub delivered: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Runs a reminder pass over the stored birthdays and sends the startup summary.
/// Callers decide when a pass runs; `main` runs one at startup.
#[derive(Clone)]
pub struct ReminderService {
    storage: Arc<dyn BirthdayStorage>,
    notifier: Arc<dyn Notifier>,
}

impl ReminderService {
    pub fn new(storage: Arc<dyn BirthdayStorage>, notifier: Arc<dyn Notifier>) -> Self {
        Self { storage, notifier }
    }

    /// Send one reminder per birthday within `window` days of `today`.
    ///
    /// Failed deliveries are counted and logged; the pass always runs to the end.
    pub async fn run_check(&self, today: NaiveDate, window: u32) -> Result<ReminderReport, BirthdayError> {
        info!("Checking for birthdays within {} days of {}", window, today);
        let birthdays = self.storage.get_all().await?;

        let batch = match check_upcoming(birthdays, today, window) {
            BatchCheck::NoneUpcoming { skipped } => {
                info!("No upcoming birthdays");
                return Ok(ReminderReport {
                    skipped,
                    ..Default::default()
                });
            }
            BatchCheck::Upcoming(batch) => batch,
        };

        let mut report = ReminderReport {
            upcoming: batch.len(),
            skipped: batch.skipped,
            ..Default::default()
        };

        for entry in &batch.entries {
            let message = render_entry(entry);
            if self.notifier.send_message(&message).await {
                report.delivered += 1;
            } else {
                report.failed += 1;
                warn!(
                    "Failed to deliver reminder for {} ({})",
                    entry.birthday.name, entry.birthday.id
                );
            }
        }

        info!(
            "Reminder pass finished: {} upcoming, {} delivered, {} failed, {} skipped",
            report.upcoming, report.delivered, report.failed, report.skipped
        );
        Ok(report)
    }

    /// Send the one-off startup message. Returns whether it was delivered.
    pub async fn send_startup_summary(&self, today: NaiveDate, window: u32) -> Result<bool, BirthdayError> {
        let birthdays = self.storage.get_all().await?;
        let tracked = birthdays.len();
        let batch = rank_upcoming(birthdays, today, window);

        let message = render_startup_summary(&batch.entries, tracked);
        let delivered = self.notifier.send_message(&message).await;
        if !delivered {
            warn!("Failed to deliver startup summary");
        }
        Ok(delivered)
    }
}
