//! Windowed ranking of upcoming birthdays.
//!
//! Takes a snapshot of records from any store and answers "whose birthday is
//! coming up within `W` days of today", closest first. Records whose stored
//! date cannot be read are left out and counted instead of failing the batch.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::models::Birthday;
use crate::domain::recurrence::{next_occurrence, parse_date_of_birth};

/// Default window for the upcoming birthdays listing
pub const DEFAULT_LISTING_WINDOW_DAYS: u32 = 30;

/// Default window for proactive reminders
pub const DEFAULT_NOTIFICATION_WINDOW_DAYS: u32 = 14;

/// A record together with its next occurrence, recomputed on every query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEntry {
    pub birthday: Birthday,
    pub days_until: u32,
    pub occurs_on: NaiveDate,
}

/// Ranked entries plus the number of records that could not be evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpcomingBatch {
    pub entries: Vec<UpcomingEntry>,
    pub skipped: usize,
}

impl UpcomingBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Outcome of a batch check. Having nothing upcoming is a normal result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCheck {
    NoneUpcoming { skipped: usize },
    Upcoming(UpcomingBatch),
}

impl BatchCheck {
    pub fn skipped(&self) -> usize {
        match self {
            BatchCheck::NoneUpcoming { skipped } => *skipped,
            BatchCheck::Upcoming(batch) => batch.skipped,
        }
    }
}

/// Select every record whose next birthday is within `0..=window` days of
/// `today`, sorted by days until, then name, then id.
pub fn rank_upcoming<I>(birthdays: I, today: NaiveDate, window: u32) -> UpcomingBatch
where
    I: IntoIterator<Item = Birthday>,
{
    let mut batch = UpcomingBatch::default();

    for birthday in birthdays {
        let next = parse_date_of_birth(&birthday.date_of_birth)
            .ok()
            .and_then(|date_of_birth| next_occurrence(date_of_birth, today));

        let Some(occurs_on) = next else {
            warn!(
                "Skipping birthday {} ({}): unreadable date_of_birth '{}'",
                birthday.id, birthday.name, birthday.date_of_birth
            );
            batch.skipped += 1;
            continue;
        };

        let days_until = (occurs_on - today).num_days();
        if days_until <= i64::from(window) {
            batch.entries.push(UpcomingEntry {
                birthday,
                days_until: days_until as u32,
                occurs_on,
            });
        }
    }

    batch.entries.sort_by(compare_entries);
    batch
}

/// Rank the snapshot and report whether anything is coming up
pub fn check_upcoming<I>(birthdays: I, today: NaiveDate, window: u32) -> BatchCheck
where
    I: IntoIterator<Item = Birthday>,
{
    let batch = rank_upcoming(birthdays, today, window);
    if batch.is_empty() {
        BatchCheck::NoneUpcoming {
            skipped: batch.skipped,
        }
    } else {
        BatchCheck::Upcoming(batch)
    }
}

fn compare_entries(a: &UpcomingEntry, b: &UpcomingEntry) -> Ordering {
    a.days_until
        .cmp(&b.days_until)
        .then_with(|| a.birthday.name.cmp(&b.birthday.name))
        .then_with(|| a.birthday.id.cmp(&b.birthday.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birthday(id: &str, name: &str, date_of_birth: &str) -> Birthday {
        Birthday {
            id: id.to_string(),
            name: name.to_string(),
            nickname: None,
            email: None,
            date_of_birth: date_of_birth.to_string(),
            phone: None,
            address: None,
            relationship: None,
            interests: None,
            gender: None,
        }
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn ranked(batch: &UpcomingBatch) -> Vec<(&str, u32)> {
        batch
            .entries
            .iter()
            .map(|e| (e.birthday.name.as_str(), e.days_until))
            .collect()
    }

    #[test]
    fn test_ranks_closest_first() {
        let records = vec![
            birthday("2", "Bo", "1985-03-11"),
            birthday("1", "Ana", "1990-03-10"),
        ];
        let batch = rank_upcoming(records, date("2024-03-10"), 30);

        assert_eq!(ranked(&batch), vec![("Ana", 0), ("Bo", 1)]);
        assert_eq!(batch.entries[1].occurs_on, date("2024-03-11"));
        assert_eq!(batch.skipped, 0);
    }

    #[test]
    fn test_window_is_inclusive() {
        let records = vec![
            birthday("1", "Edge", "1990-03-24"),
            birthday("2", "Outside", "1990-03-25"),
            birthday("3", "Passed", "1990-03-09"),
        ];
        let batch = rank_upcoming(records, date("2024-03-10"), 14);
        assert_eq!(ranked(&batch), vec![("Edge", 14)]);
    }

    #[test]
    fn test_zero_window_keeps_only_today() {
        let records = vec![
            birthday("1", "Leap", "2000-02-29"),
            birthday("2", "Tomorrow", "1990-03-01"),
        ];
        let batch = rank_upcoming(records, date("2023-02-28"), 0);
        assert_eq!(ranked(&batch), vec![("Leap", 0)]);
        assert_eq!(batch.entries[0].occurs_on, date("2023-02-28"));
    }

    #[test]
    fn test_ties_broken_by_name_then_id() {
        let records = vec![
            birthday("c", "Zed", "1990-04-01"),
            birthday("b", "Amy", "1991-04-01"),
            birthday("a", "Amy", "1992-04-01"),
        ];
        let batch = rank_upcoming(records, date("2024-03-30"), 30);
        let ids: Vec<&str> = batch.entries.iter().map(|e| e.birthday.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_window_crosses_year_boundary() {
        let records = vec![
            birthday("1", "January", "1980-01-05"),
            birthday("2", "December", "1980-12-30"),
        ];
        let batch = rank_upcoming(records, date("2023-12-28"), 10);
        assert_eq!(ranked(&batch), vec![("December", 2), ("January", 8)]);
        assert_eq!(batch.entries[1].occurs_on, date("2024-01-05"));
    }

    #[test]
    fn test_malformed_dates_are_skipped_and_counted() {
        let records = vec![
            birthday("1", "Ana", "1990-03-10"),
            birthday("2", "Broken", "1990-02-30"),
            birthday("3", "Garbage", "not a date"),
        ];
        let batch = rank_upcoming(records, date("2024-03-10"), 30);
        assert_eq!(ranked(&batch), vec![("Ana", 0)]);
        assert_eq!(batch.skipped, 2);
    }

    #[test]
    fn test_results_sorted_and_within_window() {
        let records: Vec<Birthday> = (1..=12)
            .flat_map(|month| {
                [1, 15, 28].map(|day| {
                    let dob = format!("1990-{:02}-{:02}", month, day);
                    birthday(&dob, &dob, &dob)
                })
            })
            .collect();

        for window in [0, 7, 30, 200, 365] {
            let batch = rank_upcoming(records.clone(), date("2024-06-15"), window);
            assert!(batch.entries.iter().all(|e| e.days_until <= window));
            assert!(batch
                .entries
                .windows(2)
                .all(|pair| pair[0].days_until <= pair[1].days_until));
        }

        let everything = rank_upcoming(records.clone(), date("2024-06-15"), 365);
        assert_eq!(everything.len(), records.len());
    }

    #[test]
    fn test_check_upcoming_distinguishes_nothing_upcoming() {
        let records = vec![
            birthday("1", "Later", "1990-09-01"),
            birthday("2", "Broken", "1990-13-01"),
        ];
        let check = check_upcoming(records.clone(), date("2024-03-10"), 14);
        assert_eq!(check, BatchCheck::NoneUpcoming { skipped: 1 });

        let check = check_upcoming(records, date("2024-08-25"), 14);
        match check {
            BatchCheck::Upcoming(batch) => {
                assert_eq!(ranked(&batch), vec![("Later", 7)]);
                assert_eq!(batch.skipped, 1);
            }
            other => panic!("expected upcoming birthdays, got {:?}", other),
        }
    }
}
