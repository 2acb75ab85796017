//! Reference clock deciding what "today" means for the recurrence engine.

use chrono::{FixedOffset, Local, NaiveDate, Utc};

/// Source of the current calendar date in the single reference timezone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceClock {
    /// The host's local timezone
    #[default]
    Local,
    /// A fixed UTC offset, e.g. `-07:00`
    Offset(FixedOffset),
    /// Always the given date
    Pinned(NaiveDate),
}

impl ReferenceClock {
    /// Today's date, truncated to day granularity
    pub fn today(&self) -> NaiveDate {
        match self {
            ReferenceClock::Local => Local::now().date_naive(),
            ReferenceClock::Offset(offset) => Utc::now().with_timezone(offset).date_naive(),
            ReferenceClock::Pinned(date) => *date,
        }
    }

    /// Parse a `+HH:MM` / `-HH:MM` UTC offset
    pub fn parse_offset(value: &str) -> Option<FixedOffset> {
        let value = value.trim();
        let (sign, rest) = match value.chars().next()? {
            '+' => (1, &value[1..]),
            '-' => (-1, &value[1..]),
            _ => return None,
        };
        let (hours, minutes) = rest.split_once(':')?;
        let is_two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !is_two_digits(hours) || !is_two_digits(minutes) {
            return None;
        }
        let hours: i32 = hours.parse().ok()?;
        let minutes: i32 = minutes.parse().ok()?;
        if hours > 23 || minutes > 59 {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
    }
}
