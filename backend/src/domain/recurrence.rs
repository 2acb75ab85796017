//! Recurrence rules for annual birthdays.
//!
//! A birthday recurs once a year on its month/day. The only irregular case is
//! a February 29 birth date: in years without that day the anniversary is
//! observed on February 28. Every function here is a pure function of its
//! arguments; callers decide what "today" is (see [`crate::domain::clock`]).

use chrono::{Datelike, NaiveDate};

use crate::domain::models::BirthdayError;

/// Parse a canonical `YYYY-MM-DD` birth date, rejecting impossible calendar dates
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, BirthdayError> {
    let value = value.trim();
    // chrono accepts unpadded fields and signed years; the stored form is
    // always four year digits and zero padded
    if !is_canonical_date_shape(value) {
        return Err(BirthdayError::validation(format!(
            "date_of_birth must be in YYYY-MM-DD format, got '{}'",
            value
        )));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        BirthdayError::validation(format!(
            "date_of_birth '{}' is not a valid calendar date",
            value
        ))
    })
}

fn is_canonical_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// The date on which a birthday is observed in `year`.
///
/// Feb 29 falls back to Feb 28 outside leap years. Returns `None` only when
/// `year` lies outside the supported calendar range.
pub fn anniversary_in(date_of_birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    let (month, day) = (date_of_birth.month(), date_of_birth.day());
    if month == 2 && day == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// The first observed anniversary on or after `today`
pub fn next_occurrence(date_of_birth: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let candidate = anniversary_in(date_of_birth, today.year())?;
    if candidate >= today {
        return Some(candidate);
    }
    anniversary_in(date_of_birth, today.year().checked_add(1)?)
}

/// Whole days from `today` until the next anniversary, always in `0..=365`
pub fn days_until_next(date_of_birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    let next = next_occurrence(date_of_birth, today)?;
    u32::try_from((next - today).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date_of_birth() {
        assert_eq!(parse_date_of_birth("1990-03-10").unwrap(), date("1990-03-10"));
        assert_eq!(parse_date_of_birth("2000-02-29").unwrap(), date("2000-02-29"));

        assert!(parse_date_of_birth("1999-02-29").is_err());
        assert!(parse_date_of_birth("2015-04-31").is_err());
        assert!(parse_date_of_birth("2015-6-15").is_err());
        assert!(parse_date_of_birth("2015/06/15").is_err());
        assert!(parse_date_of_birth("").is_err());
        assert!(parse_date_of_birth("-990-03-10").is_err());
        assert!(parse_date_of_birth("+990-03-10").is_err());
        assert!(parse_date_of_birth("1990-03-1x").is_err());
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_birthday_today_is_zero_days_away() {
        assert_eq!(days_until_next(date("1990-03-10"), date("2024-03-10")), Some(0));
    }

    #[test]
    fn test_birthday_later_this_year() {
        assert_eq!(days_until_next(date("1985-03-11"), date("2024-03-10")), Some(1));
        assert_eq!(days_until_next(date("1985-12-25"), date("2023-12-01")), Some(24));
    }

    #[test]
    fn test_birthday_already_passed_rolls_to_next_year() {
        // 2023-03-11 -> 2024-03-10 crosses Feb 29 2024
        assert_eq!(days_until_next(date("1990-03-10"), date("2023-03-11")), Some(365));
        assert_eq!(days_until_next(date("1990-01-01"), date("2023-12-31")), Some(1));
        assert_eq!(
            next_occurrence(date("1990-01-01"), date("2023-12-31")),
            Some(date("2024-01-01"))
        );
    }

    #[test]
    fn test_leap_day_birthday_falls_back_to_feb_28() {
        assert_eq!(anniversary_in(date("2000-02-29"), 2023), Some(date("2023-02-28")));
        assert_eq!(anniversary_in(date("2000-02-29"), 2024), Some(date("2024-02-29")));
        assert_eq!(anniversary_in(date("2000-02-29"), 2100), Some(date("2100-02-28")));

        assert_eq!(days_until_next(date("2000-02-29"), date("2023-02-28")), Some(0));
        assert_eq!(days_until_next(date("2000-02-29"), date("2024-02-28")), Some(1));
        assert_eq!(days_until_next(date("2000-02-29"), date("2024-02-29")), Some(0));
    }

    #[test]
    fn test_leap_day_birthday_after_fallback_date_waits_for_next_year() {
        // Observed on 2023-02-28, so on Mar 1 the next one is 2024-02-29
        assert_eq!(days_until_next(date("1996-02-29"), date("2023-03-01")), Some(365));
        assert_eq!(
            next_occurrence(date("1996-02-29"), date("2023-03-01")),
            Some(date("2024-02-29"))
        );
        // From Mar 1 2024 the next one is observed on 2025-02-28
        assert_eq!(days_until_next(date("1996-02-29"), date("2024-03-01")), Some(364));
    }

    #[test]
    fn test_days_until_is_bounded_and_zero_only_on_anniversary() {
        let births = ["1990-01-01", "1985-03-11", "2000-02-29", "1970-12-31", "2001-02-28", "1999-07-04"];
        let mut today = date("2022-01-01");
        let end = date("2026-01-01");

        while today < end {
            for birth in births {
                let birth = date(birth);
                let days = days_until_next(birth, today).unwrap();
                assert!(days <= 365, "{} from {} gave {}", birth, today, days);

                let observed = anniversary_in(birth, today.year()).unwrap();
                assert_eq!(days == 0, observed == today, "{} on {}", birth, today);
            }
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_days_until_is_periodic_by_year() {
        let births = ["1990-06-15", "1985-11-30", "1970-01-02"];
        for birth in births {
            let birth = date(birth);
            for today in ["2021-01-01", "2021-05-20", "2022-03-03"] {
                let today = date(today);
                // Neither span crosses a Feb 29
                let next_year = today.with_year(today.year() + 1).unwrap();
                assert_eq!(days_until_next(birth, today), days_until_next(birth, next_year));
            }
        }
    }
}
