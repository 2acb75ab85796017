//! backend/src/domain/models/birthday.rs

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Domain model representing a tracked person's birthday.
///
/// `date_of_birth` is kept as its canonical `YYYY-MM-DD` text so that a record
/// written straight into a backing file can still be loaded even if the date
/// is malformed; the recurrence engine parses it and skips what it cannot read.
/// A missing, null or non-text date loads as an empty string for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "stored_date_text")]
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Birthday {
    /// Generate a fresh unique ID for a birthday record
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Name used in messages: the name, with the nickname in parentheses when present
    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nickname) => format!("{} ({})", self.name, nickname),
            None => self.name.clone(),
        }
    }
}

fn stored_date_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StoredDate {
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match StoredDate::deserialize(deserializer)? {
        StoredDate::Text(text) => text,
        StoredDate::Other(_) => String::new(),
    })
}

/// Errors surfaced by the record store and the services built on it
#[derive(Debug, thiserror::Error)]
pub enum BirthdayError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl BirthdayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound(format!("Birthday with id {} not found", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Birthday {
        Birthday {
            id: "b-1".to_string(),
            name: "Ana".to_string(),
            nickname: None,
            email: None,
            date_of_birth: "1990-03-10".to_string(),
            phone: None,
            address: None,
            relationship: None,
            interests: None,
            gender: None,
        }
    }

    #[test]
    fn test_display_name_appends_nickname() {
        let mut birthday = sample();
        assert_eq!(birthday.display_name(), "Ana");

        birthday.nickname = Some("Annie".to_string());
        assert_eq!(birthday.display_name(), "Ana (Annie)");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(Birthday::generate_id(), Birthday::generate_id());
    }

    #[test]
    fn test_unreadable_stored_date_loads_as_empty_text() {
        let records: Vec<Birthday> = serde_json::from_str(
            r#"[
  {"id": "1", "name": "Ana", "date_of_birth": "1990-03-10"},
  {"id": "2", "name": "NoDate"},
  {"id": "3", "name": "NullDate", "date_of_birth": null},
  {"id": "4", "name": "NumberDate", "date_of_birth": 19900310}
]"#,
        )
        .unwrap();

        let dates: Vec<&str> = records.iter().map(|b| b.date_of_birth.as_str()).collect();
        assert_eq!(dates, vec!["1990-03-10", "", "", ""]);
        assert_eq!(serde_json::to_value(&records[0]).unwrap()["date_of_birth"], "1990-03-10");
    }

    #[test]
    fn test_storage_error_keeps_context() {
        let err: BirthdayError = anyhow::anyhow!("disk full")
            .context("failed to write birthdays.json")
            .into();
        assert_eq!(
            err.to_string(),
            "storage failure: failed to write birthdays.json: disk full"
        );
    }
}
