use serde::{Deserialize, Serialize};

/// A tracked person's birthday as exchanged over the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Birthday {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub date_of_birth: String, // ISO 8601 date format (YYYY-MM-DD)
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

/// Request for creating a new birthday entry.
///
/// `name` and `date_of_birth` are required; they are optional here so that a
/// missing field reaches domain validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBirthdayRequest {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub relationship: Option<String>,
    pub interests: Option<String>,
    pub gender: Option<String>,
}

/// Request for updating an existing birthday entry. Only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBirthdayRequest {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub relationship: Option<String>,
    pub interests: Option<String>,
    pub gender: Option<String>,
}

/// Response containing every tracked birthday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthdayListResponse {
    pub birthdays: Vec<Birthday>,
}

/// A birthday falling inside the requested window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBirthday {
    pub birthday: Birthday,
    pub days_until: u32,
    /// Date of the next occurrence (YYYY-MM-DD)
    pub date: String,
}

/// Response for the upcoming birthdays listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingBirthdaysResponse {
    pub birthdays: Vec<UpcomingBirthday>,
    pub days: u32,
    /// Number of stored records left out because their date could not be read
    pub skipped: usize,
}

/// Error body returned by the REST layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birthday_omits_absent_optional_fields() {
        let birthday = Birthday {
            id: "abc".to_string(),
            name: "Ana".to_string(),
            nickname: None,
            email: None,
            date_of_birth: "1990-03-10".to_string(),
            phone: None,
            address: None,
            relationship: Some("Sister".to_string()),
            interests: None,
            gender: None,
        };

        let json = serde_json::to_value(&birthday).unwrap();
        assert_eq!(json["date_of_birth"], "1990-03-10");
        assert_eq!(json["relationship"], "Sister");
        assert!(json.get("nickname").is_none());
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_create_request_accepts_missing_fields() {
        let request: CreateBirthdayRequest =
            serde_json::from_str(r#"{"name": "Bo"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Bo"));
        assert!(request.date_of_birth.is_none());
    }
}
