// backend/src/domain/commands.rs

//! Domain-level command types
//! These structs are used by the store and the services inside the domain
//! layer and are **not** exposed over the public API. The REST layer maps the
//! DTOs defined in the `shared` crate to these types.

pub mod birthday {
    use crate::domain::models::birthday::{Birthday, BirthdayError};
    use crate::domain::recurrence::parse_date_of_birth;

    /// Input for creating a new birthday record.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct CreateBirthdayCommand {
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

    /// Partial update for an existing record. `None` leaves a field untouched;
    /// an empty string clears an optional field.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct UpdateBirthdayCommand {
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

    impl CreateBirthdayCommand {
        /// Convenience constructor for the two required fields
        pub fn new(name: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
            Self {
                name: Some(name.into()),
                date_of_birth: Some(date_of_birth.into()),
                ..Self::default()
            }
        }

        /// Validate the command and build the record it describes
        pub fn into_birthday(self, id: String) -> Result<Birthday, BirthdayError> {
            let name = validate_name(self.name.as_deref())?;
            let date_of_birth = validate_date_of_birth(self.date_of_birth.as_deref())?;

            Ok(Birthday {
                id,
                name,
                nickname: optional_text(self.nickname),
                email: optional_text(self.email),
                date_of_birth,
                phone: optional_text(self.phone),
                address: optional_text(self.address),
                relationship: optional_text(self.relationship),
                interests: optional_text(self.interests),
                gender: optional_text(self.gender),
            })
        }
    }

    impl UpdateBirthdayCommand {
        /// Validate the supplied fields and merge them into `birthday`.
        /// Nothing is changed when validation fails.
        pub fn apply_to(self, birthday: &mut Birthday) -> Result<(), BirthdayError> {
            let name = match self.name.as_deref() {
                Some(name) => Some(validate_name(Some(name))?),
                None => None,
            };
            let date_of_birth = match self.date_of_birth.as_deref() {
                Some(date) => Some(validate_date_of_birth(Some(date))?),
                None => None,
            };

            if let Some(name) = name {
                birthday.name = name;
            }
            if let Some(date_of_birth) = date_of_birth {
                birthday.date_of_birth = date_of_birth;
            }
            merge_optional(&mut birthday.nickname, self.nickname);
            merge_optional(&mut birthday.email, self.email);
            merge_optional(&mut birthday.phone, self.phone);
            merge_optional(&mut birthday.address, self.address);
            merge_optional(&mut birthday.relationship, self.relationship);
            merge_optional(&mut birthday.interests, self.interests);
            merge_optional(&mut birthday.gender, self.gender);

            Ok(())
        }
    }

    fn validate_name(name: Option<&str>) -> Result<String, BirthdayError> {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(BirthdayError::validation("Missing required field: name")),
        }
    }

    fn validate_date_of_birth(date: Option<&str>) -> Result<String, BirthdayError> {
        match date.map(str::trim) {
            Some(date) if !date.is_empty() => {
                let parsed = parse_date_of_birth(date)?;
                Ok(parsed.format("%Y-%m-%d").to_string())
            }
            _ => Err(BirthdayError::validation(
                "Missing required field: date_of_birth",
            )),
        }
    }

    fn optional_text(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn merge_optional(field: &mut Option<String>, update: Option<String>) {
        if let Some(value) = update {
            *field = optional_text(Some(value));
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn existing() -> Birthday {
            CreateBirthdayCommand {
                nickname: Some("Annie".to_string()),
                email: Some("ana@example.com".to_string()),
                relationship: Some("Sister".to_string()),
                ..CreateBirthdayCommand::new("Ana", "1990-03-10")
            }
            .into_birthday("b-1".to_string())
            .unwrap()
        }

        #[test]
        fn test_create_requires_name_and_date() {
            let missing_name = CreateBirthdayCommand {
                date_of_birth: Some("1990-03-10".to_string()),
                ..Default::default()
            };
            assert!(matches!(
                missing_name.into_birthday("x".to_string()),
                Err(BirthdayError::Validation(_))
            ));

            let blank_name = CreateBirthdayCommand::new("   ", "1990-03-10");
            assert!(blank_name.into_birthday("x".to_string()).is_err());

            let missing_date = CreateBirthdayCommand {
                name: Some("Ana".to_string()),
                ..Default::default()
            };
            assert!(missing_date.into_birthday("x".to_string()).is_err());
        }

        #[test]
        fn test_create_rejects_invalid_calendar_dates() {
            for date in [
                "2015-02-30",
                "2015-13-01",
                "2023-02-29",
                "2015-6-15",
                "15-06-2015",
                "-990-03-10",
                "+990-03-10",
                "soon",
            ] {
                let result = CreateBirthdayCommand::new("Ana", date).into_birthday("x".to_string());
                assert!(matches!(result, Err(BirthdayError::Validation(_))), "{} should be rejected", date);
            }

            let leap = CreateBirthdayCommand::new("Leap", "2000-02-29").into_birthday("x".to_string());
            assert_eq!(leap.unwrap().date_of_birth, "2000-02-29");
        }

        #[test]
        fn test_create_trims_and_drops_blank_optionals() {
            let birthday = CreateBirthdayCommand {
                nickname: Some("  ".to_string()),
                phone: Some(" 555-0100 ".to_string()),
                ..CreateBirthdayCommand::new("  Bo ", "1985-03-11")
            }
            .into_birthday("b-2".to_string())
            .unwrap();

            assert_eq!(birthday.id, "b-2");
            assert_eq!(birthday.name, "Bo");
            assert_eq!(birthday.nickname, None);
            assert_eq!(birthday.phone.as_deref(), Some("555-0100"));
        }

        #[test]
        fn test_update_changes_only_supplied_fields() {
            let mut birthday = existing();
            let update = UpdateBirthdayCommand {
                interests: Some("Chess".to_string()),
                ..Default::default()
            };
            update.apply_to(&mut birthday).unwrap();

            assert_eq!(birthday.interests.as_deref(), Some("Chess"));
            assert_eq!(birthday.name, "Ana");
            assert_eq!(birthday.nickname.as_deref(), Some("Annie"));
            assert_eq!(birthday.email.as_deref(), Some("ana@example.com"));
            assert_eq!(birthday.date_of_birth, "1990-03-10");
        }

        #[test]
        fn test_update_with_empty_string_clears_optional_field() {
            let mut birthday = existing();
            let update = UpdateBirthdayCommand {
                nickname: Some(String::new()),
                ..Default::default()
            };
            update.apply_to(&mut birthday).unwrap();
            assert_eq!(birthday.nickname, None);
            assert_eq!(birthday.relationship.as_deref(), Some("Sister"));
        }

        #[test]
        fn test_invalid_update_leaves_record_untouched() {
            let mut birthday = existing();
            let before = birthday.clone();
            let update = UpdateBirthdayCommand {
                interests: Some("Chess".to_string()),
                date_of_birth: Some("1990-02-30".to_string()),
                ..Default::default()
            };

            assert!(update.apply_to(&mut birthday).is_err());
            assert_eq!(birthday, before);

            let blank_name = UpdateBirthdayCommand {
                name: Some(" ".to_string()),
                ..Default::default()
            };
            assert!(blank_name.apply_to(&mut birthday).is_err());
        }
    }
}

pub use birthday::{CreateBirthdayCommand, UpdateBirthdayCommand};
