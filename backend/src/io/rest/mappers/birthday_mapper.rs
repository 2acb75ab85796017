//! backend/src/io/rest/mappers/birthday_mapper.rs

use crate::domain::commands::{CreateBirthdayCommand, UpdateBirthdayCommand};
use crate::domain::models::Birthday as DomainBirthday;
use crate::domain::upcoming::{UpcomingBatch, UpcomingEntry};
use shared::{
    Birthday as SharedBirthday, BirthdayListResponse, CreateBirthdayRequest, UpcomingBirthday,
    UpcomingBirthdaysResponse, UpdateBirthdayRequest,
};

/// Mapper between the shared birthday DTOs and the domain model
pub struct BirthdayMapper;

impl BirthdayMapper {
    pub fn to_dto(domain: DomainBirthday) -> SharedBirthday {
        SharedBirthday {
            id: domain.id,
            name: domain.name,
            nickname: domain.nickname,
            email: domain.email,
            date_of_birth: domain.date_of_birth,
            phone: domain.phone,
            address: domain.address,
            relationship: domain.relationship,
            interests: domain.interests,
            gender: domain.gender,
        }
    }

    pub fn to_list_dto(birthdays: Vec<DomainBirthday>) -> BirthdayListResponse {
        BirthdayListResponse {
            birthdays: birthdays.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_upcoming_dto(entry: UpcomingEntry) -> UpcomingBirthday {
        UpcomingBirthday {
            date: entry.occurs_on.format("%Y-%m-%d").to_string(),
            days_until: entry.days_until,
            birthday: Self::to_dto(entry.birthday),
        }
    }

    pub fn to_upcoming_list_dto(batch: UpcomingBatch, days: u32) -> UpcomingBirthdaysResponse {
        UpcomingBirthdaysResponse {
            skipped: batch.skipped,
            birthdays: batch.entries.into_iter().map(Self::to_upcoming_dto).collect(),
            days,
        }
    }

    pub fn to_create_command(request: CreateBirthdayRequest) -> CreateBirthdayCommand {
        CreateBirthdayCommand {
            name: request.name,
            nickname: request.nickname,
            email: request.email,
            date_of_birth: request.date_of_birth,
            phone: request.phone,
            address: request.address,
            relationship: request.relationship,
            interests: request.interests,
            gender: request.gender,
        }
    }

    pub fn to_update_command(request: UpdateBirthdayRequest) -> UpdateBirthdayCommand {
        UpdateBirthdayCommand {
            name: request.name,
            nickname: request.nickname,
            email: request.email,
            date_of_birth: request.date_of_birth,
            phone: request.phone,
            address: request.address,
            relationship: request.relationship,
            interests: request.interests,
            gender: request.gender,
        }
    }
}
