//! # REST API for Birthday Management
//!
//! Endpoints for creating, retrieving, updating, and deleting birthdays, plus
//! the upcoming birthdays listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::domain::models::BirthdayError;
use crate::io::rest::mappers::BirthdayMapper;
use crate::AppState;
use shared::{CreateBirthdayRequest, UpdateBirthdayRequest};

/// Query parameters for GET /birthdays/upcoming
#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<String>,
}

impl UpcomingQuery {
    /// Requested window, or `default` when the parameter is absent
    fn window(&self, default: u32) -> Result<u32, BirthdayError> {
        match self.days.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(days) => days.parse::<u32>().map_err(|_| {
                BirthdayError::validation(format!(
                    "days must be a non-negative integer, got '{}'",
                    days
                ))
            }),
        }
    }
}

/// List all birthdays
pub async fn list_birthdays(State(state): State<AppState>) -> Response {
    info!("GET /birthdays");

    match state.birthday_service.list_birthdays().await {
        Ok(birthdays) => (StatusCode::OK, Json(BirthdayMapper::to_list_dto(birthdays))).into_response(),
        Err(e) => {
            error!("Failed to list birthdays: {}", e);
            e.into_response()
        }
    }
}

/// List birthdays falling within the next `days` days, closest first
pub async fn list_upcoming_birthdays(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Response {
    info!("GET /birthdays/upcoming - query: {:?}", query);

    let days = match query.window(state.listing_window) {
        Ok(days) => days,
        Err(e) => return e.into_response(),
    };

    let today = state.clock.today();
    match state.birthday_service.list_upcoming(today, days).await {
        Ok(batch) => {
            (StatusCode::OK, Json(BirthdayMapper::to_upcoming_list_dto(batch, days))).into_response()
        }
        Err(e) => {
            error!("Failed to list upcoming birthdays: {}", e);
            e.into_response()
        }
    }
}

/// Get a birthday by ID
pub async fn get_birthday(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("GET /birthdays/{}", id);

    match state.birthday_service.get_birthday(&id).await {
        Ok(birthday) => (StatusCode::OK, Json(BirthdayMapper::to_dto(birthday))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new birthday
pub async fn create_birthday(
    State(state): State<AppState>,
    Json(request): Json<CreateBirthdayRequest>,
) -> Response {
    info!("POST /birthdays - request: {:?}", request);

    let command = BirthdayMapper::to_create_command(request);
    match state.birthday_service.create_birthday(command).await {
        Ok(birthday) => (StatusCode::CREATED, Json(BirthdayMapper::to_dto(birthday))).into_response(),
        Err(e) => {
            error!("Failed to create birthday: {}", e);
            e.into_response()
        }
    }
}

/// Update fields of an existing birthday
pub async fn update_birthday(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBirthdayRequest>,
) -> Response {
    info!("PUT /birthdays/{} - request: {:?}", id, request);

    let command = BirthdayMapper::to_update_command(request);
    match state.birthday_service.update_birthday(&id, command).await {
        Ok(birthday) => (StatusCode::OK, Json(BirthdayMapper::to_dto(birthday))).into_response(),
        Err(e) => {
            error!("Failed to update birthday {}: {}", id, e);
            e.into_response()
        }
    }
}

/// Delete a birthday
pub async fn delete_birthday(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("DELETE /birthdays/{}", id);

    match state.birthday_service.delete_birthday(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete birthday {}: {}", id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(days: Option<&str>) -> UpcomingQuery {
        UpcomingQuery {
            days: days.map(str::to_string),
        }
    }

    #[test]
    fn test_window_parsing() {
        assert_eq!(query(None).window(30).unwrap(), 30);
        assert_eq!(query(Some("")).window(30).unwrap(), 30);
        assert_eq!(query(Some("0")).window(30).unwrap(), 0);
        assert_eq!(query(Some("7")).window(30).unwrap(), 7);
        assert!(matches!(query(Some("-1")).window(30), Err(BirthdayError::Validation(_))));
        assert!(matches!(query(Some("soon")).window(30), Err(BirthdayError::Validation(_))));
    }
}
