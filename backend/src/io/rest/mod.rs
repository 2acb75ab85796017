//! # REST API Interface Layer
//!
//! HTTP endpoints for the birthday tracker. Handlers translate between the
//! `shared` DTOs and the domain layer and turn [`BirthdayError`] into status
//! codes with a JSON [`ApiError`] body.

pub mod birthday_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ApiError;

use crate::domain::models::BirthdayError;

pub use birthday_apis::*;

impl BirthdayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BirthdayError::Validation(_) => StatusCode::BAD_REQUEST,
            BirthdayError::NotFound(_) => StatusCode::NOT_FOUND,
            BirthdayError::Conflict(_) => StatusCode::CONFLICT,
            BirthdayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BirthdayError::Validation(_) => "VALIDATION_ERROR",
            BirthdayError::NotFound(_) => "NOT_FOUND",
            BirthdayError::Conflict(_) => "CONFLICT",
            BirthdayError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for BirthdayError {
    fn into_response(self) -> Response {
        let body = ApiError {
            error: self.to_string(),
            code: self.error_code().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
