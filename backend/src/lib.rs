//! # Birthday Tracker Backend
//!
//! Keeps a roster of people and their dates of birth, answers "whose birthday
//! is coming up", and sends reminders through a pluggable notifier.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (recurrence, ranking, services)
//!     ↓
//! Storage Layer (JSON / CSV / SQLite)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{BirthdayService, ReferenceClock};
use crate::storage::open_storage;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub birthday_service: BirthdayService,
    pub clock: ReferenceClock,
    /// Default window for the upcoming listing
    pub listing_window: u32,
}

/// Open storage and build the application state from configuration
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up {} storage", config.storage_backend);
    let storage = open_storage(&config.storage_config()).await?;

    info!("Setting up domain model");
    let birthday_service = BirthdayService::new(storage);

    Ok(AppState {
        birthday_service,
        clock: config.reference_clock()?,
        listing_window: config.upcoming_days,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/birthdays", get(io::list_birthdays).post(io::create_birthday))
        .route("/birthdays/upcoming", get(io::list_upcoming_birthdays))
        .route(
            "/birthdays/:id",
            get(io::get_birthday)
                .put(io::update_birthday)
                .delete(io::delete_birthday),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
