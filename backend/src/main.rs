use std::sync::Arc;

use anyhow::Result;
use birthday_tracker::config::AppConfig;
use birthday_tracker::domain::{LogNotifier, ReminderService};
use birthday_tracker::{create_router, initialize_backend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting birthday tracker with {:?}", config);
    let app_state = initialize_backend(&config).await?;

    let today = app_state.clock.today();
    let reminders = ReminderService::new(app_state.birthday_service.storage(), Arc::new(LogNotifier));
    match reminders.send_startup_summary(today, config.startup_summary_days()).await {
        Ok(true) => {}
        Ok(false) => warn!("Startup summary was not delivered"),
        Err(e) => warn!("Could not build startup summary: {}", e),
    }
    match reminders.run_check(today, config.notification_days).await {
        Ok(report) => info!("Startup reminder check: {:?}", report),
        Err(e) => warn!("Startup reminder check failed: {}", e),
    }

    let app = create_router(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
