use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();
    let max_upload_bytes = config.max_upload_bytes;

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    let classification_service = web::Data::from(state.classification_service);

    tracing::info!("Starting Waste Sorter server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .app_data(classification_service.clone())
            .configure(api::classify::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
