//! # Postwave API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Postwave API Server on {}:{}",
        config.host,
        config.port
    );
    tracing::info!(
        webhook_url = %config.workflow.webhook_url,
        max_payload_bytes = config.max_payload_bytes,
        "Workflow integration configured"
    );

    let state = AppState::new(&config).await?;
    state.scheduler.start().await?;

    let server_state = state.clone();
    let max_payload_bytes = config.max_payload_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(handlers::cors())
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(server_state.clone()))
            .app_data(handlers::json_config(max_payload_bytes))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    state.scheduler.shutdown().await?;
    Ok(())
}
