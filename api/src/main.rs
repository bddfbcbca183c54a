mod ask_payload;
mod config;
mod db;
mod server;

use anyhow::Result;
use config::AppConfig;
use db::PgResponseLog;
use server::{build_router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;

    let pipeline = rag_system::build_default_pipeline(&config.openai).await?;
    let response_log = PgResponseLog::connect_lazy(&config.database);
    let state = AppState::new(Arc::new(pipeline), Arc::new(response_log));

    let app = build_router(state, &config.public_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    log::info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
