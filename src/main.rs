use actix_web::{App, HttpServer};
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

    let state = AppState::new(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e)
    })?;

    tracing::info!("Logic verdict agent running at http://{}", bind_addr);

    HttpServer::new(move || {
        let state = state.clone();
        App::new().configure(move |cfg| state.configure(cfg))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
