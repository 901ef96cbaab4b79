use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod models;
mod routes;

use adapters::{DiscordWebhookClient, PgHandlerRepository};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub handlers: Arc<PgHandlerRepository>,
    pub discord: Arc<DiscordWebhookClient>,
}

#[derive(Serialize)]
struct ServiceInfo {
    error: bool,
    version: String,
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        error: false,
        version: format!("🦊 GitLab Webhook Handler v{}", env!("CARGO_PKG_VERSION")),
    })
}

async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": true,
            "code": 404,
            "message": "Not Found"
        })),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🦊 Gitcord API initializing...");

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("✅ Database migrations completed");

    let state = AppState {
        handlers: Arc::new(PgHandlerRepository::new(pool)),
        discord: Arc::new(DiscordWebhookClient::new()),
    };

    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/", get(service_info))
        .merge(routes::handler::router())
        .merge(routes::event::router())
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Gitcord API ready on {addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
