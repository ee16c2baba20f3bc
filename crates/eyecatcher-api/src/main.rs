// Eye Catcher API server
//
// Stateless request handlers over an append-only event log; the datastore is
// the sole point of coordination.

mod admin;
mod auth;
mod error;
mod results;
mod services;
mod topics;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Json, Router};
use eyecatcher_contracts::*;
use eyecatcher_storage::Database;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use services::CatalogService;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        results::submit_result,
        topics::list_topics,
        admin::list_admin_topics,
        admin::get_analytics,
        admin::download,
        admin::logout,
    ),
    components(
        schemas(
            EventKind, GameResult, SubmitResultRequest,
            Topic, TopicsResponse, AdminTopicsResponse,
            ImageStats, TopicAnalytics,
            ErrorBody, LogoutResponse,
        )
    ),
    tags(
        (name = "results", description = "Participant interaction recording"),
        (name = "topics", description = "Public topic catalog"),
        (name = "admin", description = "Admin analytics, export, and session")
    ),
    info(
        title = "Eye Catcher API",
        version = "0.1.0",
        description = "Survey API for recording image click/rank interactions and viewing aggregates",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eyecatcher_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("eyecatcher-api starting...");

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable required")?;
    let db = Database::from_url(&database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database");

    // Topic catalog file path (two-column CSV with header)
    let topics_file = std::env::var("TOPICS_FILE").unwrap_or_else(|_| "topics.csv".to_string());
    tracing::info!(path = %topics_file, "Topic catalog configured");

    let db = Arc::new(db);
    let results_state = results::AppState::new(db.clone());
    let topics_state = topics::AppState::new(CatalogService::new(&topics_file));
    let admin_state = admin::AppState::new(db.clone());

    // Optional prefix, e.g. API_PREFIX="/api" yields /api/results
    let api_prefix = std::env::var("API_PREFIX").unwrap_or_default();
    if !api_prefix.is_empty() {
        tracing::info!(prefix = %api_prefix, "API prefix configured");
    }

    // CORS only when the UI is served from another origin
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();

    let api_routes = Router::new()
        .merge(results::routes(results_state))
        .merge(topics::routes(topics_state))
        .merge(admin::routes(admin_state));

    let mut app = Router::new().route("/health", get(health));
    app = app.merge(build_router_with_prefix(api_routes, &api_prefix));

    let app =
        app.merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let app = if !cors_origins.is_empty() {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                .allow_credentials(true),
        )
    } else {
        app
    };

    let app = app.layer(TraceLayer::new_for_http());

    let addr = "0.0.0.0:8000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Nest API routes under an optional prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn prefix_moves_routes() {
        let routes = Router::new().route("/topics", get(|| async { "ok" }));
        let app = build_router_with_prefix(routes, "/api");

        let hit = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/topics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(hit.status(), 200);

        let miss = app
            .oneshot(
                Request::builder()
                    .uri("/topics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(miss.status(), 404);
    }
}
