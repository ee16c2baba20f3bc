// Public topic catalog route

use axum::{extract::State, routing::get, Json, Router};
use eyecatcher_contracts::TopicsResponse;
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::CatalogService;

/// App state for the topics route
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
}

impl AppState {
    pub fn new(service: CatalogService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/topics", get(list_topics))
        .with_state(state)
}

/// GET /topics - Topic list parsed from the catalog file
#[utoipa::path(
    get,
    path = "/topics",
    responses(
        (status = 200, description = "Topics with ordered image lists", body = TopicsResponse),
        (status = 500, description = "Catalog unreadable")
    ),
    tag = "topics"
)]
pub async fn list_topics(State(state): State<AppState>) -> Result<Json<TopicsResponse>, ApiError> {
    let topics = state.service.load().await.map_err(|e| {
        tracing::error!("Failed to load topic catalog: {:#}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(TopicsResponse { topics }))
}
