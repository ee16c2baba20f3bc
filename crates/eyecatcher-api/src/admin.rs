// Admin-surface HTTP routes
//
// All data-reading handlers take AdminSession first; logout is deliberately
// ungated and idempotent.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use eyecatcher_contracts::{AdminTopicsResponse, LogoutResponse, TopicAnalytics};
use eyecatcher_storage::Database;
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::{AdminSession, ADMIN_COOKIE};
use crate::error::ApiError;
use crate::services::{AnalyticsService, ExportService};

/// App state for admin routes
#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<AnalyticsService>,
    pub export: Arc<ExportService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            analytics: Arc::new(AnalyticsService::new(db.clone())),
            export: Arc::new(ExportService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/admin/topics", get(list_admin_topics))
        .route("/admin/analytics", get(get_analytics))
        .route("/admin/download", get(download))
        .route("/admin/logout", post(logout))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub topic: Option<String>,
}

/// GET /admin/topics - Distinct topic names from recorded events
#[utoipa::path(
    get,
    path = "/admin/topics",
    responses(
        (status = 200, description = "Topic names, ascending", body = AdminTopicsResponse),
        (status = 401, description = "Missing or invalid admin session"),
        (status = 500, description = "Datastore failure")
    ),
    tag = "admin"
)]
pub async fn list_admin_topics(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<AdminTopicsResponse>, ApiError> {
    let topics = state.analytics.topic_names().await.map_err(|e| {
        tracing::error!("Failed to list admin topics: {:#}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(AdminTopicsResponse { topics }))
}

/// GET /admin/analytics?topic= - Aggregated statistics for one topic
#[utoipa::path(
    get,
    path = "/admin/analytics",
    params(("topic" = String, Query, description = "Topic name")),
    responses(
        (status = 200, description = "Per-image aggregates", body = TopicAnalytics),
        (status = 400, description = "Topic name missing"),
        (status = 401, description = "Missing or invalid admin session"),
        (status = 500, description = "Datastore failure")
    ),
    tag = "admin"
)]
pub async fn get_analytics(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> Result<Json<TopicAnalytics>, ApiError> {
    // Blank counts as absent, same as submission fields
    let topic_name = query
        .topic
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Topic name required"))?;

    let analytics = state.analytics.for_topic(&topic_name).await.map_err(|e| {
        tracing::error!("Failed to compute analytics: {:#}", e);
        ApiError::Internal(e)
    })?;

    Ok(Json(analytics))
}

/// GET /admin/download?topic= - CSV export of all (or one topic's) events
#[utoipa::path(
    get,
    path = "/admin/download",
    params(("topic" = Option<String>, Query, description = "Optional topic filter")),
    responses(
        (status = 200, description = "CSV byte stream", content_type = "text/csv"),
        (status = 401, description = "Missing or invalid admin session"),
        (status = 500, description = "Datastore failure")
    ),
    tag = "admin"
)]
pub async fn download(
    _session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> Result<Response, ApiError> {
    let export = state
        .export
        .export(query.topic.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to export results: {:#}", e);
            ApiError::Internal(e)
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.filename),
            ),
        ],
        export.body,
    )
        .into_response())
}

/// POST /admin/logout - Clear the session marker unconditionally
#[utoipa::path(
    post,
    path = "/admin/logout",
    responses(
        (status = 200, description = "Marker cleared (idempotent)", body = LogoutResponse)
    ),
    tag = "admin"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    (
        jar.remove(Cookie::build(ADMIN_COOKIE).path("/")),
        Json(LogoutResponse { success: true }),
    )
}
