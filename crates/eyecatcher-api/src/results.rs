// Result recording HTTP route

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use eyecatcher_contracts::{EventKind, GameResult, SubmitResultRequest};
use eyecatcher_storage::{CreateGameResult, Database};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::ResultService;

/// App state for the results route
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ResultService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(ResultService::new(db)),
        }
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/results", post(submit_result))
        .with_state(state)
}

/// POST /results - Record one participant interaction
#[utoipa::path(
    post,
    path = "/results",
    request_body = SubmitResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = GameResult),
        (status = 400, description = "Missing or malformed required field"),
        (status = 500, description = "Persistence failure")
    ),
    tag = "results"
)]
pub async fn submit_result(
    State(state): State<AppState>,
    Json(req): Json<SubmitResultRequest>,
) -> Result<(StatusCode, Json<GameResult>), ApiError> {
    let input = validate(req)?;

    let result = state.service.create(input).await.map_err(|e| {
        tracing::error!("Failed to save result: {:#}", e);
        ApiError::Internal(e)
    })?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Reject absent (or blank, for strings) required fields and unknown event
/// kinds before touching storage.
fn validate(req: SubmitResultRequest) -> Result<CreateGameResult, ApiError> {
    let participant_id = required(req.participant_id)?;
    let participant_name = required(req.participant_name)?;
    let event_kind: EventKind = required(req.event_kind)?
        .parse()
        .map_err(|e: eyecatcher_contracts::UnknownEventKind| ApiError::validation(e.to_string()))?;
    let topic_name = required(req.topic_name)?;
    let image_url = required(req.image_url)?;
    let value = req
        .value
        .ok_or_else(|| ApiError::validation("Missing required fields"))?;

    Ok(CreateGameResult {
        participant_id,
        participant_name,
        event_kind: event_kind.to_string(),
        topic_name,
        image_url,
        value,
        position: req.position,
    })
}

fn required(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation("Missing required fields")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SubmitResultRequest {
        SubmitResultRequest {
            participant_id: Some("p1".to_string()),
            participant_name: Some("Ada".to_string()),
            event_kind: Some("CLICK".to_string()),
            topic_name: Some("Shoes".to_string()),
            image_url: Some("img1".to_string()),
            value: Some(1),
            position: Some(0),
        }
    }

    #[test]
    fn accepts_complete_submission() {
        let input = validate(full_request()).unwrap();
        assert_eq!(input.event_kind, "CLICK");
        assert_eq!(input.value, 1);
        assert_eq!(input.position, Some(0));
    }

    #[test]
    fn position_is_optional() {
        let mut req = full_request();
        req.position = None;
        assert!(validate(req).is_ok());
    }

    #[test]
    fn rejects_each_missing_required_field() {
        for strip in [
            |r: &mut SubmitResultRequest| r.participant_id = None,
            |r: &mut SubmitResultRequest| r.participant_name = None,
            |r: &mut SubmitResultRequest| r.event_kind = None,
            |r: &mut SubmitResultRequest| r.topic_name = None,
            |r: &mut SubmitResultRequest| r.image_url = None,
            |r: &mut SubmitResultRequest| r.value = None,
        ] {
            let mut req = full_request();
            strip(&mut req);
            assert!(matches!(validate(req), Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn rejects_blank_strings() {
        let mut req = full_request();
        req.participant_name = Some("   ".to_string());
        assert!(matches!(validate(req), Err(ApiError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_event_kind() {
        let mut req = full_request();
        req.event_kind = Some("HOVER".to_string());
        assert!(matches!(validate(req), Err(ApiError::Validation(_))));
    }
}
