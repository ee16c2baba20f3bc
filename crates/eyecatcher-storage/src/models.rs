// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct GameResultRow {
    pub id: i64,
    pub participant_id: String,
    pub participant_name: String,
    pub event_kind: String,
    pub topic_name: String,
    pub image_url: String,
    pub value: i32,
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateGameResult {
    pub participant_id: String,
    pub participant_name: String,
    pub event_kind: String,
    pub topic_name: String,
    pub image_url: String,
    pub value: i32,
    pub position: Option<i32>,
}
