// Result event DTOs
//
// One GameResult row is written per participant interaction. The value field
// is kind-dependent: display position for LOAD, 1/0 toggle for CLICK, 1-based
// rank for RANK.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The kind of interaction a result row records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// An image was rendered at a display position (value = 0-based position)
    Load,
    /// An image was toggled (value = 1 clicked, 0 un-clicked)
    Click,
    /// An image was assigned a final rank (value = 1-based rank)
    Rank,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Load => write!(f, "LOAD"),
            EventKind::Click => write!(f, "CLICK"),
            EventKind::Rank => write!(f, "RANK"),
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOAD" => Ok(EventKind::Load),
            "CLICK" => Ok(EventKind::Click),
            "RANK" => Ok(EventKind::Rank),
            other => Err(UnknownEventKind(other.to_string())),
        }
    }
}

/// Error returned when an event kind string is not LOAD, CLICK, or RANK
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

/// A recorded participant interaction, immutable once written
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub id: i64,
    /// Client-generated participant identifier
    pub participant_id: String,
    pub participant_name: String,
    pub event_kind: EventKind,
    pub topic_name: String,
    pub image_url: String,
    pub value: i32,
    /// Display position at interaction time, where the client supplied one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Body of POST /results
///
/// Required fields arrive as Options so the handler can reject absent or
/// blank values with a 400 instead of a framework-level rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResultRequest {
    pub participant_id: Option<String>,
    pub participant_name: Option<String>,
    pub event_kind: Option<String>,
    pub topic_name: Option<String>,
    pub image_url: Option<String>,
    pub value: Option<i32>,
    #[serde(default)]
    pub position: Option<i32>,
}
