// Analytics DTOs for the admin dashboard

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-image aggregate over a topic's event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub image_url: String,
    /// CLICK events with value 1; toggled-off clicks never decrement
    pub clicks: i64,
    /// Mean of RANK values (lower is more preferred), None when never ranked
    pub average_rank: Option<f64>,
    pub rank_count: i64,
    /// Mean display position across positive clicks carrying a position
    pub average_position: Option<f64>,
    pub position_count: i64,
}

/// Response of GET /admin/analytics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicAnalytics {
    pub topic_name: String,
    /// Distinct participant ids seen for this topic
    pub total_responses: i64,
    /// Distinct display names; may diverge from totalResponses when names
    /// collide or ids regenerate
    pub unique_names: i64,
    pub total_events: i64,
    /// Sorted by clicks descending; ties keep encounter order
    pub image_stats: Vec<ImageStats>,
}
