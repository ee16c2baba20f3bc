// Topic DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named set of candidate images shown together in one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Topic {
    pub name: String,
    /// Catalog order; the client shuffles before display
    pub images: Vec<String>,
}

/// Response of GET /topics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,
}

/// Response of GET /admin/topics: distinct topic names from recorded events
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminTopicsResponse {
    pub topics: Vec<String>,
}
