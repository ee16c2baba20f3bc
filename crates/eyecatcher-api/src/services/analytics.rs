// Analytics aggregation service
//
// Fetches a topic's rows newest-first and hands them to the core
// aggregation; the fetch order defines encounter order for tie-breaking.

use anyhow::Result;
use eyecatcher_contracts::{GameResult, TopicAnalytics};
use eyecatcher_core::aggregate_topic;
use eyecatcher_storage::Database;
use std::sync::Arc;

use super::result::row_to_result;

pub struct AnalyticsService {
    db: Arc<Database>,
}

impl AnalyticsService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn for_topic(&self, topic_name: &str) -> Result<TopicAnalytics> {
        let rows = self.db.list_game_results_for_topic(topic_name).await?;
        let events: Vec<GameResult> = rows
            .into_iter()
            .map(row_to_result)
            .collect::<Result<_>>()?;
        Ok(aggregate_topic(topic_name, &events))
    }

    /// Distinct topic names recorded in the log, ascending
    pub async fn topic_names(&self) -> Result<Vec<String>> {
        self.db.list_topic_names().await
    }
}
