// Result recording service

use anyhow::Result;
use eyecatcher_contracts::GameResult;
use eyecatcher_storage::{CreateGameResult, Database, GameResultRow};
use std::sync::Arc;

pub struct ResultService {
    db: Arc<Database>,
}

impl ResultService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persist one immutable event row and return it
    pub async fn create(&self, input: CreateGameResult) -> Result<GameResult> {
        let row = self.db.create_game_result(input).await?;
        row_to_result(row)
    }
}

/// Map a storage row to the public DTO.
/// Fails only if the stored kind string is not LOAD/CLICK/RANK.
pub(crate) fn row_to_result(row: GameResultRow) -> Result<GameResult> {
    Ok(GameResult {
        id: row.id,
        participant_id: row.participant_id,
        participant_name: row.participant_name,
        event_kind: row.event_kind.parse()?,
        topic_name: row.topic_name,
        image_url: row.image_url,
        value: row.value,
        position: row.position,
        created_at: row.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eyecatcher_contracts::EventKind;

    fn row(kind: &str) -> GameResultRow {
        GameResultRow {
            id: 7,
            participant_id: "p1".to_string(),
            participant_name: "Ada".to_string(),
            event_kind: kind.to_string(),
            topic_name: "Shoes".to_string(),
            image_url: "img1".to_string(),
            value: 1,
            position: Some(0),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_round_trips_to_dto() {
        let result = row_to_result(row("CLICK")).unwrap();
        assert_eq!(result.id, 7);
        assert_eq!(result.event_kind, EventKind::Click);
        assert_eq!(result.value, 1);
        assert_eq!(result.position, Some(0));
    }

    #[test]
    fn unknown_stored_kind_is_an_error() {
        assert!(row_to_result(row("HOVER")).is_err());
    }
}
