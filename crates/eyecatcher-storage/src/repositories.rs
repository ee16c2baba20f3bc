// Repository layer for database operations

use anyhow::Result;
use sqlx::PgPool;

use crate::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Lazy pool that connects on first use; handlers rejected before data
    /// access (e.g. by the admin gate) never open a connection.
    pub fn from_url_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Migrations up to date");
        Ok(())
    }

    // ============================================
    // Game results (append-only event log)
    // ============================================

    pub async fn create_game_result(&self, input: CreateGameResult) -> Result<GameResultRow> {
        let row = sqlx::query_as::<_, GameResultRow>(
            r#"
            INSERT INTO game_results (participant_id, participant_name, event_kind, topic_name, image_url, value, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, participant_id, participant_name, event_kind, topic_name, image_url, value, position, created_at
            "#,
        )
        .bind(&input.participant_id)
        .bind(&input.participant_name)
        .bind(&input.event_kind)
        .bind(&input.topic_name)
        .bind(&input.image_url)
        .bind(input.value)
        .bind(input.position)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_game_results_for_topic(&self, topic_name: &str) -> Result<Vec<GameResultRow>> {
        let rows = sqlx::query_as::<_, GameResultRow>(
            r#"
            SELECT id, participant_id, participant_name, event_kind, topic_name, image_url, value, position, created_at
            FROM game_results
            WHERE topic_name = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(topic_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All rows, optionally filtered by topic, newest first
    pub async fn list_game_results(&self, topic_name: Option<&str>) -> Result<Vec<GameResultRow>> {
        let rows = if let Some(topic_name) = topic_name {
            self.list_game_results_for_topic(topic_name).await?
        } else {
            sqlx::query_as::<_, GameResultRow>(
                r#"
                SELECT id, participant_id, participant_name, event_kind, topic_name, image_url, value, position, created_at
                FROM game_results
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows)
    }

    /// Distinct topic names seen in the log, ascending
    pub async fn list_topic_names(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT topic_name
            FROM game_results
            ORDER BY topic_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
