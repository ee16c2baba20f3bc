// CSV export service
//
// Hand-rolled CSV matching the historical export format: fixed header, name,
// topic and URL always double-quoted, no escaping of embedded quotes (known
// limitation), rows newest-first, no trailing newline.

use anyhow::Result;
use chrono::{NaiveDate, SecondsFormat, Utc};
use eyecatcher_storage::{Database, GameResultRow};
use std::fmt::Write as _;
use std::sync::Arc;

const CSV_HEADER: &str =
    "ID,Created At,Participant ID,Participant Name,Event Kind,Topic Name,Image URL,Value";

/// A rendered export ready to stream to the client
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

pub struct ExportService {
    db: Arc<Database>,
}

impl ExportService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn export(&self, topic_name: Option<&str>) -> Result<CsvExport> {
        let rows = self.db.list_game_results(topic_name).await?;
        Ok(CsvExport {
            filename: export_filename(topic_name, Utc::now().date_naive()),
            body: render_csv(&rows),
        })
    }
}

pub(crate) fn export_filename(topic_name: Option<&str>, date: NaiveDate) -> String {
    format!(
        "results-{}-{}.csv",
        topic_name.unwrap_or("all"),
        date.format("%Y-%m-%d")
    )
}

pub(crate) fn render_csv(rows: &[GameResultRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    for row in rows {
        out.push('\n');
        // write! to a String cannot fail
        let _ = write!(
            out,
            "{},{},{},\"{}\",{},\"{}\",\"{}\",{}",
            row.id,
            row.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            row.participant_id,
            row.participant_name,
            row.event_kind,
            row.topic_name,
            row.image_url,
            row.value,
        );
    }
    out
}
