// Topic catalog service
//
// The catalog file is read on every request; it is small and read-only, and
// rereading lets operators swap it without a restart.

use anyhow::{Context, Result};
use eyecatcher_contracts::Topic;
use eyecatcher_core::parse_catalog;
use std::path::PathBuf;

pub struct CatalogService {
    path: PathBuf,
}

impl CatalogService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Vec<Topic>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read topic catalog {}", self.path.display()))?;
        let topics = parse_catalog(&contents)?;
        Ok(topics)
    }
}
