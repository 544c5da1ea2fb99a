use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::journal::{JournalBatch, JournalSource};

/// Reads journal exports stored as one `YYYY-MM-DD.json` file per day.
pub struct FileJournalSource {
    dir: PathBuf,
}

impl FileJournalSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn day_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.json", day.format("%Y-%m-%d")))
    }

    /// Write a day's batch in the layout `fetch_day` reads.
    pub async fn save_day(&self, day: NaiveDate, batch: &JournalBatch) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let json = serde_json::to_string_pretty(batch)?;
        let path = self.day_path(day);
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Load a single batch file.
pub async fn load_batch(path: &Path) -> Result<JournalBatch> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[async_trait]
impl JournalSource for FileJournalSource {
    async fn fetch_day(&self, day: NaiveDate) -> Result<JournalBatch> {
        let path = self.day_path(day);
        let exists = tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check {}", path.display()))?;
        if !exists {
            return Ok(JournalBatch::default());
        }
        load_batch(&path).await
    }
}
