pub mod file;
pub mod http;
pub mod refresh;

pub use file::FileJournalSource;
pub use http::HttpJournalSource;
pub use refresh::{RefreshHandle, Refresher};

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::models::{StrategyAnnotation, TradeRecord};

/// Upper bound on per-day requests in flight.
pub const MAX_PARALLEL_DAYS: usize = 8;

/// Trades and annotations for some span of the journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalBatch {
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
    #[serde(default)]
    pub annotations: Vec<StrategyAnnotation>,
}

impl JournalBatch {
    pub fn extend(&mut self, other: JournalBatch) {
        self.trades.extend(other.trades);
        self.annotations.extend(other.annotations);
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[async_trait]
pub trait JournalSource: Send + Sync {
    async fn fetch_day(&self, day: NaiveDate) -> Result<JournalBatch>;
}

/// Fetch every day in `[start, end]` and concatenate the batches oldest first.
///
/// A day that fails to load is logged and contributes nothing; one bad day
/// never fails the whole range.
pub async fn collect_range(
    source: Arc<dyn JournalSource>,
    start: NaiveDate,
    end: NaiveDate,
) -> JournalBatch {
    let permits = Arc::new(Semaphore::new(MAX_PARALLEL_DAYS));
    let mut tasks = JoinSet::new();

    for day in start.iter_days().take_while(|d| *d <= end) {
        let source = Arc::clone(&source);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            let batch = match source.fetch_day(day).await {
                Ok(b) => b,
                Err(e) => {
                    warn!("Failed to load journal day {}: {:#}", day, e);
                    JournalBatch::default()
                }
            };
            (day, batch)
        });
    }

    let mut days: Vec<(NaiveDate, JournalBatch)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(entry) => days.push(entry),
            Err(e) => warn!("Journal fetch task aborted: {}", e),
        }
    }
    days.sort_by_key(|(day, _)| *day);

    let mut out = JournalBatch::default();
    for (_, batch) in days {
        out.extend(batch);
    }
    debug!(
        "Collected {} trades and {} annotations from {} to {}",
        out.trades.len(),
        out.annotations.len(),
        start,
        end
    );
    out
}
