use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::journal::{JournalBatch, JournalSource};
use crate::models::{StrategyAnnotation, TradeRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Reads one day at a time from the journal REST backend.
pub struct HttpJournalSource {
    client: Client,
    base_url: String,
}

impl HttpJournalSource {
    pub fn new(cfg: &Config) -> Result<Self> {
        Self::with_base_url(&cfg.api_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn trades_url(&self) -> String {
        format!("{}/trades", self.base_url)
    }

    pub fn strategies_url(&self) -> String {
        format!("{}/strategies", self.base_url)
    }

    async fn get_list<T: DeserializeOwned>(&self, url: &str, day: NaiveDate) -> Result<Vec<T>> {
        let resp = self
            .client
            .get(url)
            .query(&[("date", day.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Journal API error {} for {}: {}", status, url, body);
        }

        resp.json::<Vec<T>>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }

    pub async fn fetch_trades(&self, day: NaiveDate) -> Result<Vec<TradeRecord>> {
        self.get_list(&self.trades_url(), day).await
    }

    pub async fn fetch_annotations(&self, day: NaiveDate) -> Result<Vec<StrategyAnnotation>> {
        self.get_list(&self.strategies_url(), day).await
    }
}

#[async_trait]
impl JournalSource for HttpJournalSource {
    async fn fetch_day(&self, day: NaiveDate) -> Result<JournalBatch> {
        let (trades, annotations) = tokio::try_join!(self.fetch_trades(day), self.fetch_annotations(day))?;
        Ok(JournalBatch { trades, annotations })
    }
}
