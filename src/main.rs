use anyhow::{bail, Context, Result};
use chrono::{Duration, Local, Utc};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal_analytics::analysis::{JournalAnalyzer, JournalReport};
use trade_journal_analytics::config::{Config, MAX_LOOKBACK_DAYS};
use trade_journal_analytics::journal::{self, FileJournalSource, HttpJournalSource, JournalSource};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env().context("Invalid configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // journal-report [days_back] [output.json]
    let args: Vec<String> = std::env::args().collect();

    let days_back: i64 = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(cfg.lookback_days);
    if !(1..=MAX_LOOKBACK_DAYS).contains(&days_back) {
        bail!("days_back must be between 1 and {}, got {}", MAX_LOOKBACK_DAYS, days_back);
    }

    let output = args.get(2).cloned();

    let today = match cfg.timezone {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Local::now().date_naive(),
    };
    let start = today
        .checked_sub_signed(Duration::days(days_back))
        .context("Lookback range starts before the supported calendar")?;

    let source: Arc<dyn JournalSource> = match &cfg.data_dir {
        Some(dir) => {
            info!("Reading journal exports from {}", dir);
            Arc::new(FileJournalSource::new(dir))
        }
        None => {
            info!("Reading journal from {}", cfg.api_url);
            Arc::new(HttpJournalSource::new(&cfg)?)
        }
    };

    let batch = journal::collect_range(source, start, today).await;
    info!(
        "Loaded {} trades and {} annotations ({} to {})",
        batch.trades.len(),
        batch.annotations.len(),
        start,
        today
    );

    let report = JournalAnalyzer::from_config(&cfg).analyze(&batch.trades, &batch.annotations);
    report.print_summary();

    if let Some(path) = output {
        save_report_to_file(&report, &path)?;
        println!("\nReport saved to: {}", path);
    }

    Ok(())
}

fn save_report_to_file(report: &JournalReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))
}
