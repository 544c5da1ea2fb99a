use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::analysis::{JournalAnalyzer, JournalReport};
use crate::config::SharedConfig;
use crate::journal::{collect_range, JournalSource};

/// Latest report, `None` until the first run finishes.
pub type ReportReceiver = watch::Receiver<Option<Arc<JournalReport>>>;

/// Lets the application say "trades changed" to a running [`Refresher`].
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Ask for a recompute. Returns false once the refresher has stopped.
    ///
    /// Signals that arrive while a recompute is already pending are merged
    /// into it.
    pub fn notify_trades_updated(&self) -> bool {
        match self.tx.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => true,
            Err(mpsc::error::TrySendError::Closed(())) => false,
        }
    }
}

/// Re-runs the pipeline over a fixed date range whenever it is signalled.
///
/// Granularity, policy and timezone are read from the shared config on every
/// run, so changes apply on the next refresh.
pub struct Refresher {
    source: Arc<dyn JournalSource>,
    config: SharedConfig,
    start: NaiveDate,
    end: NaiveDate,
}

impl Refresher {
    pub fn new(source: Arc<dyn JournalSource>, config: SharedConfig, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            source,
            config,
            start,
            end,
        }
    }

    /// Start the background task. It runs once immediately and stops when
    /// every handle is dropped or nobody is watching the reports.
    pub fn spawn(self) -> (RefreshHandle, ReportReceiver) {
        let (tx, rx) = mpsc::channel(1);
        let (report_tx, report_rx) = watch::channel(None);
        tokio::spawn(self.run(rx, report_tx));
        (RefreshHandle { tx }, report_rx)
    }

    async fn run(self, mut signals: mpsc::Receiver<()>, reports: watch::Sender<Option<Arc<JournalReport>>>) {
        let mut cycle: u64 = 0;
        loop {
            cycle += 1;
            let analyzer = JournalAnalyzer::from_config(&*self.config.read().await);
            let batch = collect_range(Arc::clone(&self.source), self.start, self.end).await;
            let report = analyzer.analyze(&batch.trades, &batch.annotations);
            info!(
                "Refresh #{}: {} trades across {} {} periods",
                cycle,
                report.performance.total_trades,
                report.periods.len(),
                report.granularity
            );

            if reports.send(Some(Arc::new(report))).is_err() {
                debug!("No report watchers left, stopping refresher");
                break;
            }

            if signals.recv().await.is_none() {
                debug!("All refresh handles dropped, stopping refresher");
                break;
            }
            while signals.try_recv().is_ok() {}
        }
    }
}
