use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::analysis::report::{JournalReport, PeriodSummary};
use crate::config::Config;
use crate::core::rollup::{cumulative_average_percentage, cumulative_pnl, drawdown, emotion_frequency, weekday_aggregate};
use crate::core::{aggregate_compliance, bucket, compliance_overview, normalize, PerformanceSummary, UnsetPolicy};
use crate::models::{Granularity, StrategyAnnotation, TradeRecord};

/// Runs the whole aggregation pipeline for one granularity and unset policy.
#[derive(Debug, Clone, Copy)]
pub struct JournalAnalyzer {
    pub granularity: Granularity,
    pub policy: UnsetPolicy,
    pub timezone: Option<Tz>,
}

impl JournalAnalyzer {
    pub fn new(granularity: Granularity, policy: UnsetPolicy) -> Self {
        Self {
            granularity,
            policy,
            timezone: None,
        }
    }

    pub fn with_timezone(mut self, tz: Tz) -> Self {
        self.timezone = Some(tz);
        self
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            granularity: cfg.granularity,
            policy: cfg.unset_policy,
            timezone: cfg.timezone,
        }
    }

    pub fn analyze(&self, trades: &[TradeRecord], annotations: &[StrategyAnnotation]) -> JournalReport {
        let normalized = normalize(trades, annotations, self.timezone);
        if normalized.skipped > 0 {
            warn!(
                "Skipped {} of {} trades with a missing or unreadable entry time",
                normalized.skipped,
                trades.len()
            );
        }

        let map = bucket(&normalized.records, self.granularity);
        debug!(
            "Bucketed {} trades into {} {} periods",
            normalized.records.len(),
            map.len(),
            self.granularity
        );

        let periods = map
            .values()
            .map(|b| PeriodSummary {
                key: b.key.clone(),
                trades: b.len(),
                pnl: b.pnl(),
                compliance: aggregate_compliance(b, self.policy),
            })
            .collect();

        JournalReport {
            granularity: self.granularity,
            policy: self.policy,
            total_input: trades.len(),
            skipped: normalized.skipped,
            periods,
            compliance: compliance_overview(&map, self.policy),
            cumulative_pnl: cumulative_pnl(&map),
            cumulative_average: cumulative_average_percentage(&map, self.policy),
            drawdown: drawdown(&map),
            weekdays: weekday_aggregate(&map),
            emotions: emotion_frequency(&map),
            performance: PerformanceSummary::from_records(&normalized.records),
        }
    }
}
