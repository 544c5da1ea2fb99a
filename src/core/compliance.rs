use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::bucketer::{PeriodBucket, PeriodMap};
use crate::core::percent;
use crate::error::JournalError;
use crate::models::Respect;

/// How trades without a strategy annotation enter the respect figures.
///
/// Calendar indicators count them as not respected; several chart views
/// leave them out entirely. The two give different percentages, so callers
/// always pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetPolicy {
    TreatAsNotRespected,
    Exclude,
}

impl UnsetPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsetPolicy::TreatAsNotRespected => "not_respected",
            UnsetPolicy::Exclude => "exclude",
        }
    }

    /// Which branch a record lands on, or `None` if it is left out.
    fn classify(&self, respect: Respect) -> Option<bool> {
        match (respect, *self) {
            (Respect::Respected, _) => Some(true),
            (Respect::NotRespected, _) => Some(false),
            (Respect::Unset, UnsetPolicy::TreatAsNotRespected) => Some(false),
            (Respect::Unset, UnsetPolicy::Exclude) => None,
        }
    }
}

impl FromStr for UnsetPolicy {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "not_respected" | "treat_as_not_respected" | "not-respected" => {
                Ok(UnsetPolicy::TreatAsNotRespected)
            }
            "exclude" | "excluded" => Ok(UnsetPolicy::Exclude),
            _ => Err(JournalError::InvalidUnsetPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for UnsetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Records counted toward the respect percentage.
    pub total: usize,
    pub respected_count: usize,
    pub not_respected_count: usize,
    pub percentage: f64,

    /// Every record in the bucket, whatever the policy.
    pub record_count: usize,

    pub respected_winning_count: usize,
    pub not_respected_winning_count: usize,
    pub respected_win_rate: f64,
    pub not_respected_win_rate: f64,

    pub tp1_count: usize,
    pub tp2_plus_count: usize,
    pub tp1_rate: f64,
    pub tp2_rate: f64,
}

pub fn aggregate_compliance(bucket: &PeriodBucket, policy: UnsetPolicy) -> ComplianceSummary {
    let mut s = ComplianceSummary {
        record_count: bucket.len(),
        ..Default::default()
    };

    for r in &bucket.records {
        if r.tp1 {
            s.tp1_count += 1;
        }
        if r.tp2 {
            s.tp2_plus_count += 1;
        }

        match policy.classify(r.respected) {
            Some(true) => {
                s.respected_count += 1;
                if r.is_win() {
                    s.respected_winning_count += 1;
                }
            }
            Some(false) => {
                s.not_respected_count += 1;
                if r.is_win() {
                    s.not_respected_winning_count += 1;
                }
            }
            None => {}
        }
    }

    s.total = s.respected_count + s.not_respected_count;
    s.percentage = percent(s.respected_count, s.total);
    s.respected_win_rate = percent(s.respected_winning_count, s.respected_count);
    s.not_respected_win_rate = percent(s.not_respected_winning_count, s.not_respected_count);
    s.tp1_rate = percent(s.tp1_count, s.record_count);
    s.tp2_rate = percent(s.tp2_plus_count, s.record_count);
    s
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodCompliance {
    pub key: String,
    pub summary: ComplianceSummary,
}

/// Respect figures across a whole period map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceOverview {
    pub policy: UnsetPolicy,
    pub periods: Vec<PeriodCompliance>,
    /// Mean of per-period percentages over periods with data.
    pub regularity: f64,
    /// Pooled rate: all respected over all counted records.
    pub global_rate: f64,
    pub periods_with_data: usize,
    pub total: usize,
    pub respected_count: usize,
}

pub fn compliance_overview(map: &PeriodMap, policy: UnsetPolicy) -> ComplianceOverview {
    let periods: Vec<PeriodCompliance> = map
        .values()
        .map(|b| PeriodCompliance {
            key: b.key.clone(),
            summary: aggregate_compliance(b, policy),
        })
        .collect();

    let with_data: Vec<&ComplianceSummary> = periods
        .iter()
        .map(|p| &p.summary)
        .filter(|s| s.total > 0)
        .collect();

    let regularity = if with_data.is_empty() {
        0.0
    } else {
        with_data.iter().map(|s| s.percentage).sum::<f64>() / with_data.len() as f64
    };

    let total: usize = periods.iter().map(|p| p.summary.total).sum();
    let respected_count: usize = periods.iter().map(|p| p.summary.respected_count).sum();

    ComplianceOverview {
        policy,
        regularity,
        global_rate: percent(respected_count, total),
        periods_with_data: with_data.len(),
        total,
        respected_count,
        periods,
    }
}
