use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::{Granularity, NormalizedRecord};

/// Records that share one period key, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub key: String,
    pub records: Vec<NormalizedRecord>,
}

impl PeriodBucket {
    pub fn new(key: String) -> Self {
        Self {
            key,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Net P/L of every record in the bucket.
    pub fn pnl(&self) -> f64 {
        self.records.iter().map(|r| r.pnl).sum()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }
}

/// Buckets keyed by period, iterating in first-appearance order.
pub type PeriodMap = IndexMap<String, PeriodBucket>;

pub fn bucket(records: &[NormalizedRecord], granularity: Granularity) -> PeriodMap {
    let mut map = PeriodMap::new();
    for r in records {
        let key = granularity.period_key(r.date);
        map.entry(key.clone())
            .or_insert_with(|| PeriodBucket::new(key))
            .records
            .push(r.clone());
    }
    map
}
