use chrono::Datelike;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::bucketer::PeriodMap;
use crate::core::compliance::{aggregate_compliance, UnsetPolicy};
use crate::core::percent;

/// Number of emotions kept in the frequency table.
pub const EMOTION_TOP_N: usize = 8;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupKind {
    CumulativePnl,
    CumulativeAveragePercentage { policy: UnsetPolicy },
    WeekdayAggregate,
    EmotionFrequency,
    Drawdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollupResult {
    CumulativePnl(Vec<CumulativePnlPoint>),
    CumulativeAveragePercentage(Vec<CumulativeAveragePoint>),
    WeekdayAggregate(Vec<WeekdayStats>),
    EmotionFrequency(EmotionFrequency),
    Drawdown(DrawdownSeries),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePnlPoint {
    pub key: String,
    pub pnl: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeAveragePoint {
    pub key: String,
    pub rate: f64,
    pub cumulative_average: f64,
    /// The period's own rate is at or above the running average up to and
    /// including itself. `None` when the period has no counted records.
    pub at_or_above_average: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayStats {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
    pub name: String,
    pub trades: usize,
    pub wins: usize,
    pub total_pnl: f64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionFrequency {
    pub top: Vec<EmotionCount>,
    /// Every tag occurrence across trades. A tag repeated within one trade
    /// counts once.
    pub total_emotions: usize,
    pub distinct: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    pub key: String,
    pub cumulative: f64,
    pub peak: f64,
    pub drawdown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownSeries {
    pub points: Vec<DrawdownPoint>,
    pub max_drawdown: f64,
}

pub fn rollup(map: &PeriodMap, kind: RollupKind) -> RollupResult {
    match kind {
        RollupKind::CumulativePnl => RollupResult::CumulativePnl(cumulative_pnl(map)),
        RollupKind::CumulativeAveragePercentage { policy } => {
            RollupResult::CumulativeAveragePercentage(cumulative_average_percentage(map, policy))
        }
        RollupKind::WeekdayAggregate => RollupResult::WeekdayAggregate(weekday_aggregate(map)),
        RollupKind::EmotionFrequency => RollupResult::EmotionFrequency(emotion_frequency(map)),
        RollupKind::Drawdown => RollupResult::Drawdown(drawdown(map)),
    }
}

pub fn cumulative_pnl(map: &PeriodMap) -> Vec<CumulativePnlPoint> {
    let mut running = 0.0;
    map.values()
        .map(|b| {
            let pnl = b.pnl();
            running += pnl;
            CumulativePnlPoint {
                key: b.key.clone(),
                pnl,
                cumulative: running,
            }
        })
        .collect()
}

/// Running compliance average, pooled from each period's counts.
pub fn cumulative_average_percentage(
    map: &PeriodMap,
    policy: UnsetPolicy,
) -> Vec<CumulativeAveragePoint> {
    let mut respected = 0usize;
    let mut total = 0usize;
    map.values()
        .map(|b| {
            let s = aggregate_compliance(b, policy);
            respected += s.respected_count;
            total += s.total;
            let cumulative_average = percent(respected, total);
            CumulativeAveragePoint {
                key: b.key.clone(),
                rate: s.percentage,
                cumulative_average,
                at_or_above_average: (s.total > 0).then(|| s.percentage >= cumulative_average),
            }
        })
        .collect()
}

/// Running mean of already-computed percentages, for when the per-period
/// counts behind them are not available.
pub fn running_average(rates: &[f64]) -> Vec<f64> {
    let mut sum = 0.0;
    rates
        .iter()
        .enumerate()
        .map(|(i, r)| {
            sum += r;
            sum / (i + 1) as f64
        })
        .collect()
}

pub fn weekday_aggregate(map: &PeriodMap) -> Vec<WeekdayStats> {
    let mut stats: Vec<WeekdayStats> = WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| WeekdayStats {
            weekday: i as u32,
            name: name.to_string(),
            trades: 0,
            wins: 0,
            total_pnl: 0.0,
            win_rate: 0.0,
        })
        .collect();

    for r in map.values().flat_map(|b| b.records.iter()) {
        let entry = &mut stats[r.date.weekday().num_days_from_sunday() as usize];
        entry.trades += 1;
        entry.total_pnl += r.pnl;
        if r.is_win() {
            entry.wins += 1;
        }
    }
    for s in stats.iter_mut() {
        s.win_rate = percent(s.wins, s.trades);
    }
    stats
}

pub fn emotion_frequency(map: &PeriodMap) -> EmotionFrequency {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    let mut total_emotions = 0;

    for r in map.values().flat_map(|b| b.records.iter()) {
        // a trade's tags are a set
        let tags: IndexSet<&str> = r.emotions.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
        for tag in tags {
            *counts.entry(tag).or_insert(0) += 1;
            total_emotions += 1;
        }
    }

    let distinct = counts.len();
    let mut ranked: Vec<EmotionCount> = counts
        .into_iter()
        .map(|(emotion, count)| EmotionCount {
            emotion: emotion.to_string(),
            count,
        })
        .collect();
    // stable: equal counts keep first-encountered order
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(EMOTION_TOP_N);

    EmotionFrequency {
        top: ranked,
        total_emotions,
        distinct,
    }
}

/// Drawdown of cumulative P/L from its running peak. The peak starts at
/// zero, the equity before the first period.
pub fn drawdown(map: &PeriodMap) -> DrawdownSeries {
    let mut peak: f64 = 0.0;
    let mut max_drawdown: f64 = 0.0;
    let points = cumulative_pnl(map)
        .into_iter()
        .map(|p| {
            peak = peak.max(p.cumulative);
            let dd = peak - p.cumulative;
            max_drawdown = max_drawdown.max(dd);
            DrawdownPoint {
                key: p.key,
                cumulative: p.cumulative,
                peak,
                drawdown: dd,
            }
        })
        .collect();

    DrawdownSeries {
        points,
        max_drawdown,
    }
}
