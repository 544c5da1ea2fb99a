use chrono::NaiveDate;

use crate::config::Config;
use crate::core::UnsetPolicy;
use crate::models::{Granularity, NormalizedRecord, Respect, StrategyAnnotation, TradeRecord, TradeType};

/// A raw trade entered at `entered_at` with the given net P/L.
pub fn trade(id: &str, entered_at: &str, pnl: f64) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        entered_at: Some(entered_at.to_string()),
        net_pnl: pnl,
        contract_name: "MNQH4".to_string(),
        trade_type: Some(TradeType::Long),
    }
}

pub fn annotation(trade_id: &str, respected: Option<bool>) -> StrategyAnnotation {
    StrategyAnnotation {
        trade_id: trade_id.to_string(),
        strategy_respected: respected,
        tp1_reached: false,
        tp2_plus_reached: false,
        dominant_emotions: Vec::new(),
    }
}

/// A normalized record on `date` (YYYY-MM-DD).
pub fn record(date: &str, pnl: f64, respected: Option<bool>) -> NormalizedRecord {
    NormalizedRecord {
        trade_id: format!("{}:{}", date, pnl),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        pnl,
        respected: Respect::from(respected),
        tp1: false,
        tp2: false,
        emotions: Vec::new(),
    }
}

pub fn record_with_tp(date: &str, pnl: f64, respected: Option<bool>, tp1: bool, tp2: bool) -> NormalizedRecord {
    NormalizedRecord {
        tp1,
        tp2,
        ..record(date, pnl, respected)
    }
}

pub fn record_with_emotions(date: &str, emotions: &[&str]) -> NormalizedRecord {
    NormalizedRecord {
        emotions: emotions.iter().map(|e| e.to_string()).collect(),
        ..record(date, 0.0, None)
    }
}

/// Two weeks of trades with a mix of respected, broken and unannotated entries.
pub fn sample_journal() -> (Vec<TradeRecord>, Vec<StrategyAnnotation>) {
    let trades = vec![
        trade("1", "2024-01-15T09:31:00", 120.0),
        trade("2", "2024-01-15T10:05:00", -60.0),
        trade("3", "2024-01-16T14:20:00", 45.0),
        trade("4", "2024-01-17T09:45:00", -80.0),
        trade("5", "2024-01-17T11:10:00", 0.0),
        trade("6", "2024-01-22T09:35:00", 200.0),
        trade("7", "2024-01-23T15:55:00", -25.0),
        trade("8", "2024-01-24T10:00:00", 30.0),
    ];

    let mut a1 = annotation("1", Some(true));
    a1.tp1_reached = true;
    a1.dominant_emotions = vec!["calm".to_string(), "confident".to_string()];
    let mut a2 = annotation("2", Some(false));
    a2.dominant_emotions = vec!["fomo".to_string()];
    let mut a4 = annotation("4", Some(false));
    a4.dominant_emotions = vec!["fomo".to_string(), "frustrated".to_string()];
    let a5 = annotation("5", None);
    let mut a6 = annotation("6", Some(true));
    a6.tp1_reached = true;
    a6.tp2_plus_reached = true;
    a6.dominant_emotions = vec!["calm".to_string()];
    let a8 = annotation("8", Some(true));

    (trades, vec![a1, a2, a4, a5, a6, a8])
}

/// A config suitable for testing: per-day buckets, unset counted as not
/// respected, no data directory.
pub fn default_test_config() -> Config {
    Config {
        api_url: "http://localhost:8000/api".to_string(),
        data_dir: None,
        granularity: Granularity::Day,
        unset_policy: UnsetPolicy::TreatAsNotRespected,
        timezone: None,
        lookback_days: 30,
        log_level: "ERROR".to_string(),
    }
}
