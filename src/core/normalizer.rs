use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use std::collections::HashMap;

use crate::models::{NormalizedRecord, Respect, StrategyAnnotation, TradeRecord};

/// Output of one normalization pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub records: Vec<NormalizedRecord>,
    /// Trades dropped because their entry timestamp was missing or unreadable.
    pub skipped: usize,
}

/// Join trades with their annotations and resolve each entry to a calendar date.
///
/// Annotations are indexed once by trade id. When the same trade id shows up
/// more than once, the first annotation wins.
pub fn normalize(
    trades: &[TradeRecord],
    annotations: &[StrategyAnnotation],
    timezone: Option<Tz>,
) -> Normalized {
    let mut by_trade: HashMap<&str, &StrategyAnnotation> = HashMap::with_capacity(annotations.len());
    for a in annotations {
        by_trade.entry(a.trade_id.as_str()).or_insert(a);
    }

    let mut out = Normalized {
        records: Vec::with_capacity(trades.len()),
        skipped: 0,
    };

    for trade in trades {
        let date = match trade.entered_at.as_deref().and_then(|raw| entry_date(raw, timezone)) {
            Some(d) => d,
            None => {
                out.skipped += 1;
                continue;
            }
        };

        let record = match by_trade.get(trade.id.as_str()) {
            Some(a) => NormalizedRecord {
                trade_id: trade.id.clone(),
                date,
                pnl: trade.net_pnl,
                respected: Respect::from(a.strategy_respected),
                tp1: a.tp1_reached,
                tp2: a.tp2_plus_reached,
                emotions: a.dominant_emotions.clone(),
            },
            None => NormalizedRecord {
                trade_id: trade.id.clone(),
                date,
                pnl: trade.net_pnl,
                respected: Respect::Unset,
                tp1: false,
                tp2: false,
                emotions: Vec::new(),
            },
        };
        out.records.push(record);
    }

    out
}

/// Local calendar date of a raw entry timestamp.
///
/// Offset timestamps are shifted into `timezone`, or into the host's local
/// zone when none is given, never read off as their UTC date. Naive
/// timestamps and bare dates are already local and are taken as written.
pub fn entry_date(raw: &str, timezone: Option<Tz>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(match timezone {
            Some(tz) => dt.with_timezone(&tz).date_naive(),
            None => dt.with_timezone(&Local).date_naive(),
        });
    }

    if let Ok(ndt) = raw.parse::<NaiveDateTime>() {
        return Some(ndt.date());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(ndt.date());
    }
    if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        return Some(ndt.date());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
