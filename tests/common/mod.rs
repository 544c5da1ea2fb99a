use trade_journal_analytics::models::{StrategyAnnotation, TradeRecord, TradeType};

/// A raw trade entered at `entered_at` with the given net P/L.
pub fn trade(id: &str, entered_at: &str, pnl: f64) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        entered_at: Some(entered_at.to_string()),
        net_pnl: pnl,
        contract_name: "ESH4".to_string(),
        trade_type: Some(TradeType::Short),
    }
}

/// An annotation with optional TP flags and emotion tags.
pub fn annotation(
    trade_id: &str,
    respected: Option<bool>,
    tp1: bool,
    tp2: bool,
    emotions: &[&str],
) -> StrategyAnnotation {
    StrategyAnnotation {
        trade_id: trade_id.to_string(),
        strategy_respected: respected,
        tp1_reached: tp1,
        tp2_plus_reached: tp2,
        dominant_emotions: emotions.iter().map(|e| e.to_string()).collect(),
    }
}
