use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    #[serde(alias = "long", alias = "LONG")]
    Long,
    #[serde(alias = "short", alias = "SHORT")]
    Short,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Long => write!(f, "Long"),
            TradeType::Short => write!(f, "Short"),
        }
    }
}

/// A closed trade as returned by the journal backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Raw entry timestamp; parsed during normalization.
    #[serde(default)]
    pub entered_at: Option<String>,
    #[serde(default)]
    pub net_pnl: f64,
    #[serde(default)]
    pub contract_name: String,
    #[serde(default)]
    pub trade_type: Option<TradeType>,
}

/// The trader's self-assessment attached to one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyAnnotation {
    #[serde(deserialize_with = "string_or_number")]
    pub trade_id: String,
    #[serde(default)]
    pub strategy_respected: Option<bool>,
    #[serde(default)]
    pub tp1_reached: bool,
    #[serde(default)]
    pub tp2_plus_reached: bool,
    #[serde(default)]
    pub dominant_emotions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Respect {
    Respected,
    NotRespected,
    Unset,
}

impl From<Option<bool>> for Respect {
    fn from(v: Option<bool>) -> Self {
        match v {
            Some(true) => Respect::Respected,
            Some(false) => Respect::NotRespected,
            None => Respect::Unset,
        }
    }
}

impl fmt::Display for Respect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Respect::Respected => write!(f, "respected"),
            Respect::NotRespected => write!(f, "not_respected"),
            Respect::Unset => write!(f, "unset"),
        }
    }
}

/// One trade joined with its annotation, dated in local calendar time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub trade_id: String,
    pub date: NaiveDate,
    pub pnl: f64,
    pub respected: Respect,
    pub tp1: bool,
    pub tp2: bool,
    pub emotions: Vec<String>,
}

impl NormalizedRecord {
    pub fn is_win(&self) -> bool {
        self.pnl > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_deserializes_camel_case_with_numeric_id() {
        let json = r#"{
            "id": 42,
            "enteredAt": "2024-01-15T09:30:00",
            "netPnl": -12.5,
            "contractName": "MNQH4",
            "tradeType": "Short"
        }"#;
        let t: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, "42");
        assert_eq!(t.entered_at.as_deref(), Some("2024-01-15T09:30:00"));
        assert!((t.net_pnl + 12.5).abs() < 1e-9);
        assert_eq!(t.trade_type, Some(TradeType::Short));
    }

    #[test]
    fn trade_tolerates_missing_fields() {
        let t: TradeRecord = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(t.id, "abc");
        assert!(t.entered_at.is_none());
        assert_eq!(t.net_pnl, 0.0);
        assert!(t.trade_type.is_none());
    }

    #[test]
    fn annotation_null_respected_is_unset() {
        let json = r#"{"tradeId": 7, "strategyRespected": null, "tp2PlusReached": true}"#;
        let a: StrategyAnnotation = serde_json::from_str(json).unwrap();
        assert_eq!(a.trade_id, "7");
        assert_eq!(Respect::from(a.strategy_respected), Respect::Unset);
        // tp2 without tp1 is kept as-is
        assert!(!a.tp1_reached);
        assert!(a.tp2_plus_reached);
        assert!(a.dominant_emotions.is_empty());
    }

    #[test]
    fn respect_from_option() {
        assert_eq!(Respect::from(Some(true)), Respect::Respected);
        assert_eq!(Respect::from(Some(false)), Respect::NotRespected);
        assert_eq!(Respect::from(None), Respect::Unset);
    }

    #[test]
    fn trade_type_accepts_lowercase() {
        let t: TradeType = serde_json::from_str(r#""long""#).unwrap();
        assert_eq!(t, TradeType::Long);
    }
}
