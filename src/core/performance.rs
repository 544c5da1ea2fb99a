use serde::{Deserialize, Serialize};

use crate::core::percent;
use crate::models::NormalizedRecord;

/// Headline trading statistics over a slice of records, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub break_even_trades: usize,
    pub win_rate: f64,

    pub total_pnl: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub avg_trade: f64,
    /// `None` when there is no losing P/L to divide by.
    pub profit_factor: Option<f64>,
    pub best_trade: f64,
    pub worst_trade: f64,

    pub max_drawdown: f64,
}

impl PerformanceSummary {
    pub fn from_records(records: &[NormalizedRecord]) -> Self {
        let total_trades = records.len();
        if total_trades == 0 {
            return Self::default();
        }

        let wins: Vec<f64> = records.iter().filter(|r| r.is_win()).map(|r| r.pnl).collect();
        let losses: Vec<f64> = records.iter().filter(|r| r.is_loss()).map(|r| r.pnl).collect();

        let gross_profit: f64 = wins.iter().sum();
        let gross_loss: f64 = losses.iter().sum();
        let total_pnl: f64 = records.iter().map(|r| r.pnl).sum();

        let avg_win = if !wins.is_empty() {
            gross_profit / wins.len() as f64
        } else {
            0.0
        };
        let avg_loss = if !losses.is_empty() {
            gross_loss / losses.len() as f64
        } else {
            0.0
        };

        let profit_factor = if gross_loss.abs() > 0.0 {
            Some(gross_profit / gross_loss.abs())
        } else {
            None
        };

        let best_trade = records.iter().map(|r| r.pnl).fold(f64::NEG_INFINITY, f64::max);
        let worst_trade = records.iter().map(|r| r.pnl).fold(f64::INFINITY, f64::min);

        Self {
            total_trades,
            winning_trades: wins.len(),
            losing_trades: losses.len(),
            break_even_trades: total_trades - wins.len() - losses.len(),
            win_rate: percent(wins.len(), total_trades),
            total_pnl,
            gross_profit,
            gross_loss,
            avg_win,
            avg_loss,
            avg_trade: total_pnl / total_trades as f64,
            profit_factor,
            best_trade,
            worst_trade,
            max_drawdown: max_drawdown(records.iter().map(|r| r.pnl)),
        }
    }
}

/// Largest peak-to-trough fall of the running P/L, starting from zero.
pub fn max_drawdown(pnls: impl IntoIterator<Item = f64>) -> f64 {
    let mut equity = 0.0;
    let mut peak: f64 = 0.0;
    let mut max_dd: f64 = 0.0;
    for pnl in pnls {
        equity += pnl;
        peak = peak.max(equity);
        max_dd = max_dd.max(peak - equity);
    }
    max_dd
}
