use serde::{Deserialize, Serialize};

use crate::core::compliance::{ComplianceOverview, ComplianceSummary, UnsetPolicy};
use crate::core::performance::PerformanceSummary;
use crate::core::rollup::{CumulativeAveragePoint, CumulativePnlPoint, DrawdownSeries, EmotionFrequency, WeekdayStats};
use crate::models::Granularity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub key: String,
    pub trades: usize,
    pub pnl: f64,
    pub compliance: ComplianceSummary,
}

/// Everything the calendar and chart views need from one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalReport {
    pub granularity: Granularity,
    pub policy: UnsetPolicy,
    pub total_input: usize,
    pub skipped: usize,

    pub periods: Vec<PeriodSummary>,
    pub compliance: ComplianceOverview,

    pub cumulative_pnl: Vec<CumulativePnlPoint>,
    pub cumulative_average: Vec<CumulativeAveragePoint>,
    pub drawdown: DrawdownSeries,
    pub weekdays: Vec<WeekdayStats>,
    pub emotions: EmotionFrequency,

    pub performance: PerformanceSummary,
}

impl JournalReport {
    pub fn print_summary(&self) {
        let p = &self.performance;
        println!("\n{}", "=".repeat(70));
        println!("  TRADING JOURNAL REPORT");
        println!("{}", "=".repeat(70));
        println!(
            "  Periods:     {} ({}) | unset policy: {}",
            self.periods.len(),
            self.granularity,
            self.policy
        );
        println!(
            "  Trades:      {} loaded, {} skipped",
            self.total_input, self.skipped
        );
        println!();
        println!("  PERFORMANCE");
        println!("  ───────────────────────────────────");
        println!("  PnL:         ${:+.2}", p.total_pnl);
        println!(
            "  W/L/BE:      {} / {} / {}",
            p.winning_trades, p.losing_trades, p.break_even_trades
        );
        println!("  Win Rate:    {:.1}%", p.win_rate);
        println!("  Avg Win:     ${:+.2}", p.avg_win);
        println!("  Avg Loss:    ${:+.2}", p.avg_loss);
        println!("  Best:        ${:+.2}", p.best_trade);
        println!("  Worst:       ${:+.2}", p.worst_trade);
        match p.profit_factor {
            Some(pf) => println!("  Profit Factor: {:.2}", pf),
            None => println!("  Profit Factor: n/a"),
        }
        println!("  Max DD:      ${:.2}", p.max_drawdown);
        println!();
        println!("  STRATEGY");
        println!("  ───────────────────────────────────");
        println!(
            "  Respected:   {} / {} ({:.1}%)",
            self.compliance.respected_count, self.compliance.total, self.compliance.global_rate
        );
        println!(
            "  Regularity:  {:.1}% over {} periods",
            self.compliance.regularity, self.compliance.periods_with_data
        );

        if !self.periods.is_empty() {
            println!();
            println!("  BY PERIOD");
            println!("  ───────────────────────────────────");
            for (period, cum) in self.periods.iter().zip(&self.cumulative_average) {
                println!(
                    "  {:>10}: {:>3} trades | PnL ${:+.2} | respected {:.0}% {} | TP1 {:.0}% | TP2+ {:.0}%",
                    period.key,
                    period.trades,
                    period.pnl,
                    period.compliance.percentage,
                    match cum.at_or_above_average {
                        Some(true) => "▲",
                        Some(false) => "▼",
                        None => "-",
                    },
                    period.compliance.tp1_rate,
                    period.compliance.tp2_rate,
                );
            }
        }

        let active: Vec<&WeekdayStats> = self.weekdays.iter().filter(|w| w.trades > 0).collect();
        if !active.is_empty() {
            println!();
            println!("  BY WEEKDAY");
            println!("  ───────────────────────────────────");
            for w in active {
                println!(
                    "  {:>9}: {} trades | WR {:.0}% | PnL ${:+.2}",
                    w.name, w.trades, w.win_rate, w.total_pnl
                );
            }
        }

        if !self.emotions.top.is_empty() {
            println!();
            println!("  EMOTIONS ({} tags)", self.emotions.total_emotions);
            println!("  ───────────────────────────────────");
            for e in &self.emotions.top {
                println!("  {:>12}: {}", e.emotion, e.count);
            }
        }

        println!("{}", "=".repeat(70));
    }
}
