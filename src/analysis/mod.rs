pub mod analyzer;
pub mod report;

pub use analyzer::JournalAnalyzer;
pub use report::{JournalReport, PeriodSummary};
