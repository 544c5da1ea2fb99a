pub mod granularity;
pub mod trade;

pub use granularity::Granularity;
pub use trade::{NormalizedRecord, Respect, StrategyAnnotation, TradeRecord, TradeType};
