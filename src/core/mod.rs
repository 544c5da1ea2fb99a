pub mod bucketer;
pub mod compliance;
pub mod normalizer;
pub mod performance;
pub mod rollup;

pub use bucketer::{bucket, PeriodBucket, PeriodMap};
pub use compliance::{aggregate_compliance, compliance_overview, ComplianceOverview, ComplianceSummary, UnsetPolicy};
pub use normalizer::{normalize, Normalized};
pub use performance::PerformanceSummary;
pub use rollup::{rollup, RollupKind, RollupResult};

/// `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
