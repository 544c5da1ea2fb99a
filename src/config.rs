use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::UnsetPolicy;
use crate::error::JournalError;
use crate::models::Granularity;

pub type SharedConfig = Arc<RwLock<Config>>;

/// Longest range the report binary will fetch, about ten years of days.
pub const MAX_LOOKBACK_DAYS: i64 = 3660;

#[derive(Debug, Clone)]
pub struct Config {
    // Data source
    pub api_url: String,
    pub data_dir: Option<String>,

    // Aggregation
    pub granularity: Granularity,
    pub unset_policy: UnsetPolicy,
    pub timezone: Option<Tz>,

    // Report
    pub lookback_days: i64,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, JournalError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value lookup. Empty values count as unset.
    ///
    /// `JOURNAL_UNSET_POLICY` has no default: the two policies give different
    /// respect percentages, so a missing value is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JournalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let unset_policy = get("JOURNAL_UNSET_POLICY")
            .ok_or(JournalError::MissingSetting("JOURNAL_UNSET_POLICY"))?
            .parse::<UnsetPolicy>()?;

        let granularity = match get("JOURNAL_GRANULARITY") {
            Some(v) => v.parse::<Granularity>()?,
            None => Granularity::Day,
        };

        let timezone = match get("JOURNAL_TIMEZONE") {
            Some(v) => Some(
                v.trim()
                    .parse::<Tz>()
                    .map_err(|_| JournalError::InvalidTimezone(v.clone()))?,
            ),
            None => None,
        };

        let lookback_days = match get("JOURNAL_LOOKBACK_DAYS") {
            Some(v) => v.trim().parse::<i64>().ok().filter(|d| (1..=MAX_LOOKBACK_DAYS).contains(d)).ok_or(
                JournalError::InvalidNumber {
                    key: "JOURNAL_LOOKBACK_DAYS",
                    value: v.clone(),
                },
            )?,
            None => 30,
        };

        Ok(Config {
            api_url: get("JOURNAL_API_URL")
                .unwrap_or_else(|| "http://localhost:8000/api".to_string())
                .trim_end_matches('/')
                .to_string(),
            data_dir: get("JOURNAL_DATA_DIR"),
            granularity,
            unset_policy,
            timezone,
            lookback_days,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_only_policy() {
        let cfg = Config::from_lookup(lookup(&[("JOURNAL_UNSET_POLICY", "exclude")])).unwrap();
        assert_eq!(cfg.unset_policy, UnsetPolicy::Exclude);
        assert_eq!(cfg.granularity, Granularity::Day);
        assert_eq!(cfg.api_url, "http://localhost:8000/api");
        assert!(cfg.data_dir.is_none());
        assert!(cfg.timezone.is_none());
        assert_eq!(cfg.lookback_days, 30);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn missing_policy_fails_fast() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, JournalError::MissingSetting("JOURNAL_UNSET_POLICY"));

        let err = Config::from_lookup(lookup(&[("JOURNAL_UNSET_POLICY", "  ")])).unwrap_err();
        assert_eq!(err, JournalError::MissingSetting("JOURNAL_UNSET_POLICY"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("JOURNAL_UNSET_POLICY", "exclude"),
            ("JOURNAL_GRANULARITY", "fortnight"),
        ]))
        .unwrap_err();
        assert_eq!(err, JournalError::InvalidGranularity("fortnight".to_string()));

        let err = Config::from_lookup(lookup(&[
            ("JOURNAL_UNSET_POLICY", "exclude"),
            ("JOURNAL_TIMEZONE", "Mars/Olympus"),
        ]))
        .unwrap_err();
        assert_eq!(err, JournalError::InvalidTimezone("Mars/Olympus".to_string()));

        let err = Config::from_lookup(lookup(&[
            ("JOURNAL_UNSET_POLICY", "exclude"),
            ("JOURNAL_LOOKBACK_DAYS", "-3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, JournalError::InvalidNumber { key: "JOURNAL_LOOKBACK_DAYS", .. }));
    }

    #[test]
    fn lookback_days_are_bounded() {
        let cfg = Config::from_lookup(lookup(&[
            ("JOURNAL_UNSET_POLICY", "exclude"),
            ("JOURNAL_LOOKBACK_DAYS", "3660"),
        ]))
        .unwrap();
        assert_eq!(cfg.lookback_days, MAX_LOOKBACK_DAYS);

        for huge in ["3661", "9223372036854775807"] {
            let err = Config::from_lookup(lookup(&[
                ("JOURNAL_UNSET_POLICY", "exclude"),
                ("JOURNAL_LOOKBACK_DAYS", huge),
            ]))
            .unwrap_err();
            assert_eq!(
                err,
                JournalError::InvalidNumber {
                    key: "JOURNAL_LOOKBACK_DAYS",
                    value: huge.to_string(),
                }
            );
        }
    }

    #[test]
    fn full_config() {
        let cfg = Config::from_lookup(lookup(&[
            ("JOURNAL_UNSET_POLICY", "not_respected"),
            ("JOURNAL_GRANULARITY", "month"),
            ("JOURNAL_TIMEZONE", "America/New_York"),
            ("JOURNAL_API_URL", "https://journal.example.com/api/"),
            ("JOURNAL_DATA_DIR", "exports"),
            ("JOURNAL_LOOKBACK_DAYS", "90"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.unset_policy, UnsetPolicy::TreatAsNotRespected);
        assert_eq!(cfg.granularity, Granularity::Month);
        assert_eq!(cfg.timezone, Some(chrono_tz::America::New_York));
        assert_eq!(cfg.api_url, "https://journal.example.com/api");
        assert_eq!(cfg.data_dir.as_deref(), Some("exports"));
        assert_eq!(cfg.lookback_days, 90);
        assert_eq!(cfg.log_level, "debug");
    }

    #[tokio::test]
    async fn shared_config_is_writable() {
        let cfg = Config::from_lookup(lookup(&[("JOURNAL_UNSET_POLICY", "exclude")])).unwrap();
        let shared = cfg.shared();
        shared.write().await.granularity = Granularity::Week;
        assert_eq!(shared.read().await.granularity, Granularity::Week);
    }
}
