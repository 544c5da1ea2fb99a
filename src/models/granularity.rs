use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JournalError;

/// Calendar period used to group trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Period key for a local calendar date.
    ///
    /// Keys are built from the date's own fields, never from a UTC
    /// conversion, so a trade entered at 23:30 local time stays on its day.
    pub fn period_key(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
            Granularity::Week => {
                let iso = date.iso_week();
                format!("{:04}-W{:02}", iso.year(), iso.week())
            }
            Granularity::Month => format!("{:04}-{:02}", date.year(), date.month()),
            Granularity::Year => format!("{:04}", date.year()),
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Granularity> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" | "d" => Some(Granularity::Day),
            "week" | "weekly" | "w" => Some(Granularity::Week),
            "month" | "monthly" | "m" => Some(Granularity::Month),
            "year" | "yearly" | "y" => Some(Granularity::Year),
            _ => None,
        }
    }
}

impl FromStr for Granularity {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::from_str_loose(s).ok_or_else(|| JournalError::InvalidGranularity(s.to_string()))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_month_year_keys() {
        let d = date(2024, 3, 7);
        assert_eq!(Granularity::Day.period_key(d), "2024-03-07");
        assert_eq!(Granularity::Month.period_key(d), "2024-03");
        assert_eq!(Granularity::Year.period_key(d), "2024");
    }

    #[test]
    fn week_key_uses_iso_year() {
        // 2021-01-01 is a Friday in ISO week 53 of 2020
        assert_eq!(Granularity::Week.period_key(date(2021, 1, 1)), "2020-W53");
        // 2024-12-30 is a Monday in ISO week 1 of 2025
        assert_eq!(Granularity::Week.period_key(date(2024, 12, 30)), "2025-W01");
        assert_eq!(Granularity::Week.period_key(date(2024, 1, 15)), "2024-W03");
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("Week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("monthly".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(Granularity::from_str_loose(" d "), Some(Granularity::Day));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "quarter".parse::<Granularity>().unwrap_err();
        assert_eq!(err, JournalError::InvalidGranularity("quarter".to_string()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for g in [Granularity::Day, Granularity::Week, Granularity::Month, Granularity::Year] {
            assert_eq!(g.to_string().parse::<Granularity>().unwrap(), g);
        }
    }
}
