use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("invalid granularity '{0}' (expected day, week, month or year)")]
    InvalidGranularity(String),

    #[error("invalid unset policy '{0}' (expected not_respected or exclude)")]
    InvalidUnsetPolicy(String),

    #[error("missing required setting {0}")]
    MissingSetting(&'static str),

    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidNumber { key: &'static str, value: String },
}
