//! Domain error types.

use chrono::NaiveDate;

use crate::domain::universe::UniverseError;

/// Top-level error type for trendscore.
#[derive(Debug, thiserror::Error)]
pub enum TrendscoreError {
    #[error("no data for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("insufficient history: have {bars} bars, need {minimum}")]
    InsufficientHistory { bars: usize, minimum: usize },

    #[error("indicator {column} is undefined on {date}")]
    UndefinedIndicatorValue { column: &'static str, date: NaiveDate },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown symbol: {name}")]
    UnknownSymbol { name: String },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TrendscoreError> for std::process::ExitCode {
    fn from(err: &TrendscoreError) -> Self {
        let code: u8 = match err {
            TrendscoreError::Io(_) => 1,
            TrendscoreError::ConfigParse { .. }
            | TrendscoreError::ConfigMissing { .. }
            | TrendscoreError::ConfigInvalid { .. } => 2,
            TrendscoreError::UnknownSymbol { .. } | TrendscoreError::Universe(_) => 3,
            TrendscoreError::DataUnavailable { .. } => 4,
            TrendscoreError::InsufficientHistory { .. }
            | TrendscoreError::UndefinedIndicatorValue { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
