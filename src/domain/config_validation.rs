//! Configuration validation and typed settings.
//!
//! Every field is checked before a run starts so that a bad config fails fast
//! with the offending section and key.

use std::path::PathBuf;

use crate::domain::backtest::{
    BacktestConfig, DEFAULT_INITIAL_CAPITAL, DEFAULT_START_INDEX, DEFAULT_THRESHOLD,
};
use crate::domain::error::TrendscoreError;
use crate::domain::period::{Interval, Period};
use crate::domain::score::MAX_SCORE;
use crate::domain::universe::InstrumentMap;
use crate::ports::config_port::ConfigPort;

/// The scorer reads the previous row, so the walk-forward loop cannot start before row 2.
pub const MIN_START_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct DataSettings {
    pub path: PathBuf,
    pub period: Period,
    pub interval: Interval,
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), TrendscoreError> {
    data_settings(config)?;
    InstrumentMap::from_config(config)?;
    backtest_config(config)?;
    Ok(())
}

pub fn data_settings(config: &dyn ConfigPort) -> Result<DataSettings, TrendscoreError> {
    let path = match config.get_string("data", "path") {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
        _ => {
            return Err(TrendscoreError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            })
        }
    };

    let period = match config.get_string("data", "period") {
        Some(s) => s.parse::<Period>().map_err(|e| invalid("data", "period", e))?,
        None => Period::default(),
    };
    let interval = match config.get_string("data", "interval") {
        Some(s) => s.parse::<Interval>().map_err(|e| invalid("data", "interval", e))?,
        None => Interval::default(),
    };

    Ok(DataSettings {
        path,
        period,
        interval,
    })
}

pub fn backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, TrendscoreError> {
    let threshold = config
        .get_int("backtest", "threshold")?
        .unwrap_or(DEFAULT_THRESHOLD as i64);
    if !(0..=MAX_SCORE as i64).contains(&threshold) {
        return Err(invalid(
            "backtest",
            "threshold",
            format!("threshold must be between 0 and {MAX_SCORE}"),
        ));
    }

    let initial_capital = config
        .get_double("backtest", "initial_capital")?
        .unwrap_or(DEFAULT_INITIAL_CAPITAL);
    if !initial_capital.is_finite() || initial_capital <= 0.0 {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be positive",
        ));
    }

    let start_index = config
        .get_int("backtest", "start_index")?
        .unwrap_or(DEFAULT_START_INDEX as i64);
    if start_index < MIN_START_INDEX as i64 {
        return Err(invalid(
            "backtest",
            "start_index",
            format!("start_index must be at least {MIN_START_INDEX}"),
        ));
    }

    Ok(BacktestConfig {
        threshold: threshold as u8,
        initial_capital,
        start_index: start_index as usize,
    })
}

fn invalid(section: &str, key: &str, reason: impl ToString) -> TrendscoreError {
    TrendscoreError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
