//! Technical indicator implementations.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorSeries`: A time series of indicator values
//!
//! Every calculator returns one point per input bar. Points inside the
//! warm-up window carry `valid == false`.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod rsi;
pub mod sma;
pub mod supertrend;

pub use adx::calculate_adx;
pub use atr::calculate_atr;
pub use bollinger::calculate_bollinger;
pub use macd::calculate_macd;
pub use mfi::calculate_mfi;
pub use rsi::calculate_rsi;
pub use sma::{calculate_sma, calculate_volume_sma};
pub use supertrend::calculate_supertrend;

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    pub fn invalid(date: NaiveDate, value: IndicatorValue) -> Self {
        IndicatorPoint {
            date,
            valid: false,
            value,
        }
    }

    /// The scalar value, if this point is valid and single-valued.
    pub fn simple(&self) -> Option<f64> {
        match (self.valid, &self.value) {
            (true, IndicatorValue::Simple(v)) => Some(*v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
    },
    Adx {
        adx: f64,
        plus_di: f64,
        minus_di: f64,
    },
    SuperTrend {
        value: f64,
        up_trend: bool,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Valid scalar values as `Option`s, one per bar.
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(IndicatorPoint::simple).collect()
    }
}

/// Wilder smoothing over `values`, seeded with the simple mean of the first
/// `period` entries. Entry `k` of the result corresponds to `values[period - 1 + k]`.
pub(crate) fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(values.len() - period + 1);
    let mut current = values[..period].iter().sum::<f64>() / period as f64;
    result.push(current);

    for value in &values[period..] {
        current = (current * (period - 1) as f64 + value) / period as f64;
        result.push(current);
    }

    result
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    /// Flat bars (open == high == low == close) on consecutive days.
    pub fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: "TEST".into(),
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    /// Bars with explicit high/low/close/volume on consecutive days.
    pub fn make_hlcv(rows: &[(f64, f64, f64, i64)]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, &(high, low, close, volume))| OhlcvBar {
                symbol: "TEST".into(),
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high,
                low,
                close,
                volume,
            })
            .collect()
    }
}
