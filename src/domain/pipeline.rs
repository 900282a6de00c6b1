//! Indicator pipeline: raw OHLCV bars to an indicator-augmented series.
//!
//! Each indicator is computed independently from the bars. Warm-up rows carry
//! `None` in the affected columns; the pipeline never fails on short input.

use chrono::NaiveDate;

use crate::domain::error::TrendscoreError;
use crate::domain::indicator::macd::calculate_macd_default;
use crate::domain::indicator::{
    adx, atr, bollinger, calculate_adx, calculate_atr, calculate_bollinger, calculate_mfi,
    calculate_rsi, calculate_sma, calculate_supertrend, calculate_volume_sma, mfi, rsi,
    supertrend, IndicatorPoint, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub const SMA_SHORT: usize = 20;
pub const SMA_LONG: usize = 50;
pub const VOLUME_SMA_PERIOD: usize = 20;

/// One bar with its derived indicator columns.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub bar: OhlcvBar,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub mfi: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub supertrend: Option<f64>,
    pub percent_b: Option<f64>,
    pub atr: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub volume_sma20: Option<f64>,
}

impl IndicatorRow {
    /// A row with no indicator columns filled in.
    pub fn bare(bar: OhlcvBar) -> Self {
        IndicatorRow {
            bar,
            rsi: None,
            macd: None,
            macd_signal: None,
            mfi: None,
            adx: None,
            plus_di: None,
            minus_di: None,
            supertrend: None,
            percent_b: None,
            atr: None,
            sma20: None,
            sma50: None,
            volume_sma20: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }

    /// The column value, or `UndefinedIndicatorValue` naming the column and date.
    pub fn require(&self, column: &'static str, value: Option<f64>) -> Result<f64, TrendscoreError> {
        value.ok_or(TrendscoreError::UndefinedIndicatorValue {
            column,
            date: self.bar.date,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmentedSeries {
    pub rows: Vec<IndicatorRow>,
}

impl AugmentedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// Rows `[0, end]` inclusive.
    pub fn prefix(&self, end: usize) -> &[IndicatorRow] {
        let len = (end + 1).min(self.rows.len());
        &self.rows[..len]
    }
}

/// The last two rows as `(previous, current)`.
pub fn last_two(rows: &[IndicatorRow]) -> Result<(&IndicatorRow, &IndicatorRow), TrendscoreError> {
    match rows {
        [.., prev, cur] => Ok((prev, cur)),
        _ => Err(TrendscoreError::InsufficientHistory {
            bars: rows.len(),
            minimum: 2,
        }),
    }
}

pub fn compute_indicators(bars: &[OhlcvBar]) -> AugmentedSeries {
    let rsi = calculate_rsi(bars, rsi::DEFAULT_PERIOD).simple_values();
    let macd = calculate_macd_default(bars);
    let mfi = calculate_mfi(bars, mfi::DEFAULT_PERIOD).simple_values();
    let adx = calculate_adx(bars, adx::DEFAULT_PERIOD);
    let supertrend = calculate_supertrend(
        bars,
        supertrend::DEFAULT_PERIOD,
        supertrend::DEFAULT_MULTIPLIER_X100,
    );
    let percent_b = calculate_bollinger(
        bars,
        bollinger::DEFAULT_PERIOD,
        bollinger::DEFAULT_STDDEV_MULT_X100,
    )
    .simple_values();
    let atr = calculate_atr(bars, atr::DEFAULT_PERIOD).simple_values();
    let sma20 = calculate_sma(bars, SMA_SHORT).simple_values();
    let sma50 = calculate_sma(bars, SMA_LONG).simple_values();
    let volume_sma20 = calculate_volume_sma(bars, VOLUME_SMA_PERIOD).simple_values();

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let mut row = IndicatorRow::bare(bar.clone());
            row.rsi = rsi[i];
            row.mfi = mfi[i];
            row.atr = atr[i];
            row.sma20 = sma20[i];
            row.sma50 = sma50[i];
            row.volume_sma20 = volume_sma20[i];
            row.percent_b = percent_b[i];

            if let Some(IndicatorValue::Macd { line, signal }) = valid_value(&macd.values, i) {
                row.macd = Some(*line);
                row.macd_signal = Some(*signal);
            }
            if let Some(IndicatorValue::Adx {
                adx,
                plus_di,
                minus_di,
            }) = valid_value(&adx.values, i)
            {
                row.adx = Some(*adx);
                row.plus_di = Some(*plus_di);
                row.minus_di = Some(*minus_di);
            }
            if let Some(IndicatorValue::SuperTrend { value, .. }) =
                valid_value(&supertrend.values, i)
            {
                row.supertrend = Some(*value);
            }
            row
        })
        .collect();

    AugmentedSeries { rows }
}

fn valid_value(points: &[IndicatorPoint], i: usize) -> Option<&IndicatorValue> {
    points.get(i).filter(|p| p.valid).map(|p| &p.value)
}
