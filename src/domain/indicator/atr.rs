//! Average True Range.
//!
//! TR[0] = high - low, TR[i] = max(H-L, |H-C[i-1]|, |L-C[i-1]|).
//! ATR is seeded with the mean of the first n true ranges and then
//! Wilder-smoothed. Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{wilder_smooth, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::{true_ranges, OhlcvBar};

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_atr(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let atr = atr_values(bars, period);
    let values = bars
        .iter()
        .zip(atr)
        .map(|(bar, value)| match value {
            Some(v) => IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(v),
            },
            None => IndicatorPoint::invalid(bar.date, IndicatorValue::Simple(0.0)),
        })
        .collect();

    IndicatorSeries { values }
}

/// Raw ATR values aligned with `bars`; shared with SuperTrend.
pub(crate) fn atr_values(bars: &[OhlcvBar], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; bars.len()];
    for (k, atr) in wilder_smooth(&true_ranges(bars), period).into_iter().enumerate() {
        out[period - 1 + k] = Some(atr);
    }
    out
}
