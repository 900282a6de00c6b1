//! Simple Moving Average over closes or volumes.
//!
//! SMA(n)[i] = mean(x[i-n+1..=i])
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    IndicatorSeries {
        values: to_points(bars, rolling_mean(&closes, period)),
    }
}

pub fn calculate_volume_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    IndicatorSeries {
        values: to_points(bars, rolling_mean(&volumes, period)),
    }
}

pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        if i >= period {
            sum -= values[i - period];
        }
        out.push(if i + 1 >= period {
            Some(sum / period as f64)
        } else {
            None
        });
    }
    out
}

fn to_points(bars: &[OhlcvBar], means: Vec<Option<f64>>) -> Vec<IndicatorPoint> {
    bars.iter()
        .zip(means)
        .map(|(bar, mean)| match mean {
            Some(v) => IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(v),
            },
            None => IndicatorPoint::invalid(bar.date, IndicatorValue::Simple(0.0)),
        })
        .collect()
}
