//! Bollinger %B.
//!
//! - Middle: SMA over n closes
//! - Upper/Lower: Middle ± (multiplier × population StdDev)
//! - %B: (close - lower) / (upper - lower); 0.5 when the bands collapse
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STDDEV_MULT_X100: u32 = 200;

/// %B series; each valid point is `IndicatorValue::Simple(percent_b)`.
pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    stddev_mult_x100: u32,
) -> IndicatorSeries {
    let mult = stddev_mult_x100 as f64 / 100.0;

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if period == 0 || i + 1 < period {
                return IndicatorPoint::invalid(bar.date, IndicatorValue::Simple(0.0));
            }

            let (upper, lower) = bands(&bars[i + 1 - period..=i], mult);
            let width = upper - lower;
            let percent_b = if width > 0.0 {
                (bar.close - lower) / width
            } else {
                0.5
            };

            IndicatorPoint {
                date: bar.date,
                valid: true,
                value: IndicatorValue::Simple(percent_b),
            }
        })
        .collect();

    IndicatorSeries { values }
}

/// (upper, lower) band over a full window of closes.
fn bands(window: &[OhlcvBar], mult: f64) -> (f64, f64) {
    let n = window.len() as f64;
    let middle = window.iter().map(|b| b.close).sum::<f64>() / n;
    let variance = window
        .iter()
        .map(|b| (b.close - middle).powi(2))
        .sum::<f64>()
        / n;
    let stddev = variance.sqrt();
    (middle + mult * stddev, middle - mult * stddev)
}
