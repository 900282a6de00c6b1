//! RSI (Relative Strength Index).
//!
//! Wilder's smoothing of average gain/loss:
//! - First average: simple mean of the first n changes
//! - Subsequent: avg = (prev_avg * (n-1) + current) / n
//!
//! RSI = 100 - (100 / (1 + avg_gain / avg_loss)); avg_loss == 0 gives 100.
//! Warmup: first n bars are invalid (n price changes are needed).

use crate::domain::indicator::{wilder_smooth, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| IndicatorPoint::invalid(b.date, IndicatorValue::Simple(0.0)))
        .collect();

    if period > 0 && bars.len() > period {
        let (gains, losses): (Vec<f64>, Vec<f64>) = bars
            .windows(2)
            .map(|w| {
                let change = w[1].close - w[0].close;
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let avg_gains = wilder_smooth(&gains, period);
        let avg_losses = wilder_smooth(&losses, period);

        // Smoothed entry k covers changes up to index period-1+k, i.e. bar period+k.
        for (k, (gain, loss)) in avg_gains.iter().zip(&avg_losses).enumerate() {
            let point = &mut values[period + k];
            point.valid = true;
            point.value = IndicatorValue::Simple(rsi_from_averages(*gain, *loss));
        }
    }

    IndicatorSeries { values }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
