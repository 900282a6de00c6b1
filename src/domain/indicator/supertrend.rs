//! SuperTrend, an ATR-banded trend-following overlay.
//!
//! Basic bands: hl2 ± multiplier × ATR(n). The trend flips up when the close
//! breaks above the previous upper band and down when it breaks below the
//! previous lower band. While the trend holds, the active band only moves in
//! the trend's favour (the lower band never falls in an up-trend, the upper
//! band never rises in a down-trend). The SuperTrend value is the lower band
//! in an up-trend and the upper band in a down-trend.
//!
//! Default parameters: period=10, multiplier=3.0. The first defined row is the
//! first ATR row, which starts in an up-trend.

use crate::domain::indicator::atr::atr_values;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 10;
pub const DEFAULT_MULTIPLIER_X100: u32 = 300;

pub fn calculate_supertrend(
    bars: &[OhlcvBar],
    period: usize,
    multiplier_x100: u32,
) -> IndicatorSeries {
    let mult = multiplier_x100 as f64 / 100.0;
    let atr = atr_values(bars, period);

    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| {
            IndicatorPoint::invalid(
                b.date,
                IndicatorValue::SuperTrend {
                    value: 0.0,
                    up_trend: true,
                },
            )
        })
        .collect();

    // (upper, lower, up_trend) of the previous defined row
    let mut prev: Option<(f64, f64, bool)> = None;

    for (i, bar) in bars.iter().enumerate() {
        let Some(atr) = atr[i] else { continue };

        let hl2 = bar.median_price();
        let mut upper = hl2 + mult * atr;
        let mut lower = hl2 - mult * atr;

        let up_trend = match prev {
            None => true,
            Some((prev_upper, prev_lower, prev_up)) => {
                if bar.close > prev_upper {
                    true
                } else if bar.close < prev_lower {
                    false
                } else {
                    if prev_up && lower < prev_lower {
                        lower = prev_lower;
                    }
                    if !prev_up && upper > prev_upper {
                        upper = prev_upper;
                    }
                    prev_up
                }
            }
        };

        values[i].valid = true;
        values[i].value = IndicatorValue::SuperTrend {
            value: if up_trend { lower } else { upper },
            up_trend,
        };
        prev = Some((upper, lower, up_trend));
    }

    IndicatorSeries { values }
}
