//! Average Directional Index with the +DI / -DI directional indicators.
//!
//! +DM = high - prev_high when it exceeds prev_low - low and is positive, else 0
//! -DM = prev_low - low when it exceeds high - prev_high and is positive, else 0
//! +DI = 100 × smoothed(+DM) / smoothed(TR), -DI likewise
//! DX  = 100 × |+DI - -DI| / (+DI + -DI)
//! ADX = Wilder-smoothed DX
//!
//! All smoothing is Wilder's, seeded with a simple mean. Warmup: first
//! (2n - 1) bars are invalid; the DI values are reported on the same rows as ADX.

use crate::domain::indicator::{wilder_smooth, IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_adx(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| {
            IndicatorPoint::invalid(
                b.date,
                IndicatorValue::Adx {
                    adx: 0.0,
                    plus_di: 0.0,
                    minus_di: 0.0,
                },
            )
        })
        .collect();

    if period == 0 || bars.len() < 2 {
        return IndicatorSeries { values };
    }

    let mut plus_dm = Vec::with_capacity(bars.len() - 1);
    let mut minus_dm = Vec::with_capacity(bars.len() - 1);
    let mut tr = Vec::with_capacity(bars.len() - 1);

    for w in bars.windows(2) {
        let (prev, cur) = (&w[0], &w[1]);
        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
        tr.push(cur.true_range(prev.close));
    }

    let smoothed_plus = wilder_smooth(&plus_dm, period);
    let smoothed_minus = wilder_smooth(&minus_dm, period);
    let smoothed_tr = wilder_smooth(&tr, period);

    // Entry j of the smoothed series belongs to bar period + j.
    let di: Vec<(f64, f64)> = smoothed_tr
        .iter()
        .zip(smoothed_plus.iter().zip(&smoothed_minus))
        .map(|(&atr, (&p, &m))| {
            if atr == 0.0 {
                (0.0, 0.0)
            } else {
                (100.0 * p / atr, 100.0 * m / atr)
            }
        })
        .collect();

    let dx: Vec<f64> = di
        .iter()
        .map(|&(p, m)| {
            let sum = p + m;
            if sum > 0.0 {
                100.0 * (p - m).abs() / sum
            } else {
                0.0
            }
        })
        .collect();

    // Entry m of the ADX series belongs to bar 2 * period - 1 + m.
    for (m, adx) in wilder_smooth(&dx, period).into_iter().enumerate() {
        let bar_idx = 2 * period - 1 + m;
        let (plus_di, minus_di) = di[period - 1 + m];
        values[bar_idx].valid = true;
        values[bar_idx].value = IndicatorValue::Adx {
            adx,
            plus_di,
            minus_di,
        };
    }

    IndicatorSeries { values }
}
