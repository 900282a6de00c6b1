//! Money Flow Index, a volume-weighted RSI analogue.
//!
//! Raw money flow = typical price × volume. A bar's flow counts as positive
//! when its typical price rose against the previous bar, negative when it fell.
//! MFI = 100 - 100 / (1 + positive_sum / negative_sum) over the last n flows;
//! no negative flow gives 100.
//! Warmup: first n bars are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_mfi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values: Vec<IndicatorPoint> = bars
        .iter()
        .map(|b| IndicatorPoint::invalid(b.date, IndicatorValue::Simple(0.0)))
        .collect();

    if period > 0 && bars.len() > period {
        // flows[k] belongs to bar k + 1
        let flows: Vec<(f64, f64)> = bars
            .windows(2)
            .map(|w| {
                let (prev_tp, tp) = (w[0].typical_price(), w[1].typical_price());
                let raw = tp * w[1].volume as f64;
                if tp > prev_tp {
                    (raw, 0.0)
                } else if tp < prev_tp {
                    (0.0, raw)
                } else {
                    (0.0, 0.0)
                }
            })
            .collect();

        for i in period..bars.len() {
            let window = &flows[i - period..i];
            let positive: f64 = window.iter().map(|f| f.0).sum();
            let negative: f64 = window.iter().map(|f| f.1).sum();

            let mfi = if negative == 0.0 {
                100.0
            } else {
                100.0 - 100.0 / (1.0 + positive / negative)
            };

            values[i].valid = true;
            values[i].value = IndicatorValue::Simple(mfi);
        }
    }

    IndicatorSeries { values }
}
