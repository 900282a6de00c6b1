//! OHLCV bar representation.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// (high + low) / 2
    pub fn median_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Finite, non-negative prices with `low <= high`, and non-negative volume.
    pub fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p >= 0.0)
            && self.low <= self.high
            && self.volume >= 0
    }

    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// True range for every bar. The first bar has no previous close, so it uses high - low.
pub fn true_ranges(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                bar.high - bar.low
            } else {
                bar.true_range(bars[i - 1].close)
            }
        })
        .collect()
}

/// Aggregate daily bars into ISO-week bars dated on the last trading day of each week.
///
/// Input must already be sorted by date.
pub fn resample_weekly(bars: &[OhlcvBar]) -> Vec<OhlcvBar> {
    let mut weeks: Vec<OhlcvBar> = Vec::new();

    for bar in bars {
        let week = bar.date.iso_week();
        match weeks.last_mut() {
            Some(current) if current.date.iso_week() == week => {
                current.date = bar.date;
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume = current.volume.saturating_add(bar.volume);
            }
            _ => weeks.push(bar.clone()),
        }
    }

    weeks
}
