#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt::Write as _;
use trendscore::domain::error::TrendscoreError;
pub use trendscore::domain::ohlcv::OhlcvBar;
use trendscore::domain::period::{Interval, Period};
use trendscore::domain::universe::Instrument;
use trendscore::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        period: Period,
        _interval: Interval,
    ) -> Result<Vec<OhlcvBar>, TrendscoreError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TrendscoreError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(bars) if !bars.is_empty() => Ok(period.trim(bars).to_vec()),
            _ => Err(TrendscoreError::DataUnavailable {
                symbol: ticker.to_string(),
                reason: "no bars".into(),
            }),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn instrument(name: &str) -> Instrument {
    Instrument {
        name: name.to_string(),
        ticker: format!("{name}.IS"),
    }
}

/// Daily bars with a linear drift plus a deterministic wobble, so every
/// indicator has non-degenerate input.
pub fn generate_bars(
    ticker: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
    drift: f64,
) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let t = i as f64;
            let close = start_price + drift * t + (t / 2.5).sin() * 2.0;
            OhlcvBar {
                symbol: ticker.to_string(),
                date: start + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.2,
                low: close - 1.2,
                close,
                volume: 10_000 + ((i * 37) % 11) as i64 * 900,
            }
        })
        .collect()
}

/// Render bars in the on-disk CSV layout the file adapter reads.
pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for b in bars {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            b.date, b.open, b.high, b.low, b.close, b.volume
        )
        .unwrap();
    }
    out
}
