//! CSV file data adapter.
//!
//! Reads `<base>/<TICKER>.csv` with a header row naming at least `date`, `open`,
//! `high`, `low`, `close` and `volume` (any case, any order, extra columns
//! ignored). Rows with a blank, `NaN` or `null` field are dropped, as are rows
//! that fail `OhlcvBar::is_well_formed`.

use crate::domain::error::TrendscoreError;
use crate::domain::ohlcv::{resample_weekly, OhlcvBar};
use crate::domain::period::{Interval, Period};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }

    pub fn has_data(&self, ticker: &str) -> bool {
        self.csv_path(ticker).is_file()
    }

    fn unavailable(ticker: &str, reason: impl Into<String>) -> TrendscoreError {
        TrendscoreError::DataUnavailable {
            symbol: ticker.to_string(),
            reason: reason.into(),
        }
    }

    /// All usable rows in file order.
    fn read_bars(&self, ticker: &str) -> Result<Vec<OhlcvBar>, TrendscoreError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| {
            Self::unavailable(ticker, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| Self::unavailable(ticker, format!("CSV header error: {}", e)))?
            .clone();

        let mut index = [0usize; 6];
        for (slot, name) in index.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| Self::unavailable(ticker, format!("missing {} column", name)))?;
        }

        let mut bars = Vec::new();
        let mut dropped = 0usize;
        let mut malformed = 0usize;

        for (line, result) in rdr.records().enumerate() {
            let record = result
                .map_err(|e| Self::unavailable(ticker, format!("CSV parse error: {}", e)))?;

            let fields: Vec<&str> = index
                .iter()
                .map(|&i| record.get(i).unwrap_or("").trim())
                .collect();
            if fields.iter().any(|f| is_missing(f)) {
                dropped += 1;
                continue;
            }

            let row = line + 2;
            let date = parse_date(fields[0]).ok_or_else(|| {
                Self::unavailable(ticker, format!("invalid date {:?} on line {}", fields[0], row))
            })?;
            let number = |i: usize| -> Result<f64, TrendscoreError> {
                fields[i].parse::<f64>().map_err(|_| {
                    Self::unavailable(
                        ticker,
                        format!("invalid {} value {:?} on line {}", COLUMNS[i], fields[i], row),
                    )
                })
            };

            let bar = OhlcvBar {
                symbol: ticker.to_string(),
                date,
                open: number(1)?,
                high: number(2)?,
                low: number(3)?,
                close: number(4)?,
                volume: number(5)?.round() as i64,
            };
            if !bar.is_well_formed() {
                malformed += 1;
                continue;
            }
            bars.push(bar);
        }

        if dropped > 0 || malformed > 0 {
            debug!(ticker, dropped, malformed, "dropped unusable rows");
        }
        Ok(bars)
    }
}

fn is_missing(field: &str) -> bool {
    field.is_empty() || field.eq_ignore_ascii_case("nan") || field.eq_ignore_ascii_case("null")
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(field: &str) -> Option<NaiveDate> {
    let day = field.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Sort by date; when a date repeats the later row wins.
fn sort_and_dedup(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|b| b.date);
    let mut out: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(prev) if prev.date == bar.date => *prev = bar,
            _ => out.push(bar),
        }
    }
    out
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<OhlcvBar>, TrendscoreError> {
        let bars = sort_and_dedup(self.read_bars(ticker)?);
        let trimmed = period.trim(&bars);
        let bars = match interval {
            Interval::Daily => trimmed.to_vec(),
            Interval::Weekly => resample_weekly(trimmed),
        };

        if bars.is_empty() {
            return Err(Self::unavailable(ticker, "no usable rows"));
        }
        debug!(ticker, bars = bars.len(), %period, %interval, "loaded bars");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";
        fs::write(path.join("THYAO.IS.csv"), csv_content).unwrap();

        let messy = "Date,Open,High,Low,Close,Adj Close,Volume\n\
            2024-01-15 00:00:00+03:00,1,2,0.5,1.5,1.4,100.0\n\
            2024-01-16,1,2,0.5,NaN,1.4,100\n\
            2024-01-17,1,2,0.5,1.7,1.4,\n\
            2024-01-18,1,2,null,1.8,1.4,100\n\
            2024-01-19,1,2,0.5,1.9,1.4,100\n\
            2024-01-19,1,2,0.5,2.0,1.4,300\n";
        fs::write(path.join("ASELS.IS.csv"), messy).unwrap();

        let malformed = "date,open,high,low,close,volume\n\
            2024-01-15,10,11,9,10.5,100\n\
            2024-01-16,10,11,9,-1,100\n\
            2024-01-17,10,inf,9,10.5,100\n\
            2024-01-18,10,8,9,8.5,100\n\
            2024-01-19,10,11,9,10.5,-5\n\
            2024-01-22,10,11,9,0,100\n";
        fs::write(path.join("GARAN.IS.csv"), malformed).unwrap();

        fs::write(path.join("EMPTY.IS.csv"), "date,open,high,low,close,volume\n").unwrap();
        fs::write(path.join("BAD.IS.csv"), "date,open,high,low,close\n2024-01-15,1,1,1,1\n")
            .unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_ohlcv_returns_sorted_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("THYAO.IS", Period::Max, Interval::Daily)
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000);
        assert_eq!(bars[0].symbol, "THYAO.IS");
        assert_eq!(bars[2].date, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
    }

    #[test]
    fn drops_missing_fields_and_duplicate_dates() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("ASELS.IS", Period::Max, Interval::Daily)
            .unwrap();

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.5, 2.0]);
        assert_eq!(bars[1].volume, 300);
    }

    #[test]
    fn drops_malformed_bars() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("GARAN.IS", Period::Max, Interval::Daily)
            .unwrap();

        let days: Vec<u32> = bars.iter().map(|b| b.date.day()).collect();
        assert_eq!(days, vec![15, 22]);
        assert_eq!(bars[1].close, 0.0);
    }

    #[test]
    fn period_trims_relative_to_last_bar() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("THYAO.IS", Period::Days(1), Interval::Daily)
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
    }

    #[test]
    fn weekly_interval_resamples() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter
            .fetch_ohlcv("THYAO.IS", Period::Max, Interval::Weekly)
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].close, 115.0);
        assert_eq!(bars[0].volume, 165000);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_ohlcv("XYZ.IS", Period::Max, Interval::Daily);
        assert!(matches!(result, Err(TrendscoreError::DataUnavailable { symbol, .. }) if symbol == "XYZ.IS"));
        assert!(!adapter.has_data("XYZ.IS"));
        assert!(adapter.has_data("THYAO.IS"));
    }

    #[test]
    fn empty_file_is_unavailable() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_ohlcv("EMPTY.IS", Period::Max, Interval::Daily);
        assert!(matches!(result, Err(TrendscoreError::DataUnavailable { .. })));
    }

    #[test]
    fn missing_column_is_unavailable() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter
            .fetch_ohlcv("BAD.IS", Period::Max, Interval::Daily)
            .unwrap_err();
        assert!(err.to_string().contains("missing volume column"));
    }
}
