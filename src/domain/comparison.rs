//! Multi-instrument scoring and ranking.
//!
//! Each instrument is fetched, run through the indicator pipeline and scored
//! independently on the rayon pool. Failures are collected as skipped symbols
//! rather than aborting the comparison.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::error::TrendscoreError;
use crate::domain::period::{Interval, Period};
use crate::domain::pipeline::{compute_indicators, AugmentedSeries};
use crate::domain::recommendation::Recommendation;
use crate::domain::score::{score_calc, Score};
use crate::domain::universe::Instrument;
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub symbol: String,
    pub ticker: String,
    pub score: Score,
    pub recommendation: Recommendation,
    pub last_close: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Fetch bars for one instrument and run them through the indicator pipeline.
pub fn load_series(
    data: &dyn DataPort,
    instrument: &Instrument,
    period: Period,
    interval: Interval,
) -> Result<AugmentedSeries, TrendscoreError> {
    let bars = data.fetch_ohlcv(&instrument.ticker, period, interval)?;
    if bars.is_empty() {
        return Err(TrendscoreError::DataUnavailable {
            symbol: instrument.ticker.clone(),
            reason: "no bars returned".into(),
        });
    }
    Ok(compute_indicators(&bars))
}

fn score_instrument(
    data: &dyn DataPort,
    instrument: &Instrument,
    period: Period,
    interval: Interval,
) -> Result<ComparisonRow, TrendscoreError> {
    let series = load_series(data, instrument, period, interval)?;
    let score = score_calc(&series.rows)?;
    let last_close = series.last().map(|r| r.close()).unwrap_or_default();

    Ok(ComparisonRow {
        symbol: instrument.name.clone(),
        ticker: instrument.ticker.clone(),
        score,
        recommendation: Recommendation::from_score(score),
        last_close,
    })
}

/// Score descending, then symbol ascending.
fn rank(a: &ComparisonRow, b: &ComparisonRow) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.symbol.cmp(&b.symbol))
}

pub fn compare(
    data: &dyn DataPort,
    instruments: &[Instrument],
    period: Period,
    interval: Interval,
) -> Comparison {
    let outcomes: Vec<(&Instrument, Result<ComparisonRow, TrendscoreError>)> = instruments
        .par_iter()
        .map(|instrument| (instrument, score_instrument(data, instrument, period, interval)))
        .collect();

    let mut comparison = Comparison::default();
    for (instrument, outcome) in outcomes {
        match outcome {
            Ok(row) => comparison.rows.push(row),
            Err(e) => {
                warn!(symbol = %instrument.name, error = %e, "skipping symbol");
                comparison.skipped.push(SkippedSymbol {
                    symbol: instrument.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    comparison.rows.sort_by(rank);
    info!(
        scored = comparison.rows.len(),
        skipped = comparison.skipped.len(),
        "comparison complete"
    );
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_hlcv;
    use crate::domain::ohlcv::OhlcvBar;
    use std::collections::HashMap;

    struct StubData {
        bars: HashMap<String, Vec<OhlcvBar>>,
    }

    impl DataPort for StubData {
        fn fetch_ohlcv(
            &self,
            ticker: &str,
            _period: Period,
            _interval: Interval,
        ) -> Result<Vec<OhlcvBar>, TrendscoreError> {
            self.bars
                .get(ticker)
                .cloned()
                .ok_or_else(|| TrendscoreError::DataUnavailable {
                    symbol: ticker.to_string(),
                    reason: "not found".into(),
                })
        }
    }

    fn series(count: usize, drift: f64) -> Vec<OhlcvBar> {
        let rows: Vec<(f64, f64, f64, i64)> = (0..count)
            .map(|i| {
                let c = 100.0 + drift * i as f64 + ((i % 4) as f64 - 1.5);
                (c + 1.0, c - 1.0, c, 5_000 + (i as i64 % 5) * 1_000)
            })
            .collect();
        make_hlcv(&rows)
    }

    fn instrument(name: &str) -> Instrument {
        Instrument {
            name: name.to_string(),
            ticker: format!("{name}.IS"),
        }
    }

    #[test]
    fn failures_are_skipped_not_fatal() {
        let mut bars = HashMap::new();
        bars.insert("UP.IS".to_string(), series(80, 0.5));
        bars.insert("SHORT.IS".to_string(), series(10, 0.5));
        bars.insert("EMPTY.IS".to_string(), Vec::new());
        let data = StubData { bars };

        let instruments = vec![
            instrument("UP"),
            instrument("SHORT"),
            instrument("MISSING"),
            instrument("EMPTY"),
        ];
        let result = compare(&data, &instruments, Period::Max, Interval::Daily);

        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].symbol, "UP");
        assert_eq!(result.rows[0].ticker, "UP.IS");

        let mut skipped: Vec<&str> = result.skipped.iter().map(|s| s.symbol.as_str()).collect();
        skipped.sort();
        assert_eq!(skipped, vec!["EMPTY", "MISSING", "SHORT"]);
        assert!(result
            .skipped
            .iter()
            .any(|s| s.reason.contains("not found")));
    }

    #[test]
    fn rows_are_ranked_by_score_then_symbol() {
        let row = |symbol: &str, score: u32| ComparisonRow {
            symbol: symbol.into(),
            ticker: symbol.into(),
            score: Score::new(score),
            recommendation: Recommendation::from_score(Score::new(score)),
            last_close: 1.0,
        };
        let mut rows = vec![row("B", 40), row("C", 80), row("A", 40), row("D", 95)];
        rows.sort_by(rank);
        let order: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(order, vec!["D", "C", "A", "B"]);
    }

    #[test]
    fn comparison_matches_single_instrument_score() {
        let mut bars = HashMap::new();
        bars.insert("UP.IS".to_string(), series(80, 0.5));
        bars.insert("DOWN.IS".to_string(), series(80, -0.5));
        let data = StubData { bars };
        let instruments = vec![instrument("UP"), instrument("DOWN")];

        let result = compare(&data, &instruments, Period::Max, Interval::Daily);
        assert_eq!(result.rows.len(), 2);
        assert!(result.rows[0].score >= result.rows[1].score);

        for row in &result.rows {
            let inst = instruments.iter().find(|i| i.name == row.symbol).unwrap();
            let series = load_series(&data, inst, Period::Max, Interval::Daily).unwrap();
            assert_eq!(score_calc(&series.rows).unwrap(), row.score);
        }
    }
}
