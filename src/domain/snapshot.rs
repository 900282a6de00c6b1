//! Point-in-time view of an instrument: score, recommendation and ATR levels.

use chrono::NaiveDate;

use crate::domain::error::TrendscoreError;
use crate::domain::pipeline::{last_two, AugmentedSeries};
use crate::domain::recommendation::Recommendation;
use crate::domain::score::{score_breakdown, Score, ScoreBreakdown};

pub const STOP_ATR_MULT: f64 = 2.0;
pub const TARGET_ATR_MULT: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub symbol: String,
    pub as_of: NaiveDate,
    pub score: Score,
    pub breakdown: ScoreBreakdown,
    pub recommendation: Recommendation,
    pub last_close: f64,
    pub atr: f64,
    pub stop_loss: f64,
    pub target: f64,
}

impl Snapshot {
    pub fn from_series(series: &AugmentedSeries) -> Result<Self, TrendscoreError> {
        let breakdown = score_breakdown(&series.rows)?;
        let (_, last) = last_two(&series.rows)?;
        let atr = last.require("ATR", last.atr)?;
        let close = last.close();
        let score = breakdown.total();

        Ok(Snapshot {
            symbol: last.bar.symbol.clone(),
            as_of: last.date(),
            score,
            breakdown,
            recommendation: Recommendation::from_score(score),
            last_close: close,
            atr,
            stop_loss: close - STOP_ATR_MULT * atr,
            target: close + TARGET_ATR_MULT * atr,
        })
    }
}
