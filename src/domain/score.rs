//! Composite opportunity score.
//!
//! Six independent buckets read the current and previous rows of an
//! augmented series; their sum is capped at [`MAX_SCORE`].
//!
//! | bucket                 | max |
//! |------------------------|-----|
//! | momentum (RSI)         | 20  |
//! | trend (MACD)           | 20  |
//! | volume / flow (MFI)    | 20  |
//! | trend strength (ADX)   | 15  |
//! | direction (SuperTrend) | 15  |
//! | volatility band (%B)   | 10  |

use std::fmt;

use crate::domain::error::TrendscoreError;
use crate::domain::pipeline::{last_two, IndicatorRow};

pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    /// Clamps to [0, 100].
    pub fn new(value: u32) -> Self {
        Score(value.min(MAX_SCORE as u32) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_SCORE)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub momentum: u8,
    pub trend: u8,
    pub flow: u8,
    pub strength: u8,
    pub supertrend: u8,
    pub band: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> Score {
        Score::new(
            [
                self.momentum,
                self.trend,
                self.flow,
                self.strength,
                self.supertrend,
                self.band,
            ]
            .iter()
            .map(|&p| p as u32)
            .sum(),
        )
    }
}

pub fn score_calc(rows: &[IndicatorRow]) -> Result<Score, TrendscoreError> {
    Ok(score_breakdown(rows)?.total())
}

pub fn score_breakdown(rows: &[IndicatorRow]) -> Result<ScoreBreakdown, TrendscoreError> {
    let (p, l) = last_two(rows)?;

    let rsi = l.require("RSI", l.rsi)?;
    let macd = l.require("MACD", l.macd)?;
    let signal = l.require("MACD_SIGNAL", l.macd_signal)?;
    let prev_macd = p.require("MACD", p.macd)?;
    let volume_avg = l.require("VOLUME_SMA20", l.volume_sma20)?;
    let mfi = l.require("MFI", l.mfi)?;
    let prev_mfi = p.require("MFI", p.mfi)?;
    let adx = l.require("ADX", l.adx)?;
    let plus_di = l.require("DI+", l.plus_di)?;
    let minus_di = l.require("DI-", l.minus_di)?;
    let prev_adx = p.require("ADX", p.adx)?;
    let supertrend = l.require("SUPERTREND", l.supertrend)?;
    let percent_b = l.require("BBP", l.percent_b)?;

    Ok(ScoreBreakdown {
        momentum: momentum_points(rsi),
        trend: trend_points(macd, signal, prev_macd),
        flow: flow_points(l.bar.volume as f64, volume_avg, mfi, prev_mfi),
        strength: strength_points(adx, plus_di, minus_di, prev_adx),
        supertrend: supertrend_points(l.close(), supertrend),
        band: band_points(percent_b),
    })
}

/// Peaks in the 55–60 band and falls off symmetrically.
pub fn momentum_points(rsi: f64) -> u8 {
    if (55.0..=60.0).contains(&rsi) {
        20
    } else if (50.0..55.0).contains(&rsi) || (rsi > 60.0 && rsi <= 65.0) {
        15
    } else if (45.0..50.0).contains(&rsi) || (rsi > 65.0 && rsi <= 70.0) {
        10
    } else {
        0
    }
}

/// Scored only while the MACD line is above its signal.
pub fn trend_points(macd: f64, signal: f64, prev_macd: f64) -> u8 {
    if macd <= signal {
        0
    } else if macd > 0.0 && macd > prev_macd {
        20
    } else if macd > 0.0 {
        15
    } else {
        12
    }
}

pub fn flow_points(volume: f64, volume_avg: f64, mfi: f64, prev_mfi: f64) -> u8 {
    if volume > volume_avg * 1.5 && (50.0..=80.0).contains(&mfi) {
        20
    } else if volume > volume_avg * 1.2 && mfi > prev_mfi {
        15
    } else if volume > volume_avg {
        10
    } else {
        0
    }
}

pub fn strength_points(adx: f64, plus_di: f64, minus_di: f64, prev_adx: f64) -> u8 {
    if adx > 25.0 && plus_di > minus_di {
        15
    } else if (20.0..=25.0).contains(&adx) && adx > prev_adx {
        10
    } else {
        0
    }
}

pub fn supertrend_points(close: f64, supertrend: f64) -> u8 {
    if close > supertrend { 15 } else { 0 }
}

pub fn band_points(percent_b: f64) -> u8 {
    if percent_b > 0.8 {
        10
    } else if percent_b > 0.5 {
        5
    } else {
        0
    }
}
