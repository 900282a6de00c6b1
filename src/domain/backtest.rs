//! Walk-forward score-threshold backtest.
//!
//! From `start_index` onwards, each day is scored using only rows up to and
//! including that day. A flat book buys with all cash at the close when the
//! score reaches the threshold; a long book sells everything at the close when
//! the score drops below it. No entry is taken at a close that is not a
//! positive finite price. The final value marks any open position to the
//! last close.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::error::TrendscoreError;
use crate::domain::pipeline::AugmentedSeries;
use crate::domain::position::{ClosedTrade, PositionState};
use crate::domain::score::{score_calc, Score};

pub const DEFAULT_THRESHOLD: u8 = 70;
pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;
/// First row at which every 50-bar lookback is satisfied.
pub const DEFAULT_START_INDEX: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub threshold: u8,
    pub initial_capital: f64,
    pub start_index: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            threshold: DEFAULT_THRESHOLD,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            start_index: DEFAULT_START_INDEX,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Enter,
    Exit,
    Hold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub date: NaiveDate,
    pub score: Score,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub trades: Vec<ClosedTrade>,
    pub decisions: Vec<Decision>,
    pub final_state: PositionState,
}

impl BacktestResult {
    pub fn return_pct(&self) -> f64 {
        (self.final_capital - self.initial_capital) / self.initial_capital * 100.0
    }

    pub fn ends_long(&self) -> bool {
        self.final_state.is_long()
    }
}

pub fn run_backtest(
    series: &AugmentedSeries,
    config: &BacktestConfig,
) -> Result<BacktestResult, TrendscoreError> {
    let mut state = PositionState::flat(config.initial_capital);
    let mut trades = Vec::new();
    let mut decisions = Vec::with_capacity(series.len().saturating_sub(config.start_index));
    let threshold = config.threshold;

    for i in config.start_index..series.len() {
        let score = score_calc(series.prefix(i))?;
        let row = &series.rows[i];
        let price = row.close();

        let wants_entry = !state.is_long() && score.value() >= threshold;
        let action = if wants_entry && !(price.is_finite() && price > 0.0) {
            debug!(date = %row.date(), %score, price, "entry skipped on unusable close");
            Action::Hold
        } else if wants_entry {
            state.enter(price, row.date());
            debug!(date = %row.date(), %score, price, "enter long");
            Action::Enter
        } else if state.is_long() && score.value() < threshold {
            let trade = state.exit(&row.bar.symbol, price, row.date());
            debug!(date = %row.date(), %score, price, pnl = trade.pnl, "exit long");
            trades.push(trade);
            Action::Exit
        } else {
            Action::Hold
        };

        decisions.push(Decision {
            date: row.date(),
            score,
            action,
        });
    }

    let final_capital = match series.last() {
        Some(last) => state.market_value(last.close()),
        None => state.capital,
    };

    Ok(BacktestResult {
        initial_capital: config.initial_capital,
        final_capital,
        trades,
        decisions,
        final_state: state,
    })
}
