//! Core domain types and logic.

pub mod ohlcv;
pub mod period;
pub mod indicator;
pub mod pipeline;
pub mod score;
pub mod recommendation;
pub mod position;
pub mod backtest;
pub mod snapshot;
pub mod comparison;
pub mod universe;
pub mod config_validation;
pub mod error;
