//! Instrument map: display names to data-source tickers.
//!
//! Names come from the `[symbols]` config section (`THYAO = THYAO.IS`) and are
//! matched case-insensitively. A ticker may also be given directly.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::error::TrendscoreError;
use crate::ports::config_port::ConfigPort;

pub const SYMBOLS_SECTION: &str = "symbols";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub name: String,
    pub ticker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("symbol {0} has no ticker")]
    EmptyTicker(String),

    #[error("no symbols configured")]
    NoSymbols,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentMap {
    instruments: Vec<Instrument>,
}

impl InstrumentMap {
    pub fn new<I>(entries: I) -> Result<Self, UniverseError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut seen = HashSet::new();
        let mut instruments = Vec::new();

        for (name, ticker) in entries {
            let name = name.trim().to_uppercase();
            let ticker = ticker.trim().to_string();
            if name.is_empty() {
                return Err(UniverseError::EmptyToken);
            }
            if ticker.is_empty() {
                return Err(UniverseError::EmptyTicker(name));
            }
            if !seen.insert(name.clone()) {
                return Err(UniverseError::DuplicateSymbol(name));
            }
            instruments.push(Instrument { name, ticker });
        }

        instruments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(InstrumentMap { instruments })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TrendscoreError> {
        let map = Self::new(config.get_section(SYMBOLS_SECTION))?;
        if map.is_empty() {
            return Err(UniverseError::NoSymbols.into());
        }
        debug!(count = map.len(), "loaded instrument map");
        Ok(map)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Look up by display name, falling back to an exact ticker match.
    pub fn resolve(&self, name: &str) -> Result<&Instrument, TrendscoreError> {
        let wanted = name.trim();
        let upper = wanted.to_uppercase();
        self.instruments
            .iter()
            .find(|i| i.name == upper)
            .or_else(|| self.instruments.iter().find(|i| i.ticker.eq_ignore_ascii_case(wanted)))
            .ok_or_else(|| TrendscoreError::UnknownSymbol {
                name: wanted.to_string(),
            })
    }

    /// Resolve a comma-separated list of names, preserving order.
    pub fn select(&self, list: &str) -> Result<Vec<Instrument>, TrendscoreError> {
        parse_symbols(list)?
            .iter()
            .map(|name| self.resolve(name).cloned())
            .collect()
    }
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}
