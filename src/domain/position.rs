//! All-in / all-out position state for the backtest.

use chrono::NaiveDate;

/// Either flat (cash only) or long (shares only); never both.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionState {
    pub capital: f64,
    pub shares: f64,
    pub entry_price: f64,
    pub entry_date: Option<NaiveDate>,
}

impl PositionState {
    pub fn flat(capital: f64) -> Self {
        PositionState {
            capital,
            shares: 0.0,
            entry_price: 0.0,
            entry_date: None,
        }
    }

    pub fn is_long(&self) -> bool {
        self.shares > 0.0
    }

    /// Cash when flat, shares marked at `price` when long.
    pub fn market_value(&self, price: f64) -> f64 {
        if self.is_long() {
            self.shares * price
        } else {
            self.capital
        }
    }

    /// Convert all cash into shares at `price`.
    pub fn enter(&mut self, price: f64, date: NaiveDate) {
        self.shares = self.capital / price;
        self.capital = 0.0;
        self.entry_price = price;
        self.entry_date = Some(date);
    }

    /// Convert all shares back into cash at `price`.
    pub fn exit(&mut self, symbol: &str, price: f64, date: NaiveDate) -> ClosedTrade {
        let shares = self.shares;
        let entry_value = shares * self.entry_price;
        self.capital = shares * price;
        self.shares = 0.0;

        ClosedTrade {
            symbol: symbol.to_string(),
            shares,
            entry_price: self.entry_price,
            exit_price: price,
            entry_date: self.entry_date.take().unwrap_or(date),
            exit_date: date,
            pnl: self.capital - entry_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub symbol: String,
    pub shares: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    pub pnl: f64,
}

impl ClosedTrade {
    pub fn return_pct(&self) -> f64 {
        (self.exit_price - self.entry_price) / self.entry_price * 100.0
    }
}
