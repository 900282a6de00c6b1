//! History window and bar interval for a data request.
//!
//! Periods use the familiar market-data shorthand: `90d`, `1mo`, `6mo`, `1y`,
//! `2y`, `ytd`, `max`. A period is measured back from the last available bar,
//! not from the wall clock, so results are reproducible on stored data.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind}: {value:?}")]
pub struct ParseRequestError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Days(u32),
    Months(u32),
    Years(u32),
    YearToDate,
    Max,
}

impl Default for Period {
    fn default() -> Self {
        Period::Years(1)
    }
}

impl Period {
    /// Exclusive lower bound on bar dates, or `None` for an unbounded window.
    pub fn window_start(&self, last: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Period::Days(n) => last.checked_sub_signed(Duration::days(n as i64)),
            Period::Months(n) => last.checked_sub_months(Months::new(n)),
            Period::Years(n) => last.checked_sub_months(Months::new(n.saturating_mul(12))),
            Period::YearToDate => NaiveDate::from_ymd_opt(last.year(), 1, 1)
                .and_then(|jan1| jan1.pred_opt()),
            Period::Max => None,
        }
    }

    /// The trailing bars that fall inside this period. `bars` must be sorted by date.
    pub fn trim<'a>(&self, bars: &'a [OhlcvBar]) -> &'a [OhlcvBar] {
        let Some(last) = bars.last() else {
            return bars;
        };
        match self.window_start(last.date) {
            Some(start) => {
                let first = bars.partition_point(|b| b.date <= start);
                &bars[first..]
            }
            None => bars,
        }
    }
}

impl FromStr for Period {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRequestError {
            kind: "period",
            value: s.to_string(),
        };
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "max" => return Ok(Period::Max),
            "ytd" => return Ok(Period::YearToDate),
            _ => {}
        }

        let split = token
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(err)?;
        let (digits, unit) = token.split_at(split);
        let n: u32 = digits.parse().map_err(|_| err())?;
        if n == 0 {
            return Err(err());
        }
        match unit {
            "d" => Ok(Period::Days(n)),
            "mo" => Ok(Period::Months(n)),
            "y" => Ok(Period::Years(n)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Days(n) => write!(f, "{n}d"),
            Period::Months(n) => write!(f, "{n}mo"),
            Period::Years(n) => write!(f, "{n}y"),
            Period::YearToDate => f.write_str("ytd"),
            Period::Max => f.write_str("max"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
}

impl FromStr for Interval {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Interval::Daily),
            "1wk" => Ok(Interval::Weekly),
            _ => Err(ParseRequestError {
                kind: "interval",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Daily => f.write_str("1d"),
            Interval::Weekly => f.write_str("1wk"),
        }
    }
}
