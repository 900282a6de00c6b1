//! Market data access port trait.

use crate::domain::error::TrendscoreError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::period::{Interval, Period};

pub trait DataPort: Send + Sync {
    /// Bars for `ticker`, sorted by date with no duplicates, covering `period`
    /// at the requested `interval`. An empty result is `DataUnavailable`.
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<OhlcvBar>, TrendscoreError>;
}
