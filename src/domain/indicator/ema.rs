//! Exponential Moving Average.
//!
//! k = 2/(n+1), seed with first SMA, then EMA[i] = x[i]*k + EMA[i-1]*(1-k).
//! Warmup: the first (n-1) entries are undefined.

/// SMA-seeded EMA over an arbitrary value sequence.
pub(crate) fn ema_of(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i < period - 1 {
                sum += value;
                None
            } else if i == period - 1 {
                sum += value;
                ema = sum / period as f64;
                Some(ema)
            } else {
                ema = value * k + ema * (1.0 - k);
                Some(ema)
            }
        })
        .collect()
}
