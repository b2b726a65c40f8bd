/// Simple Moving Average (SMA)
/// Returns a vector aligned with `values`:
/// - `None` until enough values exist
/// - `Some(avg)` after `window` values
///
/// A window of zero, or one longer than the input, yields all `None`.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 || window > values.len() {
        return vec![None; values.len()];
    }

    // Running sum; subtract the value that falls out of the window.
    values
        .iter()
        .enumerate()
        .scan(0.0_f64, move |sum, (i, &v)| {
            *sum += v;
            if i >= window {
                *sum -= values[i - window];
            }

            let out = if i + 1 >= window {
                Some(*sum / window as f64)
            } else {
                None
            };

            Some(out)
        })
        .collect()
}

/// Period-over-period percent change of `values`.
///
/// Index 0 has no predecessor and is `None`. A previous value of zero also
/// yields `None` instead of an infinity.
pub fn daily_return(values: &[f64]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }

    std::iter::once(None)
        .chain(values.windows(2).map(|w| {
            let (prev, curr) = (w[0], w[1]);
            if prev == 0.0 {
                None
            } else {
                Some((curr - prev) / prev * 100.0)
            }
        }))
        .collect()
}

/// Relative Strength Index (RSI), Wilder's method.
///
/// Measures momentum by comparing recent gains to recent losses.
/// RSI values range from 0 to 100:
/// - Below 30: Oversold condition
/// - Above 70: Overbought condition
///
/// Calculation:
/// 1. Per-step gain = max(change, 0), loss = max(-change, 0). The first
///    observation has no predecessor and counts as a step with no change.
/// 2. Seed average gain/loss with the simple mean of the first `period` steps.
/// 3. Smooth afterwards: avg = (prev * (period - 1) + current) / period
/// 4. RSI = 100 - (100 / (1 + avg_gain / avg_loss)), or 100 when avg_loss is 0
///
/// The first value lands at index `period - 1`; everything before it is `None`.
pub fn rsi(prices: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; prices.len()];

    if period == 0 || prices.len() < period {
        return result;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = std::iter::once(0.0_f64)
        .chain(prices.windows(2).map(|w| w[1] - w[0]))
        .map(|c| (c.max(0.0), (-c).max(0.0)))
        .unzip();

    let p = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / p;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / p;

    result[period - 1] = Some(rsi_from_averages(avg_gain, avg_loss));

    for i in period..prices.len() {
        avg_gain = (avg_gain * (p - 1.0) + gains[i]) / p;
        avg_loss = (avg_loss * (p - 1.0) + losses[i]) / p;
        result[i] = Some(rsi_from_averages(avg_gain, avg_loss));
    }

    result
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
