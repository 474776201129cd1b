//! Pure, stateless indicator transforms over candle series.
//!
//! Every transform returns one value per input candle, aligned by index with
//! the source series. Leading entries are `None` until the lookback window
//! has filled.

pub mod momentum;
pub mod snapshot;
pub mod structure;
pub mod volatility;

pub use snapshot::{IndicatorConfig, IndicatorSnapshot, MIN_ROWS};

/// Rolling maximum over a trailing window. `None` until `window` values exist.
pub(crate) fn rolling_max(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        w.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Rolling minimum over a trailing window.
pub(crate) fn rolling_min(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        w.iter().cloned().fold(f64::INFINITY, f64::min)
    })
}

/// Rolling arithmetic mean over a trailing window.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling sample standard deviation (ddof = 1) over a trailing window.
pub(crate) fn rolling_stdev(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| {
        let mean = w.iter().sum::<f64>() / w.len() as f64;
        let var = w.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        var.sqrt()
    })
}

/// Rolling mean over an already-optional series; any `None` inside the
/// window poisons the result for that index.
pub(crate) fn rolling_mean_opt(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
            continue;
        }
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_none()) {
            out.push(None);
        } else {
            let sum: f64 = slice.iter().filter_map(|v| *v).sum();
            out.push(Some(sum / window as f64));
        }
    }
    out
}

fn rolling<F>(values: &[f64], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
        } else {
            out.push(Some(f(&values[i + 1 - window..=i])));
        }
    }
    out
}
