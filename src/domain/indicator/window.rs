//! Rolling-window primitives shared by the indicator modules.
//!
//! A window that is not yet full, or that contains a missing value, produces
//! a missing output.

use crate::domain::indicator::Smoothing;

pub(crate) fn present(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// True when every value in the window is identical.
pub(crate) fn is_flat(window: &[f64]) -> bool {
    window.windows(2).all(|pair| pair[0] == pair[1])
}

/// Arithmetic mean. A flat window returns its value exactly, so deviations
/// from it are exactly zero rather than rounding noise.
pub(crate) fn mean(window: &[f64]) -> f64 {
    if is_flat(window) {
        return window.first().copied().unwrap_or(f64::NAN);
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Population standard deviation; exactly zero for a flat window.
pub(crate) fn population_stddev(window: &[f64]) -> f64 {
    if is_flat(window) {
        return 0.0;
    }
    let m = mean(window);
    let variance = window.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / window.len() as f64;
    variance.sqrt()
}

/// Applies `f` to every full trailing window of `window` values.
pub(crate) fn rolling<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut buf: Vec<f64> = Vec::with_capacity(window);

    for i in 0..values.len() {
        if window == 0 || i + 1 < window {
            out.push(None);
            continue;
        }
        buf.clear();
        for v in &values[i + 1 - window..=i] {
            match v {
                Some(x) => buf.push(*x),
                None => break,
            }
        }
        if buf.len() == window {
            out.push(f(&buf));
        } else {
            out.push(None);
        }
    }

    out
}

pub(crate) fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |w| Some(mean(w)))
}

/// Smooths `values` over `period` with the given convention.
pub(crate) fn smooth(values: &[Option<f64>], period: usize, smoothing: Smoothing) -> Vec<Option<f64>> {
    match smoothing {
        Smoothing::Simple => rolling_mean(values, period),
        Smoothing::Wilder => wilder(values, period),
    }
}

fn wilder(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if period == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let n = period as f64;
    let mut seed: Vec<f64> = Vec::with_capacity(period);
    let mut avg: Option<f64> = None;

    for v in values {
        match (*v, avg) {
            (None, _) => {
                // gap: reseed from scratch
                seed.clear();
                avg = None;
                out.push(None);
            }
            (Some(x), Some(prev)) => {
                let next = (prev * (n - 1.0) + x) / n;
                avg = Some(next);
                out.push(Some(next));
            }
            (Some(x), None) => {
                seed.push(x);
                if seed.len() == period {
                    let first = mean(&seed);
                    avg = Some(first);
                    out.push(Some(first));
                } else {
                    out.push(None);
                }
            }
        }
    }

    out
}

/// `numerator / denominator`, missing when the denominator is zero.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
