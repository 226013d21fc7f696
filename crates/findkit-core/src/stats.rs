//! Mean and sample standard deviation.
//!
//! Degenerate inputs return `0.0` rather than NaN: an empty slice has mean
//! `0.0`, and fewer than two values have standard deviation `0.0`.

use serde::Serialize;

/// Arithmetic mean.
pub fn average64(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return 0.0;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Sample standard deviation (`n - 1` denominator).
pub fn standard_deviation64(vals: &[f64]) -> f64 {
    if vals.len() < 2 {
        return 0.0;
    }
    let mean = average64(vals);
    let ss: f64 = vals.iter().map(|&v| (v - mean).powi(2)).sum();
    (ss / (vals.len() - 1) as f64).sqrt()
}

/// Sample standard deviation of `f32` values, accumulated in `f64`.
pub fn standard_deviation(vals: &[f32]) -> f32 {
    if vals.len() < 2 {
        return 0.0;
    }
    let n = vals.len() as f64;
    let mean = vals.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let ss: f64 = vals.iter().map(|&v| (f64::from(v) - mean).powi(2)).sum();
    (ss / (n - 1.0)).sqrt() as f32
}

/// Count, mean and sample standard deviation of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn from_values(vals: &[f64]) -> Self {
        Self {
            count: vals.len(),
            mean: average64(vals),
            std_dev: standard_deviation64(vals),
        }
    }
}
