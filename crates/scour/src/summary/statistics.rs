//! Descriptive statistics over plain `f64` samples.
//!
//! Every function returns `None` for samples too small to answer, or whose
//! answer would overflow, so no NaN or infinity ever reaches a finding or a
//! summary.

use std::cmp::Ordering;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let total: f64 = values.iter().sum();
    if total.is_finite() {
        return finite(total / n);
    }
    // the plain sum overflowed; scale before adding
    finite(values.iter().map(|v| v / n).sum())
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    finite((sum_sq / (values.len() - 1) as f64).sqrt())
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Sorted copy of the sample.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Linear-interpolated quantile of an ascending sample, `q` in `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = position - lo as f64;
    let value = sorted[lo] + (sorted[hi] - sorted[lo]) * frac;
    if value.is_finite() {
        Some(value)
    } else {
        finite(sorted[lo] * (1.0 - frac) + sorted[hi] * frac)
    }
}

/// Linear-interpolated quantile of an unsorted sample.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    quantile_sorted(&sorted(values), q)
}

/// Median (the 0.5 quantile).
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Smallest value.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

/// Largest value.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

/// All most-frequent values, ascending. Non-finite values are ignored.
pub fn modes(values: &[f64]) -> Vec<f64> {
    let finite_values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let sorted = sorted(&finite_values);
    let mut best = 0usize;
    let mut result: Vec<f64> = Vec::new();

    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        let run = j - i;
        if run > best {
            best = run;
            result.clear();
            result.push(sorted[i]);
        } else if run == best {
            result.push(sorted[i]);
        }
        i = j;
    }

    result
}

/// Interquartile range bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute Q1/Q3 and the fences `[Q1 - k*IQR, Q3 + k*IQR]`.
    pub fn compute(values: &[f64], multiplier: f64) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let (lower, upper) = (q1 - multiplier * iqr, q3 + multiplier * iqr);
        if !(iqr.is_finite() && lower.is_finite() && upper.is_finite()) {
            return None;
        }
        Some(Self { q1, q3, lower, upper })
    }

    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Check if a value falls outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}
