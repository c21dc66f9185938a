//! Descriptive statistics over plain `f64` slices.
//!
//! Every reduction runs over values sorted with `f64::total_cmp`, so the
//! result does not depend on input row order, down to the last bit.

/// Sort a copy of `values` into total order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Arithmetic mean; NaN when empty.
pub fn mean(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.iter().sum::<f64>() / sorted.len() as f64
}

/// Median; NaN when empty.
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Sample standard deviation (ddof = 1); NaN for fewer than two values.
pub fn sample_std(sorted: &[f64], mean: f64) -> f64 {
    let n = sorted.len();
    if n < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Quantile `q` in [0, 1] by linear interpolation between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}

pub fn describe(values: &[f64]) -> Descriptive {
    let sorted = sorted(values);
    let mean = mean(&sorted);
    Descriptive {
        count: sorted.len(),
        mean,
        median: median(&sorted),
        std: sample_std(&sorted, mean),
    }
}
