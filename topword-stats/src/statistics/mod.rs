use libm::sqrt;

/// Location and spread of a set of word counts (or chunk sizes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountStats {
    /// The arithmetic mean of the values.
    pub mean: f64,
    /// Population standard deviation, `sqrt(Σ(x - mean)² / n)`.
    pub std_dev: f64,
}

/// Calculates mean and population standard deviation for a slice of values.
pub fn compute_stats(values: &[f64]) -> CountStats {
    if values.is_empty() {
        return CountStats { mean: 0.0, std_dev: 0.0 };
    }

    let len = values.len() as f64;
    let mean = values.iter().sum::<f64>() / len;
    let variance = sum_of_squared_deviations(values, mean) / len;

    CountStats {
        mean,
        std_dev: sqrt(variance),
    }
}

/// The spread used by the standard-error band policies.
///
/// This is `sqrt(Σ(x - mean)²) / n`: the division by `n` happens after the
/// square root, so it is not the textbook standard deviation. Band cut-offs
/// depend on this exact formula.
pub fn band_spread(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sqrt(sum_of_squared_deviations(values, mean)) / values.len() as f64
}

fn sum_of_squared_deviations(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
}
