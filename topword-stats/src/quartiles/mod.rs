// topword-stats/src/quartiles/mod.rs
use alloc::vec::Vec;

/// Quartiles read straight off a sorted sample, without interpolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartiles {
    /// Value at index `n / 4`.
    pub q1: f64,
    /// Value at index `n / 2`.
    pub median: f64,
    /// Value at index `n * 3 / 4`.
    pub q3: f64,
    /// `q3 - q1`.
    pub iqr: f64,
}

/// Sorts the values and picks the quartiles at integer indices.
///
/// Returns `None` for an empty sample.
pub fn index_quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let median = sorted[n / 2];
    let q3 = sorted[n * 3 / 4];
    let q1 = sorted[n / 4];

    Some(Quartiles {
        q1,
        median,
        q3,
        iqr: q3 - q1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_empty_sample() {
        assert!(index_quartiles(&[]).is_none());
    }

    #[test]
    fn test_single_value() {
        let q = index_quartiles(&[7.0]).unwrap();
        assert_eq!(q.q1, 7.0);
        assert_eq!(q.median, 7.0);
        assert_eq!(q.q3, 7.0);
        assert_eq!(q.iqr, 0.0);
    }

    #[test]
    fn test_integer_indices_without_interpolation() {
        // Sorted: 1 2 3 4 5 6 7 -> n/4 = 1, n/2 = 3, 3n/4 = 5.
        let values = vec![5.0, 1.0, 7.0, 3.0, 2.0, 6.0, 4.0];
        let q = index_quartiles(&values).unwrap();
        assert_eq!(q.q1, 2.0);
        assert_eq!(q.median, 4.0);
        assert_eq!(q.q3, 6.0);
        assert_eq!(q.iqr, 4.0);
    }

    #[test]
    fn test_even_length_takes_upper_middle() {
        // Sorted: 10 20 30 40 -> indices 1, 2, 3.
        let q = index_quartiles(&[40.0, 10.0, 30.0, 20.0]).unwrap();
        assert_eq!(q.q1, 20.0);
        assert_eq!(q.median, 30.0);
        assert_eq!(q.q3, 40.0);
    }
}
