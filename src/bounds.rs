//! Per-axis bracketing of a query value between lattice samples

/// Sorted, distinct sample values along one spatial axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSamples {
    values: Vec<f64>,
}

impl AxisSamples {
    /// Collect samples, sorting and dropping duplicates
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut values: Vec<f64> = values.into_iter().map(|v| v + 0.0).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Bracket `query` between two samples, see [`find_bounds`]
    pub fn bounds(&self, query: f64) -> (f64, f64) {
        find_bounds(query, &self.values)
    }
}

/// Find the tightest `(lower, upper)` pair of samples around `query`
///
/// `samples` must be sorted ascending without duplicates. `lower` is the
/// greatest sample `<= query` and `upper` the least sample `> query`, each
/// falling back to the minimum/maximum sample when nothing qualifies.
///
/// A query equal to the maximum sample brackets against the second-highest
/// sample so the pair stays distinct at the top edge. Queries below the
/// minimum or above the maximum produce a degenerate pair (`lower == upper`),
/// which the sampler treats as a zero-width axis.
///
/// An empty sample set yields `(query, query)`.
pub fn find_bounds(query: f64, samples: &[f64]) -> (f64, f64) {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return (query, query),
    };

    if query == last && samples.len() >= 2 {
        return (samples[samples.len() - 2], last);
    }

    let split = samples.partition_point(|&sample| sample <= query);
    let lower = if split > 0 { samples[split - 1] } else { first };
    let upper = samples.get(split).copied().unwrap_or(last);

    (lower, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f64; 5] = [-100.0, -50.0, 0.0, 50.0, 100.0];

    #[test]
    fn test_interior_query() {
        assert_eq!(find_bounds(10.0, &SAMPLES), (0.0, 50.0));
        assert_eq!(find_bounds(-75.0, &SAMPLES), (-100.0, -50.0));
    }

    #[test]
    fn test_query_on_sample_uses_it_as_lower() {
        assert_eq!(find_bounds(0.0, &SAMPLES), (0.0, 50.0));
        assert_eq!(find_bounds(-100.0, &SAMPLES), (-100.0, -50.0));
    }

    #[test]
    fn test_query_at_max_uses_second_highest() {
        assert_eq!(find_bounds(100.0, &SAMPLES), (50.0, 100.0));
    }

    #[test]
    fn test_out_of_range_is_degenerate() {
        assert_eq!(find_bounds(-120.0, &SAMPLES), (-100.0, -100.0));
        assert_eq!(find_bounds(120.0, &SAMPLES), (100.0, 100.0));
    }

    #[test]
    fn test_single_and_empty_samples() {
        assert_eq!(find_bounds(3.0, &[5.0]), (5.0, 5.0));
        assert_eq!(find_bounds(5.0, &[5.0]), (5.0, 5.0));
        assert_eq!(find_bounds(3.0, &[]), (3.0, 3.0));
    }

    #[test]
    fn test_axis_samples_sort_and_dedup() {
        let samples = AxisSamples::from_values([50.0, -0.0, 0.0, -100.0, 50.0]);
        assert_eq!(samples.as_slice(), &[-100.0, 0.0, 50.0]);
        assert_eq!(samples.min(), Some(-100.0));
        assert_eq!(samples.max(), Some(50.0));
        assert_eq!(samples.bounds(25.0), (0.0, 50.0));
    }
}
