use crate::{percentiles, sample::Sample};

/// Descriptive statistics summarizing a dataset.
///
/// This structure contains common measures of central tendency and
/// dispersion for a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The median value of the dataset (average of the middle pair for even counts).
    pub median: f64,
    /// The population variance (divides by `n`).
    pub population_variance: f64,
    /// The sample variance (divides by `n - 1`; zero for a single value).
    pub variance: f64,
    /// The sample standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics of a validated sample.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gradepoint_stats::{descriptive::DescriptiveStats, sample::Sample};
    /// let sample = Sample::new(vec![1.0, 2.0, 2.0, 2.0, 2.5, 2.5, 3.5, 4.0]).unwrap();
    /// let stats = DescriptiveStats::from_sample(&sample);
    /// assert_eq!(stats.mean, 2.4375);
    /// assert_eq!(stats.median, 2.25);
    /// assert_eq!(stats.max, 4.0);
    /// ```
    #[must_use]
    pub fn from_sample(sample: &Sample) -> Self {
        // a sample is never empty
        match Self::from_sorted(sample.sorted()) {
            Some(stats) => stats,
            None => unreachable!("sample is non-empty"),
        }
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f64;
        let mean = sorted_values.iter().sum::<f64>() / n;
        let median = percentiles::compute_percentile(sorted_values, 50.0);
        let sum_sq = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>();
        let population_variance = sum_sq / n;
        let variance = if count > 1 { sum_sq / (n - 1.0) } else { 0.0 };
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            population_variance,
            variance,
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_statistics() {
        let stats = DescriptiveStats::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.population_variance, 2.0);
        assert_eq!(stats.variance, 2.5);
        assert!((stats.std_dev - 2.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(DescriptiveStats::from_sorted(&[]), None);
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        let sample = Sample::new(vec![3.0]).unwrap();
        let stats = DescriptiveStats::from_sample(&sample);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_constant_sample_has_zero_spread() {
        let sample = Sample::new(vec![3.0, 3.0, 3.0]).unwrap();
        let stats = DescriptiveStats::from_sample(&sample);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 3.0);
    }
}
