//! Forward (value → percentile) and inverse (percentile → value) queries.
//!
//! The two directions use different definitions and are not exact inverses:
//! the forward rank counts sample elements around a score, while the inverse
//! interpolates linearly between order statistics.

use serde::{Deserialize, Serialize};

/// How sample elements equal to the score contribute to its percentile rank.
///
/// With `less` elements strictly below the score, `less_or_equal` elements at
/// or below it and `n` elements in total:
///
/// | convention | rank |
/// |---|---|
/// | `Rank` | `(less + less_or_equal + [less_or_equal > less]) * 50 / n` |
/// | `Mean` | `(less + less_or_equal) * 50 / n` |
/// | `Weak` | `less_or_equal * 100 / n` |
/// | `Strict` | `less * 100 / n` |
///
/// `Rank` averages the 1-based ranks of every element tied with the score and
/// is the default. `Mean` averages the strict and weak ranks, i.e. it counts
/// ties as half an element each.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum TieConvention {
    #[default]
    Rank,
    Mean,
    Weak,
    Strict,
}

/// Computes the percentile rank of `score` within sorted data.
///
/// Returns a value in `[0, 100]`, non-decreasing in `score`. Returns
/// `f64::NAN` if the input is empty.
///
/// # Panics
///
/// Panics in debug mode if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use gradepoint_stats::percentiles::{TieConvention, forward_percentile};
///
/// let values = [1.0, 2.0, 2.0, 3.0, 4.0];
/// assert_eq!(forward_percentile(&values, 2.0, TieConvention::Rank), 50.0);
/// assert_eq!(forward_percentile(&values, 2.0, TieConvention::Mean), 40.0);
/// assert_eq!(forward_percentile(&values, 2.0, TieConvention::Weak), 60.0);
/// assert_eq!(forward_percentile(&values, 2.0, TieConvention::Strict), 20.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn forward_percentile(sorted_values: &[f64], score: f64, ties: TieConvention) -> f64 {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if sorted_values.is_empty() {
        return f64::NAN;
    }

    let n = sorted_values.len() as f64;
    let less = sorted_values.partition_point(|&v| v < score);
    let less_or_equal = sorted_values.partition_point(|&v| v <= score);
    match ties {
        TieConvention::Rank => {
            let matched = usize::from(less_or_equal > less);
            (less + less_or_equal + matched) as f64 * 50.0 / n
        }
        TieConvention::Mean => (less + less_or_equal) as f64 * 50.0 / n,
        TieConvention::Weak => less_or_equal as f64 * 100.0 / n,
        TieConvention::Strict => less as f64 * 100.0 / n,
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between order statistics: the percentile `p`
/// maps to the fractional index `h = (n - 1) * p / 100`, and the result lies
/// on the segment between `sorted_values[floor(h)]` and the next element.
/// Percentiles outside `[0, 100]` are clamped to the sample's extremes.
///
/// Returns `f64::NAN` if the input is empty or `percentile` is NaN.
///
/// # Examples
///
/// ```
/// use gradepoint_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 0.0), 1.0);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// assert_eq!(compute_percentile(&values, 250.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a <= b),
        "values must be sorted in ascending order"
    );
    if sorted_values.is_empty() || percentile.is_nan() {
        return f64::NAN;
    }

    let last = sorted_values.len() - 1;
    let rank = last as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = (rank.floor() as usize).min(last);
    let upper = (lower + 1).min(last);
    let fraction = rank - lower as f64;
    let lo = sorted_values[lower];
    let hi = sorted_values[upper];
    lo + (hi - lo) * fraction
}

/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs for efficient lookup
/// of commonly used percentile points, such as the 16th/50th/84th markers
/// drawn on a density curve.
///
/// # Examples
///
/// ```
/// use gradepoint_stats::percentiles::Percentiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(3.0));
/// assert_eq!(percentiles.get(25.0), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentiles {
    /// Percentile-value pairs in the order requested.
    /// Each tuple contains (percentile, value) where percentile is 0.0-100.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    ///
    /// This method will sort the values internally before computing percentiles.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed.
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}
