use std::ops::Range;

use crate::error::HistogramError;

/// Number of bins in the grade-point histogram.
pub const GRADE_POINT_BIN_COUNT: usize = 40;

/// Grade-point resolution; bin labels end one step below the next edge.
pub const LABEL_STEP: f64 = 0.01;

/// Edges of the grade-point histogram: `0.0, 0.1, ..., 4.0`.
///
/// Each edge is computed as `i / 10` rather than by accumulating a step, so
/// every edge is the double nearest to its decimal value.
#[must_use]
pub fn grade_point_edges() -> Vec<f64> {
    (0..=40_u32).map(|i| f64::from(i) / 10.0).collect()
}

/// A histogram over explicit bin edges.
///
/// Bins are half-open `[edges[i], edges[i + 1])` except the last one, which
/// also includes its upper edge. Values outside `[edges[0], edges[last]]` are
/// not counted.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HistogramBin {
    /// Display label, `"{lo:.2}-{hi:.2}"` with `hi` one [`LABEL_STEP`] below
    /// the upper edge, so adjacent labels do not overlap.
    pub label: String,
    /// The edges of this bin (inclusive start, exclusive end except for the last bin).
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from values and explicit bin edges.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gradepoint_stats::histogram::Histogram;
    /// let histogram = Histogram::with_edges([0.5, 1.5, 1.5, 3.9], &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(histogram.counts().collect::<Vec<_>>(), vec![1, 2, 0, 1]);
    /// assert_eq!(histogram.bins[1].label, "1.00-1.99");
    /// ```
    pub fn with_edges<I>(values: I, edges: &[f64]) -> Result<Self, HistogramError>
    where
        I: IntoIterator<Item = f64>,
    {
        if edges.len() < 2 {
            return Err(HistogramError::TooFewEdges { len: edges.len() });
        }
        if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
            return Err(HistogramError::NonFiniteEdge { index });
        }
        if let Some(index) = edges.windows(2).position(|w| w[0] >= w[1]) {
            return Err(HistogramError::UnsortedEdges { index: index + 1 });
        }
        Ok(Self::from_valid_edges(values, edges))
    }

    /// Creates the fixed 40-bin grade-point histogram (0.1-wide bins over `[0, 4]`).
    ///
    /// ```
    /// # use gradepoint_stats::histogram::{GRADE_POINT_BIN_COUNT, Histogram};
    /// let histogram = Histogram::grade_points([0.0, 0.05, 3.95, 4.0]);
    /// assert_eq!(histogram.bins.len(), GRADE_POINT_BIN_COUNT);
    /// assert_eq!(histogram.bins[0].label, "0.00-0.09");
    /// assert_eq!(histogram.bins[0].count, 2);
    /// assert_eq!(histogram.bins[39].count, 2);
    /// ```
    #[must_use]
    pub fn grade_points<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_valid_edges(values, &grade_point_edges())
    }

    fn from_valid_edges<I>(values: I, edges: &[f64]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        debug_assert!(edges.len() >= 2 && edges.is_sorted_by(|a, b| a < b));

        let mut bins = edges
            .windows(2)
            .map(|w| HistogramBin {
                label: format!("{:.2}-{:.2}", w[0], w[1] - LABEL_STEP),
                range: w[0]..w[1],
                count: 0,
            })
            .collect::<Vec<_>>();

        let last_bin = bins.len() - 1;
        let span = edges[0]..=edges[edges.len() - 1];
        for value in values {
            // also rejects NaN
            if !span.contains(&value) {
                continue;
            }
            // number of edges <= value is at least 1 here; the top edge folds into the last bin
            let idx = (edges.partition_point(|&e| e <= value) - 1).min(last_bin);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Per-bin counts in bin order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.bins.iter().map(|bin| bin.count)
    }

    /// Sum of all bin counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts().sum()
    }
}
