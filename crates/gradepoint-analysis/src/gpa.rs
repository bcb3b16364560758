//! Per-dataset derived view of a grade-point sample
//!
//! [`GpaAnalysis`] derives everything that depends only on the sample once:
//! summary statistics, the fixed histogram, the density model, the density
//! curve and the reference markers. Queries that depend on user input
//! (percentile of a value, value at a percentile, marker at a value) are
//! answered from the cached state on every call.

use gradepoint_stats::{
    density::{DensityPoint, KernelDensity, linspace},
    descriptive::DescriptiveStats,
    error::{DataError, RangeError},
    histogram::Histogram,
    percentiles::{Percentiles, compute_percentile, forward_percentile},
    sample::{GRADE_POINT_MAX, GRADE_POINT_MIN, Sample},
};
use serde::Serialize;

use crate::{
    config::AnalysisConfig,
    query::{self, Clamped, PERCENTILE_DOMAIN, VALUE_DOMAIN},
};

/// A labelled point on the density curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Grade point on the horizontal axis.
    pub value: f64,
    /// Density at `value`.
    pub density: f64,
    /// Percentile the marker stands for.
    pub percentile: f64,
    pub label: String,
}

/// Cached analysis of one sample.
///
/// Replace the whole analysis when the sample changes; nothing in it is
/// updated in place.
///
/// # Examples
///
/// ```
/// use gradepoint_analysis::{GpaAnalysis, config::AnalysisConfig};
/// use gradepoint_stats::sample::Sample;
///
/// let sample = Sample::new(vec![2.1, 2.8, 3.0, 3.3, 3.3, 3.6, 3.9]).unwrap();
/// let analysis = GpaAnalysis::new(sample, &AnalysisConfig::default()).unwrap();
///
/// assert_eq!(analysis.histogram().bins.len(), 40);
/// assert_eq!(analysis.curve().len(), 500);
///
/// let rank = analysis.percentile_of(3.3).unwrap();
/// assert!((rank.result - 4.5 / 7.0 * 100.0).abs() < 1e-9);
///
/// let needed = analysis.value_at(120.0).unwrap();
/// assert!(needed.clamped);
/// assert_eq!(needed.result, 3.9);
/// ```
#[derive(Debug, Clone)]
pub struct GpaAnalysis {
    sample: Sample,
    config: AnalysisConfig,
    summary: DescriptiveStats,
    histogram: Histogram,
    density: KernelDensity,
    curve: Vec<DensityPoint>,
    reference_markers: Vec<Marker>,
}

impl GpaAnalysis {
    /// Derives the cached state for `sample`.
    ///
    /// Fails only when the configured bandwidth is invalid.
    pub fn new(sample: Sample, config: &AnalysisConfig) -> Result<Self, DataError> {
        let summary = DescriptiveStats::from_sample(&sample);
        let histogram = Histogram::grade_points(sample.values().iter().copied());
        let density = KernelDensity::fit(&sample, config.bandwidth)?;
        let grid = linspace(GRADE_POINT_MIN, GRADE_POINT_MAX, config.grid_points);
        let curve = density.curve(&grid);

        let points = config
            .reference_percentiles
            .iter()
            .copied()
            .filter(|p| PERCENTILE_DOMAIN.contains(p))
            .collect::<Vec<_>>();
        let reference_markers = Percentiles::from_sorted(sample.sorted(), &points)
            .iter()
            .map(|(percentile, value)| Marker {
                value,
                density: density.evaluate(value),
                percentile,
                label: format!("{percentile}th"),
            })
            .collect();

        tracing::info!(
            samples = sample.len(),
            bandwidth = density.bandwidth(),
            grid_points = curve.len(),
            "derived analysis"
        );

        Ok(Self {
            sample,
            config: config.clone(),
            summary,
            histogram,
            density,
            curve,
            reference_markers,
        })
    }

    #[must_use]
    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    #[must_use]
    pub fn summary(&self) -> &DescriptiveStats {
        &self.summary
    }

    #[must_use]
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    #[must_use]
    pub fn density(&self) -> &KernelDensity {
        &self.density
    }

    #[must_use]
    pub fn curve(&self) -> &[DensityPoint] {
        &self.curve
    }

    /// Markers at the configured reference percentiles, in configured order.
    ///
    /// Reference percentiles outside `[0, 100]` are skipped.
    #[must_use]
    pub fn reference_markers(&self) -> &[Marker] {
        &self.reference_markers
    }

    /// Percentile rank of a grade point, clamped into `[0, 4]`.
    pub fn percentile_of(&self, value: f64) -> Result<Clamped<f64>, RangeError> {
        let ties = self.config.ties;
        query::clamped(value, &VALUE_DOMAIN, "value", |v| {
            forward_percentile(self.sample.sorted(), v, ties)
        })
    }

    /// Grade point at a percentile, clamped into `[0, 100]`.
    pub fn value_at(&self, percentile: f64) -> Result<Clamped<f64>, RangeError> {
        query::clamped(percentile, &PERCENTILE_DOMAIN, "percentile", |p| {
            compute_percentile(self.sample.sorted(), p)
        })
    }

    /// Marker for a user-chosen grade point, clamped into `[0, 4]`.
    pub fn marker_at(&self, value: f64) -> Result<Clamped<Marker>, RangeError> {
        let ties = self.config.ties;
        query::clamped(value, &VALUE_DOMAIN, "value", |v| {
            let percentile = forward_percentile(self.sample.sorted(), v, ties);
            Marker {
                value: v,
                density: self.density.evaluate(v),
                percentile,
                label: format!("{percentile:.1}th %"),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use gradepoint_stats::{
        density::{Bandwidth, MIN_BANDWIDTH},
        percentiles::TieConvention,
    };

    use super::*;

    fn analysis(values: Vec<f64>, config: &AnalysisConfig) -> GpaAnalysis {
        GpaAnalysis::new(Sample::new(values).unwrap(), config).unwrap()
    }

    #[test]
    fn test_cached_artifacts() {
        let values = vec![2.0, 2.4, 2.4, 3.1, 3.5, 3.8, 4.0];
        let analysis = analysis(values.clone(), &AnalysisConfig::default());
        assert_eq!(analysis.summary().count, values.len());
        assert_eq!(analysis.histogram().total(), values.len() as u64);
        assert_eq!(analysis.curve().len(), 500);
        assert_eq!(analysis.curve()[0].x, 0.0);
        assert_eq!(analysis.curve()[499].x, 4.0);
        assert_eq!(analysis.sample().values(), values.as_slice());
    }

    #[test]
    fn test_reference_markers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0].map(|v| v * 0.8).to_vec();
        let analysis = analysis(values, &AnalysisConfig::default());
        let markers = analysis.reference_markers();
        let labels = markers.iter().map(|m| m.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["16th", "50th", "84th"]);
        assert!((markers[1].value - 2.4).abs() < 1e-12);
        for marker in markers {
            assert_eq!(marker.density, analysis.density().evaluate(marker.value));
        }
    }

    #[test]
    fn test_out_of_range_reference_percentiles_are_skipped() {
        let config = AnalysisConfig {
            reference_percentiles: vec![-5.0, 25.0, 150.0],
            ..AnalysisConfig::default()
        };
        let analysis = analysis(vec![1.0, 3.0], &config);
        assert_eq!(analysis.reference_markers().len(), 1);
        assert_eq!(analysis.reference_markers()[0].value, 1.5);
    }

    #[test]
    fn test_percentile_of_clamps_value() {
        let analysis = analysis(vec![1.0, 2.0, 2.0, 3.0, 4.0], &AnalysisConfig::default());
        let rank = analysis.percentile_of(2.0).unwrap();
        assert_eq!(rank.result, 50.0);
        assert!(!rank.clamped);

        let above = analysis.percentile_of(9.0).unwrap();
        assert!(above.clamped);
        assert_eq!(above.effective, 4.0);
        assert_eq!(above.result, 100.0);

        let below = analysis.percentile_of(-1.0).unwrap();
        assert_eq!(below.effective, 0.0);
        assert_eq!(below.result, 0.0);
    }

    #[test]
    fn test_tie_convention_follows_config() {
        let config = AnalysisConfig {
            ties: TieConvention::Mean,
            ..AnalysisConfig::default()
        };
        let analysis = analysis(vec![1.0, 2.0, 2.0, 3.0, 4.0], &config);
        assert_eq!(analysis.percentile_of(2.0).unwrap().result, 40.0);
    }

    #[test]
    fn test_value_at_clamps_percentile() {
        let analysis = analysis(vec![1.0, 2.0, 3.0, 4.0], &AnalysisConfig::default());
        assert_eq!(analysis.value_at(50.0).unwrap().result, 2.5);
        let low = analysis.value_at(-20.0).unwrap();
        assert!(low.clamped);
        assert_eq!(low.result, 1.0);
        assert!(analysis.value_at(f64::NAN).is_err());
    }

    #[test]
    fn test_marker_at() {
        let analysis = analysis(vec![2.0, 3.0, 3.0, 3.5], &AnalysisConfig::default());
        let marker = analysis.marker_at(3.0).unwrap().result;
        assert_eq!(marker.value, 3.0);
        assert_eq!(marker.percentile, 62.5);
        assert_eq!(marker.label, "62.5th %");
        assert_eq!(marker.density, analysis.density().evaluate(3.0));
        assert_eq!(
            analysis.marker_at(f64::NAN),
            Err(RangeError::NotANumber { what: "value" })
        );
    }

    #[test]
    fn test_degenerate_sample_is_analysed() {
        let analysis = analysis(vec![3.0, 3.0, 3.0], &AnalysisConfig::default());
        assert_eq!(analysis.density().bandwidth(), MIN_BANDWIDTH);
        assert!(analysis.curve().iter().all(|p| p.density.is_finite()));
        assert!(analysis.reference_markers().iter().all(|m| m.value == 3.0));
    }

    #[test]
    fn test_histogram_covers_every_sample_value() {
        assert_eq!(
            Sample::new(vec![3.0, 4.5, -1.0]),
            Err(DataError::OutOfRange { index: 1 })
        );
        let analysis = analysis(vec![0.0, 0.05, 2.99, 3.0, 4.0], &AnalysisConfig::default());
        assert_eq!(
            analysis.histogram().total(),
            analysis.sample().len() as u64
        );
        assert_eq!(analysis.histogram().bins[39].label, "3.90-3.99");
    }

    #[test]
    fn test_reference_markers_match_precomputed_percentiles() {
        let analysis = analysis(vec![1.0, 2.0, 3.0, 4.0], &AnalysisConfig::default());
        let expected = Percentiles::new(&[4.0, 3.0, 2.0, 1.0], &[16.0, 50.0, 84.0]);
        let markers = analysis
            .reference_markers()
            .iter()
            .map(|m| (m.percentile, m.value))
            .collect::<Vec<_>>();
        assert_eq!(markers, expected.as_slice());
    }

    #[test]
    fn test_invalid_bandwidth_is_data_error() {
        let config = AnalysisConfig {
            bandwidth: Bandwidth::Fixed(-1.0),
            ..AnalysisConfig::default()
        };
        let result = GpaAnalysis::new(Sample::new(vec![1.0, 2.0]).unwrap(), &config);
        assert!(matches!(result, Err(DataError::InvalidBandwidth { .. })));
    }
}
