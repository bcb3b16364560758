use gradepoint_stats::{density::Bandwidth, percentiles::TieConvention};
use serde::{Deserialize, Serialize};

/// Default number of points on the density curve.
pub const DEFAULT_GRID_POINTS: usize = 500;

/// Default reference percentiles marked on the density curve.
pub const DEFAULT_REFERENCE_PERCENTILES: [f64; 3] = [16.0, 50.0, 84.0];

/// Settings for deriving a [`GpaAnalysis`](crate::GpaAnalysis).
///
/// Every field has a default, so a partial JSON document is a valid config:
///
/// ```
/// use gradepoint_analysis::config::AnalysisConfig;
/// use gradepoint_stats::density::Bandwidth;
///
/// let config: AnalysisConfig = serde_json::from_str(r#"{ "bandwidth": "silverman" }"#).unwrap();
/// assert_eq!(config.bandwidth, Bandwidth::Silverman);
/// assert_eq!(config.grid_points, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Number of evenly spaced points over `[0, 4]` on the density curve.
    pub grid_points: usize,
    /// Percentiles whose values are marked on the density curve.
    pub reference_percentiles: Vec<f64>,
    /// Bandwidth selection for the density estimate.
    pub bandwidth: Bandwidth,
    /// Tie handling for percentile ranks.
    pub ties: TieConvention,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            reference_percentiles: DEFAULT_REFERENCE_PERCENTILES.to_vec(),
            bandwidth: Bandwidth::default(),
            ties: TieConvention::default(),
        }
    }
}
