//! Gaussian kernel density estimation.
//!
//! A [`KernelDensity`] places a normal kernel of width `h` (the bandwidth) on
//! every sample point and averages them:
//!
//! ```text
//! f(x) = 1 / (n * h * sqrt(2π)) * Σ exp(-((x - xᵢ) / h)² / 2)
//! ```
//!
//! The bandwidth comes from a rule of thumb scaled by the sample standard
//! deviation ([`Bandwidth::Scott`] by default) or is given explicitly.
//! Rule-of-thumb bandwidths are floored at [`MIN_BANDWIDTH`], so a sample
//! whose values are all identical yields a narrow peak instead of a
//! zero-width kernel.
//!
//! # Examples
//!
//! ```
//! use gradepoint_stats::{
//!     density::{Bandwidth, KernelDensity, linspace},
//!     sample::Sample,
//! };
//!
//! let sample = Sample::new(vec![2.8, 3.1, 3.3, 3.5, 3.9]).unwrap();
//! let kde = KernelDensity::fit(&sample, Bandwidth::Scott).unwrap();
//! let grid = linspace(0.0, 4.0, 500);
//! let curve = kde.evaluate_many(&grid);
//! assert_eq!(curve.len(), 500);
//! assert!(kde.evaluate(3.3) > kde.evaluate(1.0));
//! ```

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{descriptive::DescriptiveStats, error::DataError, sample::Sample};

/// Smallest bandwidth a rule of thumb may produce, in grade points.
pub const MIN_BANDWIDTH: f64 = 0.05;

/// Bandwidth selection for [`KernelDensity::fit`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// Scott's rule: `n^(-1/5) * sd`.
    #[default]
    Scott,
    /// Silverman's rule: `(3n / 4)^(-1/5) * sd`.
    Silverman,
    /// An explicit bandwidth, used as is.
    Fixed(f64),
}

impl Bandwidth {
    /// Resolves the bandwidth for `sample`.
    ///
    /// `sd` is the sample standard deviation. Rule-of-thumb results below
    /// [`MIN_BANDWIDTH`] are raised to it. This covers zero-variance samples
    /// and also genuinely tight ones (an `sd` around 0.01 grade points), whose
    /// curve is then smoother than the rule alone would draw. Use
    /// [`Bandwidth::Fixed`] to go below the floor; a fixed bandwidth must be
    /// finite and positive.
    ///
    /// ```
    /// # use gradepoint_stats::{density::{Bandwidth, MIN_BANDWIDTH}, sample::Sample};
    /// let constant = Sample::new(vec![3.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(Bandwidth::Scott.resolve(&constant).unwrap(), MIN_BANDWIDTH);
    /// assert!(Bandwidth::Fixed(0.0).resolve(&constant).is_err());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn resolve(self, sample: &Sample) -> Result<f64, DataError> {
        let n = sample.len() as f64;
        let factor = match self {
            Self::Scott => n.powf(-0.2),
            Self::Silverman => (n * 3.0 / 4.0).powf(-0.2),
            Self::Fixed(bandwidth) => {
                if !(bandwidth.is_finite() && bandwidth > 0.0) {
                    return Err(DataError::InvalidBandwidth { bandwidth });
                }
                return Ok(bandwidth);
            }
        };
        let std_dev = DescriptiveStats::from_sample(sample).std_dev;
        let bandwidth = factor * std_dev;
        if bandwidth < MIN_BANDWIDTH {
            tracing::debug!(
                rule = ?self,
                computed = bandwidth,
                floor = MIN_BANDWIDTH,
                "bandwidth below floor"
            );
            return Ok(MIN_BANDWIDTH);
        }
        Ok(bandwidth)
    }
}

/// A Gaussian kernel density estimate fitted to a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensity {
    points: Vec<f64>,
    bandwidth: f64,
    scale: f64,
}

impl KernelDensity {
    /// Fits a density estimate to `sample`.
    #[expect(clippy::cast_precision_loss)]
    pub fn fit(sample: &Sample, bandwidth: Bandwidth) -> Result<Self, DataError> {
        let h = bandwidth.resolve(sample)?;
        let points = sample.sorted().to_vec();
        let scale = 1.0 / (points.len() as f64 * h * TAU.sqrt());
        tracing::debug!(points = points.len(), bandwidth = h, "fitted kernel density");
        Ok(Self {
            points,
            bandwidth: h,
            scale,
        })
    }

    /// The bandwidth `h` in use.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let sum = self
            .points
            .iter()
            .map(|&p| {
                let z = (x - p) / h;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>();
        sum * self.scale
    }

    /// Density at each of `xs`; element `i` equals `evaluate(xs[i])`.
    #[must_use]
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// `(x, density)` pairs over `grid`, ready for plotting.
    #[must_use]
    pub fn curve(&self, grid: &[f64]) -> Vec<DensityPoint> {
        grid.iter()
            .map(|&x| DensityPoint {
                x,
                density: self.evaluate(x),
            })
            .collect()
    }
}

/// One point of a density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// `num` evenly spaced values from `start` to `stop`, both included.
///
/// ```
/// # use gradepoint_stats::density::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut grid = (0..num)
                .map(|i| start + i as f64 * step)
                .collect::<Vec<_>>();
            grid[num - 1] = stop;
            grid
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    fn normal_sample(seed: u128, n: usize, mean: f64, std_dev: f64) -> Sample {
        let mut rng = Pcg64Mcg::new(seed);
        let normal = Normal::new(mean, std_dev).unwrap();
        Sample::new(
            (0..n)
                .map(|_| normal.sample(&mut rng).clamp(0.0, 4.0))
                .collect(),
        )
        .unwrap()
    }

    fn trapezoid(kde: &KernelDensity, start: f64, stop: f64, num: usize) -> f64 {
        let grid = linspace(start, stop, num);
        let ys = kde.evaluate_many(&grid);
        grid.windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
            .sum()
    }

    #[test]
    fn test_scott_bandwidth() {
        let sample = Sample::new(vec![0.5, 1.0, 1.5, 2.0, 2.5]).unwrap();
        let expected = 5.0_f64.powf(-0.2) * 0.625_f64.sqrt();
        let h = Bandwidth::Scott.resolve(&sample).unwrap();
        assert!((h - expected).abs() < 1e-12);
    }

    #[test]
    fn test_silverman_bandwidth() {
        let sample = Sample::new(vec![0.5, 1.0, 1.5, 2.0, 2.5]).unwrap();
        let expected = 3.75_f64.powf(-0.2) * 0.625_f64.sqrt();
        let h = Bandwidth::Silverman.resolve(&sample).unwrap();
        assert!((h - expected).abs() < 1e-12);
        assert!(h > Bandwidth::Scott.resolve(&sample).unwrap());
    }

    #[test]
    fn test_bandwidth_shrinks_with_concentration() {
        let wide = normal_sample(1, 200, 2.5, 0.8);
        let narrow = normal_sample(1, 200, 2.5, 0.2);
        let larger = normal_sample(1, 2_000, 2.5, 0.8);
        let h_wide = Bandwidth::Scott.resolve(&wide).unwrap();
        assert!(Bandwidth::Scott.resolve(&narrow).unwrap() < h_wide);
        assert!(Bandwidth::Scott.resolve(&larger).unwrap() < h_wide);
    }

    #[test]
    fn test_fixed_bandwidth_validation() {
        let sample = Sample::new(vec![1.0, 2.0]).unwrap();
        assert_eq!(Bandwidth::Fixed(0.3).resolve(&sample), Ok(0.3));
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                KernelDensity::fit(&sample, Bandwidth::Fixed(bad)),
                Err(DataError::InvalidBandwidth { .. })
            ));
        }
    }

    #[test]
    fn test_degenerate_sample_uses_bandwidth_floor() {
        let sample = Sample::new(vec![3.0, 3.0, 3.0]).unwrap();
        let kde = KernelDensity::fit(&sample, Bandwidth::Scott).unwrap();
        assert_eq!(kde.bandwidth(), MIN_BANDWIDTH);
        let peak = 1.0 / (MIN_BANDWIDTH * TAU.sqrt());
        assert!((kde.evaluate(3.0) - peak).abs() < 1e-9);
        assert!(kde.evaluate(3.5) < 1e-9);
        assert!(kde.evaluate_many(&linspace(0.0, 4.0, 500)).iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_tight_sample_uses_bandwidth_floor() {
        let sample = Sample::new(vec![3.0, 3.01, 3.02, 2.99, 2.98]).unwrap();
        let rule = 5.0_f64.powf(-0.2) * DescriptiveStats::from_sample(&sample).std_dev;
        assert!(rule > 0.0 && rule < MIN_BANDWIDTH);
        assert_eq!(Bandwidth::Scott.resolve(&sample), Ok(MIN_BANDWIDTH));
        assert_eq!(Bandwidth::Fixed(0.005).resolve(&sample), Ok(0.005));
    }

    #[test]
    fn test_single_value_sample_uses_bandwidth_floor() {
        let sample = Sample::new(vec![2.0]).unwrap();
        let kde = KernelDensity::fit(&sample, Bandwidth::Silverman).unwrap();
        assert_eq!(kde.bandwidth(), MIN_BANDWIDTH);
    }

    #[test]
    fn test_grid_matches_scalar_evaluation() {
        let sample = normal_sample(5, 300, 3.0, 0.4);
        let kde = KernelDensity::fit(&sample, Bandwidth::Scott).unwrap();
        let grid = linspace(0.0, 4.0, 500);
        let many = kde.evaluate_many(&grid);
        let curve = kde.curve(&grid);
        for (i, &x) in grid.iter().enumerate() {
            let single = kde.evaluate(x);
            assert!((many[i] - single).abs() <= 1e-9 * single.abs().max(f64::MIN_POSITIVE));
            assert_eq!(curve[i].x, x);
            assert_eq!(curve[i].density, many[i]);
        }
    }

    #[test]
    fn test_density_integrates_to_one() {
        let sample = normal_sample(9, 500, 2.0, 0.5);
        let kde = KernelDensity::fit(&sample, Bandwidth::Scott).unwrap();
        let area = trapezoid(&kde, -3.0, 7.0, 4_001);
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn test_larger_bandwidth_is_smoother() {
        // two clusters: a narrow kernel shows the dip between them, a wide one fills it
        let sample = Sample::new(vec![1.0, 1.1, 1.2, 2.8, 2.9, 3.0]).unwrap();
        let narrow = KernelDensity::fit(&sample, Bandwidth::Fixed(0.1)).unwrap();
        let wide = KernelDensity::fit(&sample, Bandwidth::Fixed(1.0)).unwrap();
        assert!(narrow.evaluate(2.0) < narrow.evaluate(1.1));
        assert!(wide.evaluate(1.1) < narrow.evaluate(1.1));
        assert!(wide.evaluate(2.0) > narrow.evaluate(2.0));
    }

    #[test]
    fn test_density_is_non_negative() {
        let sample = normal_sample(13, 100, 3.2, 0.3);
        let kde = KernelDensity::fit(&sample, Bandwidth::Scott).unwrap();
        assert!(kde.evaluate_many(&linspace(-10.0, 10.0, 201)).iter().all(|&y| y >= 0.0));
    }

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(0.0, 4.0, 500);
        assert_eq!(grid.len(), 500);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[499], 4.0);
        assert!(grid.is_sorted_by(|a, b| a < b));
    }
}
