//! Statistical core for grade-point distribution analysis.
//!
//! This crate turns a raw column of grade points into a validated sample and
//! answers the questions asked about it:
//!
//! - **Sample filtering**: Coerce raw cells to numbers and keep the values in `[0, 4]`
//! - **Percentiles**: Percentile rank of a value, and the value at a percentile
//! - **Histogram generation**: Fixed-width frequency distributions over explicit edges
//! - **Density estimation**: Gaussian kernel density estimate with automatic bandwidth
//! - **Descriptive statistics**: Mean, median, variance, standard deviation, etc.
//!
//! Every operation is a pure function of an immutable [`sample::Sample`].
//!
//! # Modules
//!
//! - [`sample`]: Raw values, the sample filter and the validated sample
//! - [`percentiles`]: Forward and inverse percentile queries
//! - [`histogram`]: Histogram construction over explicit bin edges
//! - [`density`]: Kernel density estimation
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`error`]: Data, range and histogram errors
//!
//! # Examples
//!
//! ## Filtering a raw column
//!
//! ```
//! use gradepoint_stats::sample::SampleFilter;
//!
//! let (sample, report) = SampleFilter::GRADE_POINTS
//!     .sample(["3.4", "2.9", "withdrawn", "4.3"])
//!     .unwrap();
//! assert_eq!(sample.len(), 2);
//! assert_eq!(report.non_numeric, 1);
//! ```
//!
//! ## Percentile queries
//!
//! ```
//! use gradepoint_stats::{percentiles::TieConvention, sample::Sample};
//!
//! let sample = Sample::new(vec![1.0, 2.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(sample.percentile_of(2.0, TieConvention::Rank).unwrap(), 50.0);
//! assert_eq!(sample.value_at(50.0).unwrap(), 2.0);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use gradepoint_stats::histogram::Histogram;
//!
//! let histogram = Histogram::grade_points([2.95, 3.05, 3.1]);
//! assert_eq!(histogram.bins[29].count, 1);
//! assert_eq!(histogram.bins[30].count, 1);
//! assert_eq!(histogram.bins[31].count, 1);
//! ```
//!
//! ## Estimating a density
//!
//! ```
//! use gradepoint_stats::{
//!     density::{Bandwidth, KernelDensity},
//!     sample::Sample,
//! };
//!
//! let sample = Sample::new(vec![2.0, 2.5, 3.0, 3.5]).unwrap();
//! let kde = KernelDensity::fit(&sample, Bandwidth::default()).unwrap();
//! assert!(kde.evaluate(2.75) > 0.0);
//! ```

pub mod density;
pub mod descriptive;
pub mod error;
pub mod histogram;
pub mod percentiles;
pub mod sample;
