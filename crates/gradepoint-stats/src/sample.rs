//! Raw input cleaning and the validated [`Sample`] type.
//!
//! Raw columns arrive as a mix of numbers, text and missing cells. A
//! [`SampleFilter`] coerces every cell to a number, drops the cells that fail
//! coercion, drops numbers outside its accepted range, and keeps the survivors
//! in their original order.
//!
//! # Examples
//!
//! ```
//! use gradepoint_stats::sample::{RawValue, SampleFilter};
//!
//! let raw = [
//!     RawValue::from(3.2),
//!     RawValue::from("2.5"),
//!     RawValue::from("absent"),
//!     RawValue::Missing,
//!     RawValue::from(4.7),
//! ];
//! let (sample, report) = SampleFilter::GRADE_POINTS.sample(&raw).unwrap();
//! assert_eq!(sample.values(), &[3.2, 2.5]);
//! assert_eq!(report.non_numeric, 2);
//! assert_eq!(report.out_of_range, 1);
//! ```

use std::ops::RangeInclusive;

use crate::{
    error::{DataError, RangeError},
    percentiles::{self, TieConvention},
};

/// Lowest valid grade point.
pub const GRADE_POINT_MIN: f64 = 0.0;
/// Highest valid grade point.
pub const GRADE_POINT_MAX: f64 = 4.0;

/// One cell of a raw input column.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Missing,
}

impl RawValue {
    /// Classifies a textual cell, as read from a delimited file.
    ///
    /// Blank cells become [`RawValue::Missing`], cells that parse as a float
    /// become [`RawValue::Number`] and everything else is kept as text.
    ///
    /// ```
    /// use gradepoint_stats::sample::RawValue;
    ///
    /// assert_eq!(RawValue::from_cell(" 3.5 "), RawValue::Number(3.5));
    /// assert_eq!(RawValue::from_cell(""), RawValue::Missing);
    /// assert_eq!(RawValue::from_cell("n/a"), RawValue::Text("n/a".to_owned()));
    /// ```
    #[must_use]
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Text(cell.to_owned()),
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Option<T>> for RawValue
where
    T: Into<RawValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Conversion of an input cell into a real number.
///
/// Returns `None` when the cell has no numeric reading. NaN counts as "no
/// numeric reading"; infinities are numbers and are left for range checks.
pub trait Coerce {
    fn coerce(&self) -> Option<f64>;
}

impl Coerce for f64 {
    fn coerce(&self) -> Option<f64> {
        (!self.is_nan()).then_some(*self)
    }
}

impl Coerce for f32 {
    fn coerce(&self) -> Option<f64> {
        f64::from(*self).coerce()
    }
}

impl Coerce for str {
    fn coerce(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()?.coerce()
    }
}

impl Coerce for String {
    fn coerce(&self) -> Option<f64> {
        self.as_str().coerce()
    }
}

impl Coerce for RawValue {
    fn coerce(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => value.coerce(),
            RawValue::Text(text) => text.coerce(),
            RawValue::Missing => None,
        }
    }
}

impl<T> Coerce for Option<T>
where
    T: Coerce,
{
    fn coerce(&self) -> Option<f64> {
        self.as_ref()?.coerce()
    }
}

impl<T> Coerce for &T
where
    T: Coerce + ?Sized,
{
    fn coerce(&self) -> Option<f64> {
        (**self).coerce()
    }
}

/// Counts of what a [`SampleFilter`] kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct FilterReport {
    /// Values that made it into the sample.
    pub kept: usize,
    /// Cells that could not be coerced to a number (text, missing, NaN).
    pub non_numeric: usize,
    /// Numbers outside the accepted range.
    pub out_of_range: usize,
}

impl FilterReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.kept + self.non_numeric + self.out_of_range
    }
}

/// Cleans raw columns into a [`Sample`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFilter {
    min: f64,
    max: f64,
}

impl Default for SampleFilter {
    fn default() -> Self {
        Self::GRADE_POINTS
    }
}

impl SampleFilter {
    /// Accepts grade points in `[0.0, 4.0]`.
    pub const GRADE_POINTS: Self = Self {
        min: GRADE_POINT_MIN,
        max: GRADE_POINT_MAX,
    };

    /// Creates a filter accepting values in `[min, max]`, a sub-range of the
    /// grade-point scale.
    ///
    /// # Panics
    ///
    /// Panics if the bounds are not ordered or leave `[0.0, 4.0]`.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            GRADE_POINT_MIN <= min && min <= max && max <= GRADE_POINT_MAX,
            "filter bounds must be ordered within [0, 4]"
        );
        Self { min, max }
    }

    #[must_use]
    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    /// Coerces and range-checks `values`, preserving their order.
    #[must_use]
    pub fn apply<I>(&self, values: I) -> (Vec<f64>, FilterReport)
    where
        I: IntoIterator,
        I::Item: Coerce,
    {
        let range = self.range();
        let mut report = FilterReport::default();
        let mut kept = vec![];
        for cell in values {
            match cell.coerce() {
                None => report.non_numeric += 1,
                Some(value) if range.contains(&value) => kept.push(value),
                Some(_) => report.out_of_range += 1,
            }
        }
        report.kept = kept.len();
        (kept, report)
    }

    /// Like [`apply`](Self::apply), but fails when nothing survives.
    pub fn sample<I>(&self, values: I) -> Result<(Sample, FilterReport), DataError>
    where
        I: IntoIterator,
        I::Item: Coerce,
    {
        let (kept, report) = self.apply(values);
        tracing::debug!(
            kept = report.kept,
            non_numeric = report.non_numeric,
            out_of_range = report.out_of_range,
            "filtered raw column"
        );
        let sample = Sample::new(kept)?;
        Ok((sample, report))
    }
}

/// A validated, immutable, non-empty sequence of grade points in `[0.0, 4.0]`.
///
/// The original order is kept alongside an ascending copy used for order
/// statistics, so percentile queries never re-sort.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    sorted: Vec<f64>,
}

#[allow(clippy::len_without_is_empty)]
impl Sample {
    /// Wraps `values` after checking they are non-empty grade points.
    ///
    /// Use a [`SampleFilter`] to drop invalid cells instead of rejecting them.
    ///
    /// ```
    /// use gradepoint_stats::{error::DataError, sample::Sample};
    ///
    /// assert!(Sample::new(vec![2.0, 3.0]).is_ok());
    /// assert_eq!(Sample::new(vec![]), Err(DataError::EmptySample));
    /// assert_eq!(Sample::new(vec![3.0, 4.5]), Err(DataError::OutOfRange { index: 1 }));
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self, DataError> {
        if values.is_empty() {
            return Err(DataError::EmptySample);
        }
        let range = GRADE_POINT_MIN..=GRADE_POINT_MAX;
        if let Some(index) = values.iter().position(|v| !range.contains(v)) {
            return Err(DataError::OutOfRange { index });
        }
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        Ok(Self { values, sorted })
    }

    /// Values in their original order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values in ascending order.
    #[must_use]
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Percentile rank of `score` in `[0, 100]`.
    ///
    /// See [`percentiles::forward_percentile`].
    pub fn percentile_of(&self, score: f64, ties: TieConvention) -> Result<f64, RangeError> {
        if score.is_nan() {
            return Err(RangeError::NotANumber { what: "value" });
        }
        Ok(percentiles::forward_percentile(&self.sorted, score, ties))
    }

    /// Value below which `percentile` percent of the sample lies.
    ///
    /// Percentiles outside `[0, 100]` are clamped. See
    /// [`percentiles::compute_percentile`].
    pub fn value_at(&self, percentile: f64) -> Result<f64, RangeError> {
        if percentile.is_nan() {
            return Err(RangeError::NotANumber { what: "percentile" });
        }
        Ok(percentiles::compute_percentile(&self.sorted, percentile))
    }
}
