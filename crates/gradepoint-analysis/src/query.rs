//! Clamping of interactive query inputs.
//!
//! Queries typed or dragged by a user are clamped into their domain instead of
//! rejected: a value below 0 is answered as 0, a percentile above 100 as 100.
//! The returned [`Clamped`] keeps both the requested and the effective input so
//! the caller can tell the user what was actually answered. Only NaN, which has
//! no nearest point in the domain, is an error.

use std::ops::RangeInclusive;

use gradepoint_stats::{
    error::RangeError,
    sample::{GRADE_POINT_MAX, GRADE_POINT_MIN},
};
use serde::Serialize;

/// Accepted range of grade-point queries.
pub const VALUE_DOMAIN: RangeInclusive<f64> = GRADE_POINT_MIN..=GRADE_POINT_MAX;

/// Accepted range of percentile queries.
pub const PERCENTILE_DOMAIN: RangeInclusive<f64> = 0.0..=100.0;

/// A query answer together with the input it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Clamped<T> {
    /// The input as given.
    pub requested: f64,
    /// The input after clamping into its domain.
    pub effective: f64,
    /// Whether the input had to be moved into its domain.
    pub clamped: bool,
    /// The answer for `effective`.
    pub result: T,
}

/// Clamps `input` into `domain`, then applies `query` to it.
///
/// ```
/// use gradepoint_analysis::query::{VALUE_DOMAIN, clamped};
///
/// let answer = clamped(4.6, &VALUE_DOMAIN, "value", |v| v * 25.0).unwrap();
/// assert_eq!(answer.effective, 4.0);
/// assert_eq!(answer.result, 100.0);
/// assert!(answer.clamped);
/// ```
pub fn clamped<T, F>(
    input: f64,
    domain: &RangeInclusive<f64>,
    what: &'static str,
    query: F,
) -> Result<Clamped<T>, RangeError>
where
    F: FnOnce(f64) -> T,
{
    if input.is_nan() {
        return Err(RangeError::NotANumber { what });
    }
    let clamped = !domain.contains(&input);
    let effective = input.clamp(*domain.start(), *domain.end());
    if clamped {
        tracing::debug!(what, requested = input, effective, "clamped query input");
    }
    Ok(Clamped {
        requested: input,
        effective,
        clamped,
        result: query(effective),
    })
}
