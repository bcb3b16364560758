//! Dataset-level analysis of grade-point distributions
//!
//! This crate sits between a tabular data source and whatever renders the
//! results. It selects a numeric column, cleans it into a sample, derives the
//! per-dataset artifacts once, and answers interactive queries against them.
//!
//! # Workflow
//!
//! 1. **Load a sheet** ([`table::Table`]): Raw cells organised by column
//! 2. **Pick a column** ([`table::Table::numeric_column`]): Named, or the first numeric one
//! 3. **Filter** ([`table::Column::sample`]): Keep numeric grade points in `[0, 4]`
//! 4. **Derive** ([`GpaAnalysis::new`]): Histogram, density curve, reference markers
//! 5. **Query** ([`GpaAnalysis::percentile_of`], [`GpaAnalysis::value_at`],
//!    [`GpaAnalysis::marker_at`]): Clamped interactive lookups
//!
//! # Examples
//!
//! ```
//! use gradepoint_analysis::{GpaAnalysis, config::AnalysisConfig, table::Table};
//! use gradepoint_stats::sample::SampleFilter;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let table = Table::from_rows(
//!     ["id", "gpa"],
//!     [["1", "3.2"], ["2", "2.9"], ["3", "3.8"], ["4", "3.5"]],
//! );
//! let column = table.numeric_column(Some("gpa"))?;
//! let (sample, _report) = column.sample(&SampleFilter::GRADE_POINTS)?;
//! let analysis = GpaAnalysis::new(sample, &AnalysisConfig::default())?;
//!
//! let rank = analysis.percentile_of(3.5)?;
//! assert_eq!(rank.result, 75.0);
//! # Ok(())
//! # }
//! ```

pub use self::gpa::{GpaAnalysis, Marker};

pub mod config;
pub mod gpa;
pub mod query;
pub mod table;
