//! Tabular input and numeric column selection
//!
//! A [`Table`] is one sheet of raw cells organised by column. Only numeric
//! columns are candidates for analysis: a column is numeric when it holds at
//! least one number and no text (blank cells are allowed).
//!
//! # Examples
//!
//! ```
//! use gradepoint_analysis::table::Table;
//!
//! let table = Table::from_rows(
//!     ["name", "gpa"],
//!     [["Ada", "3.9"], ["Alan", "3.4"], ["Grace", ""]],
//! );
//! let names = table
//!     .numeric_columns()
//!     .map(|column| column.name.as_str())
//!     .collect::<Vec<_>>();
//! assert_eq!(names, ["gpa"]);
//! ```

use gradepoint_stats::{
    error::DataError,
    sample::{FilterReport, RawValue, Sample, SampleFilter},
};

/// A named column of raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<RawValue>,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<RawValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Whether the column holds at least one number and no text.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        let mut has_number = false;
        for value in &self.values {
            match value {
                RawValue::Number(_) => has_number = true,
                RawValue::Text(_) => return false,
                RawValue::Missing => {}
            }
        }
        has_number
    }

    /// Filters the column into a sample.
    pub fn sample(&self, filter: &SampleFilter) -> Result<(Sample, FilterReport), DataError> {
        filter.sample(&self.values)
    }
}

/// Columns of one sheet, in their original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Builds a table from a header row and textual data rows.
    ///
    /// Short rows are padded with missing cells; cells beyond the header are
    /// ignored.
    #[must_use]
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let mut columns = headers
            .into_iter()
            .map(|name| Column::new(name, vec![]))
            .collect::<Vec<_>>();
        for row in rows {
            let mut cells = row.into_iter();
            for column in &mut columns {
                let value = cells
                    .next()
                    .map_or(RawValue::Missing, |cell| RawValue::from_cell(cell.as_ref()));
                column.values.push(value);
            }
        }
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns eligible for analysis.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.is_numeric())
    }

    /// Looks up a numeric column by name, or picks the first numeric column.
    pub fn numeric_column(&self, name: Option<&str>) -> Result<&Column, DataError> {
        match name {
            Some(name) => self
                .numeric_columns()
                .find(|column| column.name == name)
                .ok_or_else(|| DataError::ColumnNotFound {
                    name: name.to_owned(),
                }),
            None => self
                .numeric_columns()
                .next()
                .ok_or(DataError::NoNumericColumn),
        }
    }
}
