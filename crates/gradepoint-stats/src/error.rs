/// Errors caused by the dataset itself rather than by a user query.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DataError {
    #[display("no numeric columns found")]
    NoNumericColumn,
    #[display("column '{name}' not found")]
    ColumnNotFound { name: String },
    #[display("no valid samples")]
    EmptySample,
    #[display("sample value at index {index} is outside [0, 4]")]
    OutOfRange { index: usize },
    #[display("invalid bandwidth {bandwidth}: must be finite and positive")]
    InvalidBandwidth { bandwidth: f64 },
}

/// Errors caused by a query that cannot be mapped into the accepted domain.
///
/// Finite out-of-range queries are clamped by the callers, so the only
/// remaining failure is an input that has no position on the number line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RangeError {
    #[display("{what} is not a number")]
    NotANumber { what: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistogramError {
    #[display("histogram needs at least 2 edges, got {len}")]
    TooFewEdges { len: usize },
    #[display("histogram edge at index {index} is not finite")]
    NonFiniteEdge { index: usize },
    #[display("histogram edges must be strictly increasing (index {index})")]
    UnsortedEdges { index: usize },
}
