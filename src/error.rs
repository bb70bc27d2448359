use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Failures surfaced by window selection and the table adapter
///
/// Each failure kind stays distinguishable so callers can report them
/// separately rather than collapsing them into a single message.
#[derive(Debug, Error)]
pub enum Error {
    /// The percentile or the window width lies outside `[0, 1]`
    #[error("{name} must lie within [0, 1], got {value}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },
    /// The input does not have the expected two-column shape
    #[error("invalid column: {0}")]
    InvalidColumn(#[from] ColumnError),
    /// The dataset has no rows
    #[error("no data available")]
    EmptyInput,
    /// The input could not be read or parsed as delimited text
    #[error("malformed input: {0}")]
    MalformedInput(#[from] csv::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::MalformedInput(csv::Error::from(err))
    }
}

/// Reasons a row was rejected by the two-column contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    /// A row did not hold exactly an index and a statistic
    #[error("line {line}: expected 2 columns, found {found}")]
    FieldCount {
        /// 1-based line in the source
        line: u64,
        /// Number of fields found
        found: usize,
    },
    /// The statistic field could not be parsed as a number
    #[error("line {line}: statistic {field:?} is not numeric")]
    NotNumeric {
        /// 1-based line in the source
        line: u64,
        /// The raw field
        field: String,
    },
    /// The statistic field parsed as NaN or infinity
    #[error("line {line}: statistic {field:?} is not a finite number")]
    NotFiniteField {
        /// 1-based line in the source
        line: u64,
        /// The raw field
        field: String,
    },
    /// A record of an in-memory dataset holds a NaN or infinite statistic
    #[error("record {row}: statistic is not a finite number")]
    NotFinite {
        /// Zero-based position of the record in the dataset
        row: usize,
    },
}
