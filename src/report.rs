use core::fmt;

use crate::{ColumnError, Error, Selection};

/// One-line summary of a critical window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Summary {
    /// The average statistic over a non-empty window
    Average(f64),
    /// There was nothing to average
    NoData,
}

impl Summary {
    /// Summarizes the outcome of a window selection
    ///
    /// Empty input maps to [`Summary::NoData`]; every other error is
    /// returned for the caller to report on its own.
    ///
    /// # Arguments
    ///
    /// * `outcome` - The result of [`compute_window`](crate::compute_window)
    ///
    /// # Returns
    ///
    /// * `Result<Self, &Error>` - The summary, or the error it could not summarize
    ///
    /// # Examples
    ///
    /// ```
    /// use critical_window::{Error, Summary};
    ///
    /// let outcome: Result<critical_window::Selection<u32, f64>, _> = Err(Error::EmptyInput);
    /// let summary = Summary::from_outcome(&outcome).unwrap();
    /// assert_eq!(summary.to_string(), "No data available to calculate average.");
    /// ```
    pub fn from_outcome<I>(
        outcome: &Result<Selection<I, f64>, Error>,
    ) -> Result<Self, &Error> {
        match outcome {
            Ok(selection) if selection.is_empty() => Ok(Self::NoData),
            Ok(selection) => Ok(Self::Average(selection.average())),
            Err(Error::EmptyInput) => Ok(Self::NoData),
            Err(err) => Err(err),
        }
    }
}

impl<I> From<&Selection<I, f64>> for Summary {
    fn from(selection: &Selection<I, f64>) -> Self {
        if selection.is_empty() {
            Self::NoData
        } else {
            Self::Average(selection.average())
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Average(avg) => write!(f, "Average statistic in the window: {avg:.6}"),
            Self::NoData => f.write_str("No data available to calculate average."),
        }
    }
}

/// Whether an input file has been supplied and parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// A file was read into a dataset
    Loaded,
    /// No file has been supplied
    NotLoaded,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loaded => "File loaded successfully.",
            Self::NotLoaded => "No file loaded.",
        })
    }
}

/// Renders an error as a message for the end user
///
/// Each error kind keeps its own wording so distinct causes stay
/// distinguishable.
///
/// # Arguments
///
/// * `err` - The error to describe
///
/// # Returns
///
/// * `String` - The message
pub fn describe(err: &Error) -> String {
    match err {
        Error::InvalidParameter { name, value } => {
            format!("Invalid {name}: {value} is outside the range 0 to 1.")
        }
        Error::InvalidColumn(ColumnError::FieldCount { line, found }) => format!(
            "Invalid file: line {line} has {found} columns; expected an index and a statistic."
        ),
        Error::InvalidColumn(ColumnError::NotNumeric { line, field }) => {
            format!("Invalid file: statistic {field:?} on line {line} is not a number.")
        }
        Error::InvalidColumn(ColumnError::NotFiniteField { line, field }) => {
            format!("Invalid file: statistic {field:?} on line {line} is not a finite number.")
        }
        Error::InvalidColumn(ColumnError::NotFinite { row }) => {
            format!("Invalid data: record {row} has a statistic that is not a finite number.")
        }
        Error::EmptyInput => Summary::NoData.to_string(),
        Error::MalformedInput(source) => format!("Could not read file: {source}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, WindowParams, compute_window};

    #[test]
    fn average_has_six_decimals() {
        assert_eq!(
            Summary::Average(5.0).to_string(),
            "Average statistic in the window: 5.000000"
        );
        assert_eq!(
            Summary::Average(1.0 / 3.0).to_string(),
            "Average statistic in the window: 0.333333"
        );
    }

    #[test]
    fn summary_from_outcome() {
        let data: Dataset<_, f64> = [("id1", 5.0), ("id2", 1.0), ("id3", 3.0)]
            .into_iter()
            .collect();
        let outcome = compute_window(&data, WindowParams::new(0.5, 0.0).unwrap());
        assert_eq!(Summary::from_outcome(&outcome).ok(), Some(Summary::Average(5.0)));

        let empty: Dataset<&str, f64> = Dataset::default();
        let outcome = compute_window(&empty, WindowParams::default());
        assert_eq!(Summary::from_outcome(&outcome).ok(), Some(Summary::NoData));
    }

    #[test]
    fn summary_passes_other_errors_through() {
        let data: Dataset<_, f64> = [("a", f64::INFINITY)].into_iter().collect();
        let outcome = compute_window(&data, WindowParams::default());
        assert!(matches!(
            Summary::from_outcome(&outcome),
            Err(Error::InvalidColumn(_))
        ));
    }

    #[test]
    fn file_status() {
        assert_eq!(FileStatus::Loaded.to_string(), "File loaded successfully.");
        assert_eq!(FileStatus::NotLoaded.to_string(), "No file loaded.");
    }

    #[test]
    fn descriptions_stay_distinct() {
        let errors = [
            Error::InvalidParameter {
                name: "percentile",
                value: 1.2,
            },
            Error::InvalidColumn(ColumnError::FieldCount { line: 2, found: 3 }),
            Error::InvalidColumn(ColumnError::NotNumeric {
                line: 4,
                field: "x".into(),
            }),
            Error::InvalidColumn(ColumnError::NotFiniteField {
                line: 3,
                field: "NaN".into(),
            }),
            Error::InvalidColumn(ColumnError::NotFinite { row: 1 }),
            Error::EmptyInput,
            Error::from(std::io::Error::other("disk")),
        ];
        let messages: Vec<_> = errors.iter().map(describe).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(messages[0], "Invalid percentile: 1.2 is outside the range 0 to 1.");
        assert_eq!(
            messages[3],
            "Invalid file: statistic \"NaN\" on line 3 is not a finite number."
        );
        assert_eq!(messages[5], "No data available to calculate average.");
    }
}
