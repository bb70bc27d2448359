use num_traits::Float;
use tracing::debug;

use crate::{ColumnError, Dataset, Error, Record, Result, WindowBounds, WindowParams, helper::mean};

/// # Critical Window Selection
///
/// Sorts the dataset ascending by statistic, locates the record at the
/// percentile rank and averages the statistic over the symmetric window of
/// ranks around it.
///
/// The computation is pure: the dataset is only read, and identical inputs
/// always produce identical selections.
///
/// # Arguments
///
/// * `dataset` - The records to select from
/// * `params` - Validated percentile and window width
///
/// # Returns
///
/// * `Result<Selection<I, T>>` - The window and its average, or
///   - [`Error::EmptyInput`] if the dataset has no records
///   - [`Error::InvalidColumn`] if a statistic is not a finite number
///
/// # Examples
///
/// ```
/// use critical_window::{Dataset, WindowParams, compute_window};
///
/// let data: Dataset<_, f64> = [("id1", 5.0), ("id2", 1.0), ("id3", 3.0)]
///     .into_iter()
///     .collect();
/// let params = WindowParams::new(0.5, 0.0).unwrap();
///
/// let selection = compute_window(&data, params).unwrap();
/// assert_eq!(selection.indices().collect::<Vec<_>>(), [&"id1"]);
/// assert_eq!(selection.average(), 5.0);
/// ```
pub fn compute_window<I, T>(dataset: &Dataset<I, T>, params: WindowParams) -> Result<Selection<I, T>>
where
    I: Clone,
    T: Float + Default,
{
    if let Some(row) = dataset.iter().position(|r| !r.value.is_finite()) {
        return Err(ColumnError::NotFinite { row }.into());
    }

    let bounds = params.bounds(dataset.len()).ok_or(Error::EmptyInput)?;
    let sorted = dataset.sorted();
    let rows: Vec<Record<I, T>> = sorted.window(bounds).iter().map(|r| (*r).clone()).collect();
    let average = mean(rows.iter().map(|r| r.value)).ok_or(Error::EmptyInput)?;

    debug!(
        len = dataset.len(),
        percentile = params.percentile(),
        width = params.width(),
        target = bounds.target,
        start = bounds.start,
        end = bounds.end,
        "selected critical window"
    );

    Ok(Selection {
        rows,
        bounds,
        average,
    })
}

/// The records of a critical window together with their average
///
/// Rows are in ascending statistic order and keep each record's original
/// index and statistic paired.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<I, T> {
    rows: Vec<Record<I, T>>,
    bounds: WindowBounds,
    average: T,
}

impl<I, T: Copy> Selection<I, T> {
    /// Returns the window rows in rank order
    pub fn rows(&self) -> &[Record<I, T>] {
        &self.rows
    }

    /// Returns the rank bounds the window was cut from
    pub const fn bounds(&self) -> WindowBounds {
        self.bounds
    }

    /// Returns the arithmetic mean of the statistic over the window
    pub const fn average(&self) -> T {
        self.average
    }

    /// Returns the number of rows in the window
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the window holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the index of each row in rank order
    pub fn indices(&self) -> impl Iterator<Item = &I> {
        self.rows.iter().map(|r| &r.index)
    }
}
