use core::cmp::Ordering;

use crate::WindowBounds;

/// A single observation: an opaque index paired with its statistic
///
/// The index is carried through untouched; only the statistic takes part
/// in sorting and averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<I, T> {
    /// Identifier of the observation, passed through verbatim
    pub index: I,
    /// The statistic of interest
    pub value: T,
}

impl<I, T> Record<I, T> {
    /// Creates a new record
    ///
    /// # Arguments
    ///
    /// * `index` - The identifier of the observation
    /// * `value` - The statistic of the observation
    ///
    /// # Returns
    ///
    /// * `Self` - The record
    pub const fn new(index: I, value: T) -> Self {
        Self { index, value }
    }
}

impl<I, T> From<(I, T)> for Record<I, T> {
    fn from((index, value): (I, T)) -> Self {
        Self::new(index, value)
    }
}

/// An ordered, immutable collection of records
///
/// Callers hand a `Dataset` (or a shared snapshot of one) to each
/// computation; nothing in this crate mutates it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<I, T> {
    records: Vec<Record<I, T>>,
}

impl<I, T> Dataset<I, T> {
    /// Creates a dataset from records in their original order
    ///
    /// # Arguments
    ///
    /// * `records` - The records
    ///
    /// # Returns
    ///
    /// * `Self` - The dataset
    pub const fn new(records: Vec<Record<I, T>>) -> Self {
        Self { records }
    }

    /// Returns the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in their original order
    pub fn records(&self) -> &[Record<I, T>] {
        &self.records
    }

    /// Returns an iterator over the records in their original order
    pub fn iter(&self) -> core::slice::Iter<'_, Record<I, T>> {
        self.records.iter()
    }

    /// Returns a view of the records sorted ascending by statistic
    ///
    /// The sort is stable: records with equal statistics keep their
    /// original relative order, so ranks are reproducible.
    ///
    /// # Returns
    ///
    /// * `SortedView<'_, I, T>` - The records in rank order
    pub fn sorted(&self) -> SortedView<'_, I, T>
    where
        T: PartialOrd,
    {
        let mut ranked: Vec<&Record<I, T>> = self.records.iter().collect();
        ranked.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
        SortedView { ranked }
    }
}

impl<I, T> Default for Dataset<I, T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<I, T> FromIterator<(I, T)> for Dataset<I, T> {
    fn from_iter<It: IntoIterator<Item = (I, T)>>(iter: It) -> Self {
        Self::new(iter.into_iter().map(Record::from).collect())
    }
}

impl<I, T> FromIterator<Record<I, T>> for Dataset<I, T> {
    fn from_iter<It: IntoIterator<Item = Record<I, T>>>(iter: It) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, I, T> IntoIterator for &'a Dataset<I, T> {
    type Item = &'a Record<I, T>;
    type IntoIter = core::slice::Iter<'a, Record<I, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Records of a [`Dataset`] borrowed in ascending statistic order
///
/// Position in the view is the record's zero-based rank.
#[derive(Debug, Clone)]
pub struct SortedView<'a, I, T> {
    ranked: Vec<&'a Record<I, T>>,
}

impl<'a, I, T> SortedView<'a, I, T> {
    /// Returns the number of ranked records
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Returns `true` if there are no ranked records
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Returns the record at the given rank
    ///
    /// # Arguments
    ///
    /// * `rank` - Zero-based rank
    ///
    /// # Returns
    ///
    /// * `Option<&Record<I, T>>` - The record, or `None` if the rank is out of range
    pub fn get(&self, rank: usize) -> Option<&'a Record<I, T>> {
        self.ranked.get(rank).copied()
    }

    /// Returns the contiguous run of records covered by the bounds
    ///
    /// Bounds reaching past the view are cut at its end.
    ///
    /// # Arguments
    ///
    /// * `bounds` - Rank bounds, end exclusive
    ///
    /// # Returns
    ///
    /// * `&[&Record<I, T>]` - The records in rank order
    pub fn window(&self, bounds: WindowBounds) -> &[&'a Record<I, T>] {
        let end = bounds.end.min(self.ranked.len());
        let start = bounds.start.min(end);
        &self.ranked[start..end]
    }

    /// Returns an iterator over the records in rank order
    pub fn iter(&self) -> impl Iterator<Item = &'a Record<I, T>> + '_ {
        self.ranked.iter().copied()
    }
}
