use ahash::RandomState;
use hashbrown::{HashMap, hash_map::Entry};
use num_traits::Float;
use ordered_float::OrderedFloat;
use tracing::debug;

use std::sync::Arc;

use crate::{Dataset, Result, Selection, WindowParams, compute_window};

type ParamsKey = (OrderedFloat<f64>, OrderedFloat<f64>);

/// Memoized window selections over one dataset snapshot
///
/// Holds a shared, immutable snapshot of the dataset and remembers the most
/// recently requested selections computed from it, keyed by percentile and
/// width. Callers that re-trigger the computation whenever a parameter
/// changes get the earlier result back while it is still held.
///
/// At most `capacity` selections are held; the least recently requested one
/// is evicted to make room. [`WindowCache::new`] keeps only the last one.
///
/// Replacing the snapshot discards all memoized selections; a computation
/// never observes a dataset other than the one it was started with.
///
/// # Type Parameters
///
/// * `I` - The index type of the records
/// * `T` - The statistic type
#[derive(Debug, Clone)]
pub struct WindowCache<I, T> {
    /// The dataset all selections are computed from
    snapshot: Arc<Dataset<I, T>>,
    /// Selections by (percentile, width), with the tick of their last request
    selections: HashMap<ParamsKey, (u64, Selection<I, T>), RandomState>,
    /// Maximum number of selections held
    capacity: usize,
    /// Request counter used for recency
    tick: u64,
}

impl<I, T> WindowCache<I, T>
where
    I: Clone,
    T: Float + Default,
{
    /// Number of selections held by [`WindowCache::new`]
    pub const DEFAULT_CAPACITY: usize = 1;

    /// Creates an empty cache over the snapshot, holding the last selection
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The dataset to select from
    ///
    /// # Returns
    ///
    /// * `Self` - The cache
    pub fn new(snapshot: impl Into<Arc<Dataset<I, T>>>) -> Self {
        Self::with_capacity(snapshot, Self::DEFAULT_CAPACITY)
    }

    /// Creates an empty cache over the snapshot holding up to `capacity` selections
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The dataset to select from
    /// * `capacity` - Maximum number of selections held, at least one
    ///
    /// # Returns
    ///
    /// * `Self` - The cache
    pub fn with_capacity(snapshot: impl Into<Arc<Dataset<I, T>>>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            snapshot: snapshot.into(),
            selections: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
            capacity,
            tick: 0,
        }
    }

    /// Returns the snapshot selections are computed from
    pub fn snapshot(&self) -> &Arc<Dataset<I, T>> {
        &self.snapshot
    }

    /// Returns the maximum number of selections held
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Swaps in a new snapshot and drops every memoized selection
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The new dataset
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The cache
    pub fn replace(&mut self, snapshot: impl Into<Arc<Dataset<I, T>>>) -> &mut Self {
        self.snapshot = snapshot.into();
        self.clear()
    }

    /// Returns the selection for the parameters, computing it if it is not held
    ///
    /// Errors are not memoized; asking again retries the computation.
    ///
    /// # Arguments
    ///
    /// * `params` - Validated percentile and window width
    ///
    /// # Returns
    ///
    /// * `Result<&Selection<I, T>>` - The selection, or the error from [`compute_window`]
    ///
    /// # Examples
    ///
    /// ```
    /// use critical_window::{Dataset, WindowCache, WindowParams};
    ///
    /// let data: Dataset<u32, f64> = (0..10).map(|i| (i, f64::from(i))).collect();
    /// let mut cache = WindowCache::new(data);
    ///
    /// let params = WindowParams::new(0.5, 0.2).unwrap();
    /// let average = cache.select(params).unwrap().average();
    /// assert_eq!(average, 5.0);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn select(&mut self, params: WindowParams) -> Result<&Selection<I, T>> {
        let key = (
            OrderedFloat(params.percentile()),
            OrderedFloat(params.width()),
        );
        self.tick += 1;
        let tick = self.tick;

        if !self.selections.contains_key(&key) {
            self.evict_until(self.capacity - 1);
        }

        match self.selections.entry(key) {
            Entry::Occupied(entry) => {
                debug!(
                    percentile = params.percentile(),
                    width = params.width(),
                    "critical window memoized"
                );
                let slot = entry.into_mut();
                slot.0 = tick;
                Ok(&slot.1)
            }
            Entry::Vacant(entry) => {
                let selection = compute_window(&self.snapshot, params)?;
                Ok(&entry.insert((tick, selection)).1)
            }
        }
    }

    /// Returns the number of memoized selections
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Returns `true` if nothing is memoized
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Drops every memoized selection, keeping the snapshot
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The cache
    pub fn clear(&mut self) -> &mut Self {
        self.selections.clear();
        self
    }

    // Evicts least recently requested selections until at most `keep` remain
    fn evict_until(&mut self, keep: usize) {
        while self.selections.len() > keep {
            let oldest = self
                .selections
                .iter()
                .min_by_key(|(_, (tick, _))| *tick)
                .map(|(key, _)| *key);
            match oldest {
                Some(key) => {
                    self.selections.remove(&key);
                }
                None => break,
            }
        }
    }
}
