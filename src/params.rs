use crate::{
    Error, Result,
    helper::rank_from_fraction,
};

/// Validated percentile and window width for one window selection
///
/// Both parameters are fractions of the dataset length:
///
/// * `percentile` (K) picks the target rank, `round(K * n)`
/// * `width` (W) picks the half window, `round(W / 2 * n)` ranks either side
///
/// Rounding is half-to-even throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowParams {
    percentile: f64,
    width: f64,
}

impl WindowParams {
    /// Percentile used when the caller supplies none
    pub const DEFAULT_PERCENTILE: f64 = 0.5;

    /// Window width used when the caller supplies none
    pub const DEFAULT_WIDTH: f64 = 0.002;

    /// Creates validated parameters
    ///
    /// # Arguments
    ///
    /// * `percentile` - Fraction of the sorted dataset locating the target rank
    /// * `width` - Fraction of the dataset length spanned by the window
    ///
    /// # Returns
    ///
    /// * `Result<Self>` - The parameters, or [`Error::InvalidParameter`] when
    ///   either value is outside `[0, 1]` or not a number
    ///
    /// # Examples
    ///
    /// ```
    /// use critical_window::{Error, WindowParams};
    ///
    /// assert!(WindowParams::new(0.95, 0.01).is_ok());
    /// assert!(matches!(
    ///     WindowParams::new(1.2, 0.01),
    ///     Err(Error::InvalidParameter { name: "percentile", .. })
    /// ));
    /// ```
    pub fn new(percentile: f64, width: f64) -> Result<Self> {
        Ok(Self {
            percentile: unit_interval("percentile", percentile)?,
            width: unit_interval("width", width)?,
        })
    }

    /// Returns the percentile (K)
    pub const fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Returns the window width (W)
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Computes the rank bounds of the window over `len` sorted records
    ///
    /// The target rank is `round(K * n)` and the window spans `round(W / 2 * n)`
    /// ranks either side, cut at both ends of the ranking. A target of `n`
    /// with a zero half window would cover nothing; the window then falls
    /// back to the last rank so that `K = 1` still selects the largest
    /// statistic.
    ///
    /// # Arguments
    ///
    /// * `len` - Number of records being ranked
    ///
    /// # Returns
    ///
    /// * `Option<WindowBounds>` - The bounds, or `None` when `len` is zero
    ///
    /// # Examples
    ///
    /// ```
    /// use critical_window::WindowParams;
    ///
    /// let bounds = WindowParams::new(0.5, 0.2).unwrap().bounds(10).unwrap();
    /// assert_eq!((bounds.start, bounds.target, bounds.end), (4, 5, 7));
    ///
    /// let bounds = WindowParams::new(1.0, 0.2).unwrap().bounds(10).unwrap();
    /// assert_eq!((bounds.start, bounds.target, bounds.end), (9, 10, 10));
    /// ```
    pub fn bounds(&self, len: usize) -> Option<WindowBounds> {
        let last = len.checked_sub(1)?;
        let target = rank_from_fraction(self.percentile, len);
        let half = rank_from_fraction(self.width / 2.0, len);
        let start = target.saturating_sub(half);
        let end = target.saturating_add(half).saturating_add(1).min(len);
        if start >= end {
            return Some(WindowBounds {
                target: last,
                start: last,
                end: len,
            });
        }
        Some(WindowBounds { target, start, end })
    }
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            percentile: Self::DEFAULT_PERCENTILE,
            width: Self::DEFAULT_WIDTH,
        }
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// Rank bounds of a window over a sorted dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    /// Rank the window is centred on, `n` when the percentile rounds past the last rank
    pub target: usize,
    /// First rank in the window
    pub start: usize,
    /// One past the last rank in the window
    pub end: usize,
}

impl WindowBounds {
    /// Returns the number of ranks covered
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if no rank is covered
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(k: f64, w: f64, n: usize) -> WindowBounds {
        WindowParams::new(k, w).unwrap().bounds(n).unwrap()
    }

    #[test]
    fn rejects_out_of_range() {
        for (k, w) in [(1.2, 0.0), (-0.1, 0.0), (f64::NAN, 0.0), (f64::INFINITY, 0.0)] {
            assert!(matches!(
                WindowParams::new(k, w),
                Err(Error::InvalidParameter { name: "percentile", .. })
            ));
        }
        for w in [1.0001, -0.5, f64::NAN] {
            assert!(matches!(
                WindowParams::new(0.5, w),
                Err(Error::InvalidParameter { name: "width", .. })
            ));
        }
    }

    #[test]
    fn accepts_closed_interval() {
        assert!(WindowParams::new(0.0, 0.0).is_ok());
        assert!(WindowParams::new(1.0, 1.0).is_ok());
    }

    #[test]
    fn defaults() {
        let params = WindowParams::default();
        assert_eq!(params.percentile(), 0.5);
        assert_eq!(params.width(), 0.002);
    }

    #[test]
    fn no_bounds_for_nothing() {
        assert!(WindowParams::default().bounds(0).is_none());
    }

    #[test]
    fn half_rounds_to_even() {
        let b = bounds(0.5, 0.0, 3);
        assert_eq!((b.start, b.target, b.end), (2, 2, 3));

        let b = bounds(0.5, 0.0, 5);
        assert_eq!((b.start, b.target, b.end), (2, 2, 3));
    }

    #[test]
    fn zero_width_is_single_rank() {
        for n in 1..50 {
            for k in [0.0, 0.1, 0.25, 0.5, 0.75, 0.999, 1.0] {
                assert_eq!(bounds(k, 0.0, n).len(), 1, "k={k} n={n}");
            }
        }
    }

    #[test]
    fn extremes_anchor_at_ends() {
        let b = bounds(0.0, 0.0, 10);
        assert_eq!((b.start, b.end), (0, 1));

        let b = bounds(1.0, 0.0, 10);
        assert_eq!((b.target, b.start, b.end), (9, 9, 10));

        let b = bounds(1.0, 0.2, 10);
        assert_eq!((b.target, b.start, b.end), (10, 9, 10));
    }

    #[test]
    fn top_target_keeps_only_ranks_below_it() {
        // round(K * n) = n: the window is the half window below the end
        let b = bounds(1.0, 0.002, 1000);
        assert_eq!((b.target, b.start, b.end), (1000, 999, 1000));

        let b = bounds(1.0, 0.1, 100);
        assert_eq!((b.start, b.end), (95, 100));
        assert_eq!(b.len(), 5);

        let b = bounds(0.999, 0.0, 10);
        assert_eq!((b.target, b.start, b.end), (9, 9, 10));
    }

    #[test]
    fn full_width_covers_everything_from_the_middle() {
        let b = bounds(0.5, 1.0, 10);
        assert_eq!((b.start, b.end), (0, 10));
    }

    #[test]
    fn window_grows_with_width() {
        for n in [1, 7, 100, 1001] {
            for k in [0.0, 0.3, 0.5, 0.97, 1.0] {
                let mut prev = 0;
                for step in 0..=100 {
                    let len = bounds(k, step as f64 / 100.0, n).len();
                    assert!(len >= prev, "k={k} n={n} step={step}");
                    prev = len;
                }
            }
        }
    }
}
