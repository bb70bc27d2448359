use num_traits::Float;

use crate::Kbn;

/// Returns the zero-based rank a fraction of `len` lands on
///
/// Halves are rounded to the nearest even rank, so `1.5` and `2.5` both
/// resolve to `2`.
///
/// # Arguments
///
/// * `fraction` - The fraction of `len`, expected within `[0, 1]`
/// * `len` - The number of ranks
///
/// # Returns
///
/// * `usize` - The rounded rank
#[inline]
pub fn rank_from_fraction(fraction: f64, len: usize) -> usize {
    (fraction * len as f64).round_ties_even() as usize
}

/// Returns the arithmetic mean of the values, summed with Kbn compensation
///
/// # Arguments
///
/// * `values` - The values to average
///
/// # Returns
///
/// * `Option<T>` - The mean, or `None` if there are no values
#[inline]
pub fn mean<T, It>(values: It) -> Option<T>
where
    T: Float + Default,
    It: IntoIterator<Item = T>,
{
    let mut sum = Kbn::<T>::default();
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(sum.total() / T::from(count)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn rank_rounds_half_to_even() {
        assert_eq!(rank_from_fraction(0.5, 3), 2);
        assert_eq!(rank_from_fraction(0.5, 5), 2);
        assert_eq!(rank_from_fraction(0.25, 10), 2);
        assert_eq!(rank_from_fraction(0.35, 10), 4);
        assert_eq!(rank_from_fraction(0.0, 10), 0);
        assert_eq!(rank_from_fraction(1.0, 10), 10);
    }

    #[test]
    fn rank_rounds_away_from_half() {
        assert_eq!(rank_from_fraction(0.33, 10), 3);
        assert_eq!(rank_from_fraction(0.37, 10), 4);
        assert_eq!(rank_from_fraction(0.001, 1000), 1);
    }

    #[test]
    fn mean_works() {
        let m: f64 = mean([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_approx_eq!(m, 2.5);

        let m: f64 = mean([1_000_000.1, 1_000_000.2, 1_000_000.3]).unwrap();
        assert_approx_eq!(m, 1_000_000.2, 1e-6);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert!(mean::<f64, _>([]).is_none());
    }
}
