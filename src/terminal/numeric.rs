//! Numeric reductions: sums, averages and one-pass summaries.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SeqError},
    sequence::Sequence,
};

/// A number type that can be summed and averaged.
///
/// Narrow integers accumulate into a wider type; integer sums wrap on
/// overflow. `f32` values are summed as `f64`.
pub trait Numeric: Copy + PartialOrd {
    /// Accumulator type for sums.
    type Sum: Copy + Default + PartialEq + std::fmt::Debug;

    /// Add `value` to `sum`.
    fn accumulate(sum: Self::Sum, value: Self) -> Self::Sum;

    /// Add two partial sums, with the same overflow behavior as `accumulate`.
    fn merge(left: Self::Sum, right: Self::Sum) -> Self::Sum;

    /// Widen a sum for averaging.
    fn sum_as_f64(sum: Self::Sum) -> f64;
}

macro_rules! integer_numeric {
    ($($ty:ty => $sum:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                type Sum = $sum;

                #[inline]
                fn accumulate(sum: $sum, value: $ty) -> $sum {
                    sum.wrapping_add(<$sum>::from(value))
                }

                #[inline]
                fn merge(left: $sum, right: $sum) -> $sum {
                    left.wrapping_add(right)
                }

                #[inline]
                #[allow(clippy::cast_precision_loss)]
                fn sum_as_f64(sum: $sum) -> f64 {
                    sum as f64
                }
            }
        )*
    };
}

integer_numeric! {
    i32 => i64,
    i64 => i64,
    u32 => u64,
    u64 => u64,
    usize => usize,
}

impl Numeric for f32 {
    type Sum = f64;

    #[inline]
    fn accumulate(sum: f64, value: f32) -> f64 {
        sum + f64::from(value)
    }

    #[inline]
    fn merge(left: f64, right: f64) -> f64 {
        left + right
    }

    #[inline]
    fn sum_as_f64(sum: f64) -> f64 {
        sum
    }
}

impl Numeric for f64 {
    type Sum = f64;

    #[inline]
    fn accumulate(sum: f64, value: f64) -> f64 {
        sum + value
    }

    #[inline]
    fn merge(left: f64, right: f64) -> f64 {
        left + right
    }

    #[inline]
    fn sum_as_f64(sum: f64) -> f64 {
        sum
    }
}

/// Count, sum, minimum and maximum gathered in a single pass.
///
/// An empty summary has count 0, a zero sum and no minimum, maximum or
/// average.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "N: Serialize, N::Sum: Serialize",
        deserialize = "N: Deserialize<'de>, N::Sum: Deserialize<'de>"
    ))
)]
pub struct Summary<N: Numeric> {
    count: usize,
    sum: N::Sum,
    min: Option<N>,
    max: Option<N>,
}

impl<N: Numeric> Summary<N> {
    /// An empty summary.
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: N::Sum::default(),
            min: None,
            max: None,
        }
    }

    /// Record one value.
    pub fn accept(&mut self, value: N) {
        self.count += 1;
        self.sum = N::accumulate(self.sum, value);
        if self.min.map_or(true, |min| value < min) {
            self.min = Some(value);
        }
        if self.max.map_or(true, |max| value > max) {
            self.max = Some(value);
        }
    }

    /// Merge two summaries as if every value had been recorded into one.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        self.count += other.count;
        self.sum = N::merge(self.sum, other.sum);
        if let Some(min) = other.min {
            if self.min.map_or(true, |m| min < m) {
                self.min = Some(min);
            }
        }
        if let Some(max) = other.max {
            if self.max.map_or(true, |m| max > m) {
                self.max = Some(max);
            }
        }
        self
    }

    /// Number of recorded values.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Sum of the recorded values; zero when empty.
    pub fn sum(&self) -> N::Sum {
        self.sum
    }

    /// Smallest recorded value.
    pub fn min(&self) -> Option<N> {
        self.min
    }

    /// Largest recorded value.
    pub fn max(&self) -> Option<N> {
        self.max
    }

    /// Arithmetic mean, or `None` when nothing was recorded.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| N::sum_as_f64(self.sum) / self.count as f64)
    }
}

impl<N: Numeric> Default for Summary<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Numeric> Extend<N> for Summary<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        for value in iter {
            self.accept(value);
        }
    }
}

impl<N: Numeric> FromIterator<N> for Summary<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut summary = Self::new();
        summary.extend(iter);
        summary
    }
}

impl<T> Sequence<T>
where
    T: 'static,
{
    /// Sum of `selector(element)` over the sequence; zero when empty.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let total = Sequence::of(["a", "bb", "ccc"]).sum(|s| s.len())?;
    /// assert_eq!(total, 6);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn sum<N, F>(&self, mut selector: F) -> Result<N::Sum>
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        self.fold(N::Sum::default(), |acc, item| N::accumulate(acc, selector(&item)))
    }

    /// Mean of `selector(element)`.
    ///
    /// Fails with [`SeqError::NoSuchElement`] when empty.
    pub fn average<N, F>(&self, selector: F) -> Result<f64>
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        self.average_opt(selector)?
            .ok_or_else(|| SeqError::no_such_element("cannot average an empty sequence"))
    }

    /// Mean of `selector(element)`, or `None` when empty.
    pub fn average_opt<N, F>(&self, selector: F) -> Result<Option<f64>>
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        self.summary(selector).map(|summary| summary.average())
    }

    /// Gather count, sum, minimum and maximum of `selector(element)` in one pass.
    pub fn summary<N, F>(&self, mut selector: F) -> Result<Summary<N>>
    where
        N: Numeric,
        F: FnMut(&T) -> N,
    {
        self.fold(Summary::new(), |mut summary, item| {
            summary.accept(selector(&item));
            summary
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_sum_widens() {
        let seq = Sequence::of([i32::MAX, i32::MAX]);
        assert_eq!(seq.sum(|x| *x).unwrap(), 2 * i64::from(i32::MAX));
    }

    #[test]
    fn test_long_sum_wraps() {
        let seq = Sequence::of([i64::MAX, 1]);
        assert_eq!(seq.sum(|x| *x).unwrap(), i64::MIN);
    }

    #[test]
    fn test_float_sum_and_average() {
        let seq = Sequence::of([1.5_f32, 2.5]);
        assert_eq!(seq.sum(|x| *x).unwrap(), 4.0);
        assert_eq!(seq.average(|x| *x).unwrap(), 2.0);
    }

    #[test]
    fn test_average_on_empty() {
        let empty = Sequence::<i32>::empty();
        assert!(empty.average(|x| *x).unwrap_err().is_no_such_element());
        assert_eq!(empty.average_opt(|x| *x).unwrap(), None);
        assert_eq!(empty.sum(|x| *x).unwrap(), 0);
    }

    #[test]
    fn test_summary() {
        let summary = Sequence::of([4_u32, 1, 7]).summary(|x| *x).unwrap();
        assert_eq!(summary.count(), 3);
        assert_eq!(summary.sum(), 12);
        assert_eq!(summary.min(), Some(1));
        assert_eq!(summary.max(), Some(7));
        assert_eq!(summary.average(), Some(4.0));
    }

    #[test]
    fn test_empty_summary() {
        let summary = Sequence::<f64>::empty().summary(|x| *x).unwrap();
        assert_eq!(summary, Summary::new());
        assert_eq!(summary.count(), 0);
        assert_eq!(summary.sum(), 0.0);
        assert_eq!(summary.min(), None);
        assert_eq!(summary.average(), None);
    }

    #[test]
    fn test_combine_summaries() {
        let left: Summary<i64> = [3, 9].into_iter().collect();
        let right: Summary<i64> = [-2].into_iter().collect();
        let both = left.combine(right);
        assert_eq!(both.count(), 3);
        assert_eq!(both.sum(), 10);
        assert_eq!(both.min(), Some(-2));
        assert_eq!(both.max(), Some(9));
        assert_eq!(both.combine(Summary::new()), both);
    }

    #[test]
    fn test_combine_wraps_like_accept() {
        let together: Summary<i64> = [i64::MAX, 1].into_iter().collect();
        let left: Summary<i64> = [i64::MAX].into_iter().collect();
        let right: Summary<i64> = [1].into_iter().collect();
        let merged = left.combine(right);
        assert_eq!(merged.sum(), i64::MIN);
        assert_eq!(merged, together);
    }
}
