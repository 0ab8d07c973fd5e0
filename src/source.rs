//! Leaf nodes that pull from the ultimate element source.

use std::sync::Arc;

use crate::{error::Result, pull::Compute, step::Step};

/// Yields clones of a shared, immutable buffer.
///
/// Each iteration gets its own cursor, so the same buffer can back any number
/// of traversals.
pub struct SliceSource<T> {
    items: Arc<[T]>,
    pos: usize,
}

impl<T> SliceSource<T> {
    /// Start a cursor at the beginning of `items`.
    pub const fn new(items: Arc<[T]>) -> Self {
        Self { items, pos: 0 }
    }
}

impl<T> Compute for SliceSource<T>
where
    T: Clone,
{
    type Item = T;

    fn compute_next(&mut self) -> Result<Step<T>> {
        match self.items.get(self.pos) {
            Some(item) => {
                self.pos += 1;
                Ok(Step::Yield(item.clone()))
            }
            None => Ok(Step::Done),
        }
    }
}

/// Pulls from a std [`Iterator`].
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
{
    /// Wrap an iterator.
    pub const fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I> Compute for IterSource<I>
where
    I: Iterator,
{
    type Item = I::Item;

    #[inline]
    fn compute_next(&mut self) -> Result<Step<I::Item>> {
        Ok(self.iter.next().into())
    }
}

/// Pulls from an iterator of `Result`s; an `Err` item fails the step.
pub struct TryIterSource<I> {
    iter: I,
}

impl<I> TryIterSource<I> {
    /// Wrap a fallible iterator.
    pub const fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I, T> Compute for TryIterSource<I>
where
    I: Iterator<Item = Result<T>>,
{
    type Item = T;

    fn compute_next(&mut self) -> Result<Step<T>> {
        self.iter.next().transpose().map(Step::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SeqError,
        pull::{Pull, PullIter},
    };

    #[test]
    fn test_slice_source_has_independent_cursors() {
        let items: Arc<[i32]> = Arc::from(vec![1, 2]);
        let mut a = Pull::new(SliceSource::new(Arc::clone(&items)));
        let mut b = Pull::new(SliceSource::new(items));

        assert_eq!(a.next().unwrap(), 1);
        assert_eq!(b.next().unwrap(), 1);
        assert_eq!(a.next().unwrap(), 2);
        assert!(!a.has_next().unwrap());
        assert_eq!(b.next().unwrap(), 2);
    }

    #[test]
    fn test_iter_source() {
        let mut pull = Pull::new(IterSource::new("ab".chars()));
        assert_eq!(pull.next().unwrap(), 'a');
        assert_eq!(pull.next().unwrap(), 'b');
        assert!(!pull.has_next().unwrap());
    }

    #[test]
    fn test_try_iter_source_poisons_on_err() {
        let items = vec![Ok(1), Err(SeqError::callback("io")), Ok(3)];
        let mut pull = Pull::new(TryIterSource::new(items.into_iter()));
        assert_eq!(pull.next().unwrap(), 1);
        assert!(matches!(pull.has_next(), Err(SeqError::Callback(_))));
        assert!(pull.has_next().unwrap_err().is_illegal_state());
    }
}
