use crate::{
    error::Result,
    pull::{BoxPull, Compute, PullIter},
    sequence::Sequence,
    step::Step,
};

/// Yields everything from the first iterator, then everything from a second sequence.
///
/// The second sequence is only opened once the first is exhausted, and the
/// first iterator is dropped at that point.
pub struct Concat<P, T> {
    first: Option<P>,
    second: Sequence<T>,
    tail: Option<BoxPull<T>>,
}

impl<P, T> Concat<P, T> {
    /// Create a concatenation of `first` and `second`.
    pub const fn new(first: P, second: Sequence<T>) -> Self {
        Self {
            first: Some(first),
            second,
            tail: None,
        }
    }
}

impl<P, T> Compute for Concat<P, T>
where
    P: PullIter<Item = T>,
    T: 'static,
{
    type Item = T;

    fn compute_next(&mut self) -> Result<Step<T>> {
        if let Some(first) = self.first.as_mut() {
            if first.has_next()? {
                return first.next().map(Step::Yield);
            }
            self.first = None;
            self.tail = Some(self.second.pull()?);
        }
        match self.tail.as_mut() {
            Some(tail) => {
                if tail.has_next()? {
                    tail.next().map(Step::Yield)
                } else {
                    Ok(Step::Done)
                }
            }
            None => Ok(Step::Done),
        }
    }
}

/// Pairs up elements of two iterators, stopping at the shorter one.
pub struct Zip<A, B> {
    left: A,
    right: B,
}

impl<A, B> Zip<A, B> {
    /// Create a zipping node.
    pub const fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A, B> Compute for Zip<A, B>
where
    A: PullIter,
    B: PullIter,
{
    type Item = (A::Item, B::Item);

    fn compute_next(&mut self) -> Result<Step<Self::Item>> {
        if !self.left.has_next()? || !self.right.has_next()? {
            return Ok(Step::Done);
        }
        Ok(Step::Yield((self.left.next()?, self.right.next()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pull::Pull, source::IterSource};

    #[test]
    fn test_concat_switches_to_second_after_first_done() {
        let first = Pull::new(IterSource::new(1..=2));
        let mut pull = Pull::new(Concat::new(first, Sequence::of([3, 4])));
        let mut out = Vec::new();
        while pull.has_next().unwrap() {
            out.push(pull.next().unwrap());
        }
        assert_eq!(out, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_concat_with_exhausted_second() {
        let first = Pull::new(IterSource::new(1..=2));
        let mut pull = Pull::new(Concat::new(first, Sequence::<i32>::empty()));
        assert_eq!(pull.next().unwrap(), 1);
        assert_eq!(pull.next().unwrap(), 2);
        assert!(!pull.has_next().unwrap());
        assert!(!pull.has_next().unwrap());
    }

    #[test]
    fn test_concat_opens_second_lazily() {
        let once = Sequence::from_iterator(vec![9]);
        let first = Pull::new(IterSource::new(1..=3));
        let mut pull = Pull::new(Concat::new(first, once.clone()));
        assert_eq!(pull.next().unwrap(), 1);
        // Still untouched, so the once-only sequence can be consumed elsewhere.
        assert_eq!(once.to_list().unwrap(), vec![9]);
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let left = Pull::new(IterSource::new(1..=3));
        let right = Pull::new(IterSource::new("ab".chars()));
        let mut pull = Pull::new(Zip::new(left, right));
        assert_eq!(pull.next().unwrap(), (1, 'a'));
        assert_eq!(pull.next().unwrap(), (2, 'b'));
        assert!(!pull.has_next().unwrap());
    }
}
