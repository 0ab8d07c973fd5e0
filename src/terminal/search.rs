use either::Either;

use crate::{
    error::{Result, SeqError},
    pull::PullIter,
    sequence::Sequence,
};

/// Counting, matching and positional lookups.
impl<T> Sequence<T>
where
    T: 'static,
{
    /// Number of elements.
    pub fn count(&self) -> Result<usize> {
        self.count_where(|_| true)
    }

    /// Number of elements matching `pred`.
    pub fn count_where<F>(&self, mut pred: F) -> Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let mut pull = self.pull()?;
        let mut count = 0;
        while pull.has_next()? {
            if pred(&pull.next()?) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Whether the sequence has no elements. Pulls at most one element.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.pull()?.has_next()?)
    }

    /// Whether the sequence has at least one element. Pulls at most one element.
    pub fn is_not_empty(&self) -> Result<bool> {
        self.is_empty().map(|empty| !empty)
    }

    /// Whether any element matches `pred`; stops at the first match.
    pub fn any<F>(&self, pred: F) -> Result<bool>
    where
        F: FnMut(&T) -> bool,
    {
        self.find(pred).map(|found| found.is_some())
    }

    /// Whether every element matches `pred`; stops at the first mismatch.
    /// `true` for an empty sequence.
    pub fn all<F>(&self, mut pred: F) -> Result<bool>
    where
        F: FnMut(&T) -> bool,
    {
        self.any(|item| !pred(item)).map(|mismatch| !mismatch)
    }

    /// Whether no element matches `pred`; stops at the first match.
    pub fn none<F>(&self, pred: F) -> Result<bool>
    where
        F: FnMut(&T) -> bool,
    {
        self.any(pred).map(|found| !found)
    }

    /// Whether `value` occurs in the sequence.
    pub fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.any(|item| item == value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let mut pull = self.pull()?;
        let mut index = 0;
        while pull.has_next()? {
            if pull.next()? == *value {
                return Ok(Some(index));
            }
            index += 1;
        }
        Ok(None)
    }

    /// The first element.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// assert_eq!(Sequence::of([5]).first()?, 5);
    /// assert!(Sequence::<i32>::empty().first().unwrap_err().is_no_such_element());
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn first(&self) -> Result<T> {
        self.first_opt()?
            .ok_or_else(|| SeqError::no_such_element("sequence is empty"))
    }

    /// The first element, or `None` when empty.
    pub fn first_opt(&self) -> Result<Option<T>> {
        let mut pull = self.pull()?;
        if pull.has_next()? {
            pull.next().map(Some)
        } else {
            Ok(None)
        }
    }

    /// The first element matching `pred`.
    pub fn first_where<F>(&self, pred: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.find(pred)?
            .ok_or_else(|| SeqError::no_such_element("no element matches the predicate"))
    }

    /// The first element matching `pred`, or `None`.
    pub fn find<F>(&self, mut pred: F) -> Result<Option<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut pull = self.pull()?;
        while pull.has_next()? {
            let item = pull.next()?;
            if pred(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// The last element.
    pub fn last(&self) -> Result<T> {
        self.last_opt()?
            .ok_or_else(|| SeqError::no_such_element("sequence is empty"))
    }

    /// The last element, or `None` when empty.
    pub fn last_opt(&self) -> Result<Option<T>> {
        self.find_last(|_| true)
    }

    /// The last element matching `pred`.
    pub fn last_where<F>(&self, pred: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.find_last(pred)?
            .ok_or_else(|| SeqError::no_such_element("no element matches the predicate"))
    }

    /// The last element matching `pred`, or `None`. Always traverses everything.
    pub fn find_last<F>(&self, mut pred: F) -> Result<Option<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut pull = self.pull()?;
        let mut last = None;
        while pull.has_next()? {
            let item = pull.next()?;
            if pred(&item) {
                last = Some(item);
            }
        }
        Ok(last)
    }

    /// The only element.
    ///
    /// Fails with [`SeqError::NoSuchElement`] when empty and with
    /// [`SeqError::InvalidArgument`] when there is more than one element.
    pub fn single(&self) -> Result<T> {
        self.single_where(|_| true)
    }

    /// The only element, or `None` when there are zero or several.
    ///
    /// The two cases are deliberately indistinguishable here; use
    /// [`single`](Self::single) to tell them apart.
    pub fn single_opt(&self) -> Result<Option<T>> {
        self.single_where_opt(|_| true)
    }

    /// The only element matching `pred`; errors as for [`single`](Self::single).
    pub fn single_where<F>(&self, pred: F) -> Result<T>
    where
        F: FnMut(&T) -> bool,
    {
        match self.single_match(pred)? {
            SingleMatch::None => Err(SeqError::no_such_element(
                "sequence contains no matching element",
            )),
            SingleMatch::One(item) => Ok(item),
            SingleMatch::Many => Err(SeqError::InvalidArgument(
                "sequence contains more than one matching element".to_string(),
            )),
        }
    }

    /// The only element matching `pred`, or `None` when there are zero or several.
    pub fn single_where_opt<F>(&self, pred: F) -> Result<Option<T>>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(match self.single_match(pred)? {
            SingleMatch::One(item) => Some(item),
            SingleMatch::None | SingleMatch::Many => None,
        })
    }

    fn single_match<F>(&self, mut pred: F) -> Result<SingleMatch<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut pull = self.pull()?;
        let mut found = None;
        while pull.has_next()? {
            let item = pull.next()?;
            if pred(&item) {
                if found.is_some() {
                    return Ok(SingleMatch::Many);
                }
                found = Some(item);
            }
        }
        Ok(found.map_or(SingleMatch::None, SingleMatch::One))
    }

    /// The element at `index`.
    ///
    /// Fails with [`SeqError::IndexOutOfRange`] when the sequence is shorter.
    pub fn element_at(&self, index: usize) -> Result<T> {
        match self.nth_or_len(index)? {
            Either::Left(item) => Ok(item),
            Either::Right(len) => Err(SeqError::IndexOutOfRange { index, len }),
        }
    }

    /// The element at `index`, or `None` when the sequence is shorter.
    pub fn element_at_opt(&self, index: usize) -> Result<Option<T>> {
        Ok(self.nth_or_len(index)?.left())
    }

    // The element at `index`, or the full length when the sequence is shorter.
    fn nth_or_len(&self, index: usize) -> Result<Either<T, usize>> {
        let mut pull = self.pull()?;
        let mut seen = 0;
        while pull.has_next()? {
            let item = pull.next()?;
            if seen == index {
                return Ok(Either::Left(item));
            }
            seen += 1;
        }
        Ok(Either::Right(seen))
    }
}

enum SingleMatch<T> {
    None,
    One(T),
    Many,
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::{SeqError, Sequence};

    #[test]
    fn test_counting() {
        let seq = Sequence::of([1, 2, 3, 4]);
        assert_eq!(seq.count().unwrap(), 4);
        assert_eq!(seq.count_where(|x| x % 2 == 1).unwrap(), 2);
        assert_eq!(Sequence::<i32>::empty().count().unwrap(), 0);
    }

    #[test]
    fn test_emptiness() {
        assert!(Sequence::<u8>::empty().is_empty().unwrap());
        assert!(Sequence::of([0]).is_not_empty().unwrap());
    }

    #[test]
    fn test_any_stops_at_first_match() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let seq = Sequence::from_iterable(1..=100).on_each(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        assert!(seq.any(|x| *x == 3).unwrap());
        assert_eq!(seen.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_all_and_none() {
        let seq = Sequence::of([2, 4, 6]);
        assert!(seq.all(|x| x % 2 == 0).unwrap());
        assert!(!seq.all(|x| *x < 6).unwrap());
        assert!(seq.none(|x| *x > 6).unwrap());
        assert!(Sequence::<i32>::empty().all(|_| false).unwrap());
    }

    #[test]
    fn test_first_and_last() {
        let seq = Sequence::of([1, 2, 3, 4]);
        assert_eq!(seq.first().unwrap(), 1);
        assert_eq!(seq.last().unwrap(), 4);
        assert_eq!(seq.first_where(|x| x % 2 == 0).unwrap(), 2);
        assert_eq!(seq.last_where(|x| x % 2 == 1).unwrap(), 3);
        assert_eq!(seq.find(|x| *x > 10).unwrap(), None);
        assert!(seq.first_where(|x| *x > 10).unwrap_err().is_no_such_element());

        let empty = Sequence::<i32>::empty();
        assert!(empty.last().unwrap_err().is_no_such_element());
        assert_eq!(empty.first_opt().unwrap(), None);
        assert_eq!(empty.last_opt().unwrap(), None);
    }

    #[test]
    fn test_single_variants() {
        assert_eq!(Sequence::of([7]).single().unwrap(), 7);
        assert!(Sequence::<i32>::empty()
            .single()
            .unwrap_err()
            .is_no_such_element());
        assert!(Sequence::of([1, 2]).single().unwrap_err().is_invalid_argument());

        assert_eq!(Sequence::of([1, 2]).single_opt().unwrap(), None);
        assert_eq!(Sequence::<i32>::empty().single_opt().unwrap(), None);

        let seq = Sequence::of([1, 2, 3]);
        assert_eq!(seq.single_where(|x| *x == 2).unwrap(), 2);
        assert!(seq.single_where(|x| *x > 1).unwrap_err().is_invalid_argument());
        assert_eq!(seq.single_where_opt(|x| *x > 1).unwrap(), None);
    }

    #[test]
    fn test_positional_lookups() {
        let seq = Sequence::of(['a', 'b', 'c']);
        assert_eq!(seq.element_at(1).unwrap(), 'b');
        assert!(matches!(
            seq.element_at(5),
            Err(SeqError::IndexOutOfRange { index: 5, len: 3 })
        ));
        assert_eq!(seq.element_at_opt(5).unwrap(), None);
        assert_eq!(seq.index_of(&'c').unwrap(), Some(2));
        assert_eq!(seq.index_of(&'z').unwrap(), None);
        assert!(seq.contains(&'a').unwrap());
    }

    #[test]
    fn test_element_at_opt_keeps_pipeline_errors() {
        let inner = Sequence::of([10, 20]);
        let lookups = Sequence::of([0_usize, 5]).try_map(move |i| inner.element_at(i));

        let err = lookups.element_at_opt(1).unwrap_err();
        assert!(matches!(err, SeqError::IndexOutOfRange { index: 5, len: 2 }));
        assert_eq!(lookups.element_at_opt(0).unwrap(), Some(10));
    }
}
