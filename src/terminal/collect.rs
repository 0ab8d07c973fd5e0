use std::{collections::HashSet, hash::Hash};

use crate::{
    error::Result,
    immutable::{ImmutableList, ImmutableSet},
    pull::PullIter,
    sequence::Sequence,
};

/// Materialization into collections.
impl<T> Sequence<T>
where
    T: 'static,
{
    /// Collect into a fresh `Vec` in encounter order.
    pub fn to_list(&self) -> Result<Vec<T>> {
        self.collect()
    }

    /// Collect into a fresh `HashSet`; duplicates collapse.
    pub fn to_set(&self) -> Result<HashSet<T>>
    where
        T: Eq + Hash,
    {
        self.collect()
    }

    /// Collect into a read-only list.
    ///
    /// Zero and one elements get dedicated representations that do not
    /// allocate a shared buffer.
    pub fn to_unmodifiable_list(&self) -> Result<ImmutableList<T>> {
        self.to_list().map(ImmutableList::from_vec)
    }

    /// Collect into a read-only set.
    pub fn to_unmodifiable_set(&self) -> Result<ImmutableSet<T>>
    where
        T: Eq + Hash,
    {
        self.to_set().map(ImmutableSet::from_set)
    }

    /// Append every element to `target` and hand it back.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let mut out = vec![0];
    /// Sequence::of([1, 2]).to_collection(&mut out)?.push(3);
    /// assert_eq!(out, vec![0, 1, 2, 3]);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn to_collection<'a, C>(&self, target: &'a mut C) -> Result<&'a mut C>
    where
        C: Extend<T>,
    {
        let mut pull = self.pull()?;
        while pull.has_next()? {
            target.extend(Some(pull.next()?));
        }
        Ok(target)
    }

    /// Collect into any [`FromIterator`] container.
    ///
    /// The first failure aborts collection and is returned instead.
    pub fn collect<C>(&self) -> Result<C>
    where
        C: FromIterator<T>,
    {
        self.iter()?.collect()
    }

    /// Split into `(matching, rest)`, each in encounter order.
    pub fn partition<F>(&self, mut pred: F) -> Result<(Vec<T>, Vec<T>)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut matching = Vec::new();
        let mut rest = Vec::new();
        self.for_each(|item| {
            if pred(&item) {
                matching.push(item);
            } else {
                rest.push(item);
            }
        })?;
        Ok((matching, rest))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use crate::{ImmutableList, SeqError, Sequence};

    #[test]
    fn test_to_list_and_set() {
        let seq = Sequence::of([3, 1, 3, 2]);
        assert_eq!(seq.to_list().unwrap(), vec![3, 1, 3, 2]);
        assert_eq!(seq.to_set().unwrap().len(), 3);
    }

    #[test]
    fn test_unmodifiable_collapses_small_sizes() {
        assert!(matches!(
            Sequence::<i32>::empty().to_unmodifiable_list().unwrap(),
            ImmutableList::Empty
        ));
        assert!(matches!(
            Sequence::of([4]).to_unmodifiable_list().unwrap(),
            ImmutableList::Single(4)
        ));
        let many = Sequence::of([1, 2, 3]).to_unmodifiable_list().unwrap();
        assert_eq!(&*many, &[1, 2, 3]);

        let set = Sequence::of([1, 1]).to_unmodifiable_set().unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&1));
    }

    #[test]
    fn test_to_collection_appends() {
        let mut queue = VecDeque::from([0]);
        Sequence::of([1, 2]).to_collection(&mut queue).unwrap();
        assert_eq!(queue, VecDeque::from([0, 1, 2]));
    }

    #[test]
    fn test_collect_into_any_container() {
        let map: BTreeMap<usize, char> = Sequence::of(['a', 'b']).indexed().collect().unwrap();
        assert_eq!(map.get(&1), Some(&'b'));
    }

    #[test]
    fn test_collect_surfaces_failure() {
        let failing = Sequence::of([1, 2, 3]).try_map(|x| {
            if x == 2 {
                Err(SeqError::callback("bad"))
            } else {
                Ok(x)
            }
        });
        assert!(matches!(
            failing.collect::<Vec<_>>(),
            Err(SeqError::Callback(_))
        ));
    }

    #[test]
    fn test_partition() {
        let (even, odd) = Sequence::from_iterable(1..=5)
            .partition(|x| x % 2 == 0)
            .unwrap();
        assert_eq!(even, vec![2, 4]);
        assert_eq!(odd, vec![1, 3, 5]);
    }
}
