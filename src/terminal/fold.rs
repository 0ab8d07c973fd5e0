use std::{cmp::Ordering, fmt::Display, fmt::Write as _};

use crate::{
    error::{Result, SeqError},
    pull::PullIter,
    sequence::Sequence,
};

/// Accumulation, extremes and side-effecting traversal.
impl<T> Sequence<T>
where
    T: 'static,
{
    /// Left fold starting from `seed`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let joined = Sequence::of(["a", "b", "c"]).fold(String::new(), |mut acc, s| {
    ///     acc.push_str(s);
    ///     acc
    /// })?;
    /// assert_eq!(joined, "abc");
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn fold<A, F>(&self, seed: A, mut op: F) -> Result<A>
    where
        F: FnMut(A, T) -> A,
    {
        let mut pull = self.pull()?;
        let mut acc = seed;
        while pull.has_next()? {
            acc = op(acc, pull.next()?);
        }
        Ok(acc)
    }

    /// Left fold whose step may fail. The first error stops the traversal.
    pub fn try_fold<A, F>(&self, seed: A, mut op: F) -> Result<A>
    where
        F: FnMut(A, T) -> Result<A>,
    {
        let mut pull = self.pull()?;
        let mut acc = seed;
        while pull.has_next()? {
            acc = op(acc, pull.next()?)?;
        }
        Ok(acc)
    }

    /// Fold using the first element as the seed.
    ///
    /// Fails with [`SeqError::NoSuchElement`] when empty.
    pub fn reduce<F>(&self, op: F) -> Result<T>
    where
        F: FnMut(T, T) -> T,
    {
        self.reduce_opt(op)?
            .ok_or_else(|| SeqError::no_such_element("cannot reduce an empty sequence"))
    }

    /// Fold using the first element as the seed, or `None` when empty.
    pub fn reduce_opt<F>(&self, mut op: F) -> Result<Option<T>>
    where
        F: FnMut(T, T) -> T,
    {
        let mut pull = self.pull()?;
        if !pull.has_next()? {
            return Ok(None);
        }
        let mut acc = pull.next()?;
        while pull.has_next()? {
            acc = op(acc, pull.next()?);
        }
        Ok(Some(acc))
    }

    /// Smallest element; the first one wins ties.
    pub fn min(&self) -> Result<T>
    where
        T: Ord,
    {
        self.min_by(T::cmp)
    }

    /// Largest element; the first one wins ties.
    pub fn max(&self) -> Result<T>
    where
        T: Ord,
    {
        self.max_by(T::cmp)
    }

    /// Smallest element, or `None` when empty.
    pub fn min_opt(&self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.extreme_by(T::cmp, Ordering::Less)
    }

    /// Largest element, or `None` when empty.
    pub fn max_opt(&self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.extreme_by(T::cmp, Ordering::Greater)
    }

    /// Smallest element under `cmp`.
    pub fn min_by<F>(&self, cmp: F) -> Result<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.extreme_by(cmp, Ordering::Less)?
            .ok_or_else(|| SeqError::no_such_element("cannot take the minimum of an empty sequence"))
    }

    /// Largest element under `cmp`.
    pub fn max_by<F>(&self, cmp: F) -> Result<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.extreme_by(cmp, Ordering::Greater)?
            .ok_or_else(|| SeqError::no_such_element("cannot take the maximum of an empty sequence"))
    }

    /// Element with the smallest key.
    pub fn min_by_key<K, F>(&self, mut key: F) -> Result<T>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.min_by(|a, b| key(a).cmp(&key(b)))
    }

    /// Element with the largest key.
    pub fn max_by_key<K, F>(&self, mut key: F) -> Result<T>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.max_by(|a, b| key(a).cmp(&key(b)))
    }

    // Replaces the candidate only on a strict improvement, so ties keep the earliest.
    fn extreme_by<F>(&self, mut cmp: F, wanted: Ordering) -> Result<Option<T>>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut pull = self.pull()?;
        if !pull.has_next()? {
            return Ok(None);
        }
        let mut best = pull.next()?;
        while pull.has_next()? {
            let item = pull.next()?;
            if cmp(&item, &best) == wanted {
                best = item;
            }
        }
        Ok(Some(best))
    }

    /// Run `action` on every element.
    pub fn for_each<F>(&self, mut action: F) -> Result<()>
    where
        F: FnMut(T),
    {
        let mut pull = self.pull()?;
        while pull.has_next()? {
            action(pull.next()?);
        }
        Ok(())
    }

    /// Run `action` on every element together with its zero-based position.
    pub fn for_each_indexed<F>(&self, mut action: F) -> Result<()>
    where
        F: FnMut(usize, T),
    {
        let mut index = 0;
        self.for_each(|item| {
            action(index, item);
            index += 1;
        })
    }

    /// Run a fallible `action` on every element, stopping at the first error.
    pub fn try_for_each<F>(&self, mut action: F) -> Result<()>
    where
        F: FnMut(T) -> Result<()>,
    {
        self.try_fold((), |(), item| action(item))
    }

    /// Render every element and join them with `separator`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// assert_eq!(Sequence::of([1, 2, 3]).join_to_string(", ")?, "1, 2, 3");
    /// assert_eq!(Sequence::<i32>::empty().join_to_string(", ")?, "");
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn join_to_string(&self, separator: &str) -> Result<String>
    where
        T: Display,
    {
        let mut out = String::new();
        let mut first = true;
        self.try_for_each(|item| {
            if !first {
                out.push_str(separator);
            }
            first = false;
            write!(out, "{item}").map_err(SeqError::callback)
        })?;
        Ok(out)
    }
}
