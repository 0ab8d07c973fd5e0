use std::{borrow::Borrow, fmt, hash::Hash, slice, vec};

use rustc_hash::FxHashMap;

use crate::{error::Result, pull::PullIter, sequence::Sequence};

/// Elements bucketed by key.
///
/// Keys iterate in the order they were first seen; within a bucket, elements
/// keep their encounter order.
#[derive(Clone)]
pub struct Groups<K, V> {
    entries: Vec<(K, Vec<V>)>,
    index: FxHashMap<K, usize>,
}

impl<K, V> Groups<K, V>
where
    K: Eq + Hash + Clone,
{
    /// An empty grouping.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Append `value` to the bucket for `key`, creating the bucket if needed.
    pub fn push(&mut self, key: K, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1.push(value);
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, vec![value]));
    }

    /// The bucket for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].1.as_slice())
    }

    /// Whether a bucket exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K, V> Groups<K, V> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    /// `(key, bucket)` pairs in first-seen order.
    pub fn iter(&self) -> slice::Iter<'_, (K, Vec<V>)> {
        self.entries.iter()
    }

    /// Drop the lookup index and keep the ordered buckets.
    pub fn into_vec(self) -> Vec<(K, Vec<V>)> {
        self.entries
    }
}

impl<K, V> Default for Groups<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Groups<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

// Order-sensitive: two groupings are equal when keys were first seen in the same order.
impl<K, V> PartialEq for Groups<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for Groups<K, V> {}

impl<K, V> IntoIterator for Groups<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Groups<K, V> {
    type Item = &'a (K, Vec<V>);
    type IntoIter = slice::Iter<'a, (K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Groups<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (key, value) in iter {
            groups.push(key, value);
        }
        groups
    }
}

impl<T> Sequence<T>
where
    T: 'static,
{
    /// Bucket the elements by `key`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let groups = Sequence::of(["one", "two", "three", "four", "five"]).group_by(|w| w.len())?;
    /// assert_eq!(groups.get(&3), Some(&["one", "two"][..]));
    /// assert_eq!(groups.get(&5), Some(&["three"][..]));
    /// assert_eq!(groups.get(&4), Some(&["four", "five"][..]));
    /// assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![3, 5, 4]);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn group_by<K, F>(&self, key: F) -> Result<Groups<K, T>>
    where
        K: Eq + Hash + Clone,
        F: FnMut(&T) -> K,
    {
        self.group_by_with(key, |item| item)
    }

    /// Bucket `value(element)` by `key(element)`.
    pub fn group_by_with<K, V, FK, FV>(&self, mut key: FK, mut value: FV) -> Result<Groups<K, V>>
    where
        K: Eq + Hash + Clone,
        FK: FnMut(&T) -> K,
        FV: FnMut(T) -> V,
    {
        let mut pull = self.pull()?;
        let mut groups = Groups::new();
        while pull.has_next()? {
            let item = pull.next()?;
            let k = key(&item);
            groups.push(k, value(item));
        }
        tracing::trace!(groups = groups.len(), "grouped sequence");
        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_keeps_first_seen_order() {
        let groups = Sequence::of([1, 2, 3, 4, 5, 6])
            .group_by(|x| x % 3)
            .unwrap();
        assert_eq!(
            groups.into_vec(),
            vec![(1, vec![1, 4]), (2, vec![2, 5]), (0, vec![3, 6])]
        );
    }

    #[test]
    fn test_group_by_with_projects_values() {
        let groups = Sequence::of(["apple", "avocado", "banana"])
            .group_by_with(|w| w.as_bytes()[0], |w| w.len())
            .unwrap();
        assert_eq!(groups.get(&b'a'), Some(&[5, 7][..]));
        assert_eq!(groups.get(&b'b'), Some(&[6][..]));
        assert!(!groups.contains_key(&b'c'));
    }

    #[test]
    fn test_group_by_on_empty() {
        let groups = Sequence::<i32>::empty().group_by(|x| *x).unwrap();
        assert!(groups.is_empty());
        assert_eq!(groups, Groups::new());
    }

    #[test]
    fn test_groups_borrowed_lookup() {
        let groups: Groups<String, i32> =
            [("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)]
                .into_iter()
                .collect();
        assert_eq!(groups.get("a"), Some(&[1, 3][..]));
        assert_eq!(groups.len(), 2);
        assert_eq!(format!("{groups:?}"), r#"{"a": [1, 3], "b": [2]}"#);
    }
}
