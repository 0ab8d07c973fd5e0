//! Read-only collections returned by the `to_unmodifiable_*` reducers.
//!
//! Both types reserve dedicated variants for zero and one element, so the
//! common tiny results carry no shared allocation.

use std::{
    collections::{hash_set, HashSet},
    hash::Hash,
    ops::Deref,
    slice,
    sync::Arc,
};

use either::Either;

/// An immutable, cheaply cloneable list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImmutableList<T> {
    /// No elements.
    Empty,
    /// Exactly one element, stored inline.
    Single(T),
    /// Two or more elements in a shared buffer.
    Many(Arc<[T]>),
}

impl<T> ImmutableList<T> {
    /// Freeze `items`, picking the smallest representation.
    pub fn from_vec(mut items: Vec<T>) -> Self {
        if items.len() > 1 {
            return Self::Many(Arc::from(items));
        }
        match items.pop() {
            Some(only) => Self::Single(only),
            None => Self::Empty,
        }
    }

    /// View the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::Empty => &[],
            Self::Single(item) => slice::from_ref(item),
            Self::Many(items) => &items[..],
        }
    }
}

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Deref for ImmutableList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// An immutable, cheaply cloneable set.
#[derive(Debug, Clone)]
pub enum ImmutableSet<T> {
    /// No elements.
    Empty,
    /// Exactly one element, stored inline.
    Single(T),
    /// Two or more elements in a shared set.
    Many(Arc<HashSet<T>>),
}

impl<T> ImmutableSet<T>
where
    T: Eq + Hash,
{
    /// Freeze `set`, picking the smallest representation.
    pub fn from_set(set: HashSet<T>) -> Self {
        if set.len() > 1 {
            return Self::Many(Arc::new(set));
        }
        match set.into_iter().next() {
            Some(only) => Self::Single(only),
            None => Self::Empty,
        }
    }

    /// Whether `value` is a member.
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(item) => item == value,
            Self::Many(items) => items.contains(value),
        }
    }
}

impl<T> ImmutableSet<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::Single(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate in unspecified order.
    pub fn iter(&self) -> Either<slice::Iter<'_, T>, hash_set::Iter<'_, T>> {
        match self {
            Self::Empty => Either::Left(<&[T]>::default().iter()),
            Self::Single(item) => Either::Left(slice::from_ref(item).iter()),
            Self::Many(items) => Either::Right(items.iter()),
        }
    }
}

impl<T> Default for ImmutableSet<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> PartialEq for ImmutableSet<T>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Eq + Hash> Eq for ImmutableSet<T> {}

impl<T> FromIterator<T> for ImmutableSet<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ImmutableSet<T> {
    type Item = &'a T;
    type IntoIter = Either<slice::Iter<'a, T>, hash_set::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_representations() {
        assert_eq!(ImmutableList::<u8>::from_vec(vec![]), ImmutableList::Empty);
        assert_eq!(ImmutableList::from_vec(vec![1]), ImmutableList::Single(1));
        let many = ImmutableList::from_vec(vec![1, 2]);
        assert!(matches!(many, ImmutableList::Many(_)));
        assert_eq!(many.len(), 2);
        assert_eq!(many.iter().sum::<i32>(), 3);
    }

    #[test]
    fn test_list_clone_shares_buffer() {
        let list: ImmutableList<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let copy = list.clone();
        match (&list, &copy) {
            (ImmutableList::Many(a), ImmutableList::Many(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected shared buffers"),
        }
    }

    #[test]
    fn test_set_representations() {
        let empty: ImmutableSet<i32> = std::iter::empty().collect();
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);

        let single: ImmutableSet<i32> = [5, 5].into_iter().collect();
        assert!(matches!(single, ImmutableSet::Single(5)));

        let many: ImmutableSet<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(many.len(), 3);
        assert!(many.contains(&2));
        assert!(!many.contains(&4));
        let mut items: Vec<_> = many.iter().copied().collect();
        items.sort_unstable();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a: ImmutableSet<i32> = [1, 2].into_iter().collect();
        let b: ImmutableSet<i32> = [2, 1].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, ImmutableSet::Single(1));
    }
}
