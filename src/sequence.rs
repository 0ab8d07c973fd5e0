//! The [`Sequence`] façade: sources, chaining and traversal.
//!
//! A `Sequence<T>` is a description of how to open a fresh pull iterator of
//! `T`. It owns no iteration state: chaining an operation returns a new
//! description wrapping the old one, and nothing touches the source until a
//! terminal operation (or [`Sequence::pull`]) opens a traversal. Each
//! traversal builds its own chain of nodes, so per-traversal state such as
//! `take` budgets, `indexed` counters and `distinct` seen-sets always starts
//! fresh.
//!
//! Sequences come in two kinds:
//! - *restartable*: built over a buffer, a cloneable iterable, a factory or a
//!   seeded generator; any number of traversals is allowed.
//! - *once-only*: built over a raw iterator or generator closure; returned
//!   already wrapped by [`once`](Sequence::once), so a second traversal fails
//!   with [`SeqError::IllegalState`](crate::SeqError::IllegalState).
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::Sequence;
//!
//! let evens = Sequence::of([1, 2, 3, 4, 5])
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * 10);
//!
//! assert_eq!(evens.to_list()?, vec![20, 40]);
//! assert_eq!(evens.to_list()?, vec![20, 40]); // restartable
//!
//! let once = Sequence::from_iterator(vec![1, 2, 3]);
//! assert_eq!(once.count()?, 3);
//! assert!(once.count().unwrap_err().is_illegal_state());
//! # Ok::<(), lazyseq::SeqError>(())
//! ```

use std::{cmp::Ordering, hash::Hash, ops::Range, sync::Arc};

use parking_lot::Mutex;

use crate::{
    check,
    combinators::{
        Concat, Distinct, Filter, FilterMap, FlatMap, Indexed, Map, OnEach, Skip, SkipWhile,
        Sorted, Take, TakeWhile, Zip,
    },
    error::Result,
    once::OnceGuard,
    pull::{BoxPull, Compute, EmptyPull, Pull, PullIter, SeqIter},
    source::{IterSource, SliceSource, TryIterSource},
};

type Factory<T> = Arc<dyn Fn() -> Result<BoxPull<T>> + Send + Sync>;

enum Origin<T> {
    Empty,
    Factory(Factory<T>),
}

/// A lazy, composable description of a source of `T`.
pub struct Sequence<T> {
    origin: Origin<T>,
    once: bool,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        let origin = match &self.origin {
            Origin::Empty => Origin::Empty,
            Origin::Factory(factory) => Origin::Factory(Arc::clone(factory)),
        };
        Self {
            origin,
            once: self.once,
        }
    }
}

impl<T> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("empty", &matches!(self.origin, Origin::Empty))
            .field("once", &self.once)
            .finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self {
            origin: Origin::Empty,
            once: false,
        }
    }
}

// ---- Sources ----

impl<T> Sequence<T>
where
    T: 'static,
{
    /// The shared zero-element sequence. Needs no allocation and may be
    /// traversed any number of times.
    pub const EMPTY: Self = Self {
        origin: Origin::Empty,
        once: false,
    };

    /// A sequence with no elements.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<BoxPull<T>> + Send + Sync + 'static,
    {
        Self {
            origin: Origin::Factory(Arc::new(factory)),
            once: false,
        }
    }

    /// A restartable sequence over a fixed list of values.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let seq = Sequence::of(["a", "b"]);
    /// assert_eq!(seq.to_list()?, vec!["a", "b"]);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Clone + Send + Sync,
    {
        let items: Arc<[T]> = values.into_iter().collect();
        if items.is_empty() {
            return Self::empty();
        }
        Self::from_factory(move || Ok(Pull::boxed(SliceSource::new(Arc::clone(&items)))))
    }

    /// A restartable sequence over anything that can be iterated repeatedly
    /// by cloning it, such as a range or a vector.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// assert_eq!(Sequence::from_iterable(1_i32..=4).sum(|x| *x)?, 10_i64);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        I::IntoIter: 'static,
    {
        Self::from_factory(move || Ok(Pull::boxed(IterSource::new(iterable.clone().into_iter()))))
    }

    /// A restartable sequence whose traversals each start from `factory()`.
    pub fn from_source<F, P>(factory: F) -> Self
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: PullIter<Item = T> + 'static,
    {
        Self::from_factory(move || Ok(Box::new(factory()) as BoxPull<T>))
    }

    /// A restartable sequence starting at `seed` and continuing with
    /// `next(previous)` until it returns `None`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let powers = Sequence::generate(1_u32, |x| x.checked_mul(2));
    /// assert_eq!(powers.take(4).to_list()?, vec![1, 2, 4, 8]);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn generate<F>(seed: T, next: F) -> Self
    where
        T: Clone + Send + Sync,
        F: Fn(&T) -> Option<T> + Send + Sync + 'static,
    {
        let next = Arc::new(next);
        Self::from_factory(move || {
            let next = Arc::clone(&next);
            let iter = std::iter::successors(Some(seed.clone()), move |prev| next(prev));
            Ok(Pull::boxed(IterSource::new(iter)))
        })
    }

    fn one_shot<C>(compute: C) -> Self
    where
        C: Compute<Item = T> + Send + 'static,
    {
        let cell = Mutex::new(Some(compute));
        // A second open would see an empty cell; `once()` turns that into an error.
        Self::from_factory(move || {
            Ok(match cell.lock().take() {
                Some(compute) => Pull::boxed(compute),
                None => Box::new(EmptyPull::<T>::new()),
            })
        })
        .once()
    }

    /// A once-only sequence over an iterator.
    pub fn from_iterator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self::one_shot(IterSource::new(iter.into_iter()))
    }

    /// A once-only sequence over a generator closure, ending at the first `None`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let mut n = 0;
    /// let seq = Sequence::from_fn(move || {
    ///     n += 1;
    ///     (n <= 3).then_some(n)
    /// });
    /// assert_eq!(seq.to_list()?, vec![1, 2, 3]);
    /// assert!(seq.to_list().is_err());
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn from_fn<F>(generator: F) -> Self
    where
        F: FnMut() -> Option<T> + Send + 'static,
    {
        Self::from_iterator(std::iter::from_fn(generator))
    }

    /// A once-only sequence over a fallible generator closure.
    ///
    /// An `Err` from the generator fails the traversal at that point and
    /// poisons it.
    pub fn from_try_fn<F>(mut generator: F) -> Self
    where
        F: FnMut() -> Result<Option<T>> + Send + 'static,
    {
        Self::one_shot(TryIterSource::new(std::iter::from_fn(move || {
            generator().transpose()
        })))
    }

    /// Guard this sequence so it can be traversed at most once.
    ///
    /// Idempotent: an already guarded sequence is returned as is.
    #[must_use]
    pub fn once(&self) -> Self {
        if self.once {
            return self.clone();
        }
        let guard = Arc::new(OnceGuard::new(self.clone()));
        Self {
            origin: Origin::Factory(Arc::new(move || guard.take()?.pull())),
            once: true,
        }
    }

    /// Whether this sequence is once-guarded.
    #[must_use]
    pub const fn is_once(&self) -> bool {
        self.once
    }

    /// Whether two handles share the same underlying description.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.origin, &other.origin) {
            (Origin::Empty, Origin::Empty) => true,
            (Origin::Factory(a), Origin::Factory(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Open a fresh traversal.
    pub fn pull(&self) -> Result<BoxPull<T>> {
        match &self.origin {
            Origin::Empty => Ok(Box::new(EmptyPull::<T>::new())),
            Origin::Factory(factory) => factory(),
        }
    }

    /// Open a fresh traversal as a std [`Iterator`] of `Result<T>`.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let mut total = 0;
    /// for item in Sequence::of([1, 2, 3]).iter()? {
    ///     total += item?;
    /// }
    /// assert_eq!(total, 6);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    pub fn iter(&self) -> Result<SeqIter<T>> {
        self.pull().map(SeqIter::new)
    }
}

// ---- Intermediate operations ----

impl<T> Sequence<T>
where
    T: 'static,
{
    fn derive<U, F>(&self, node: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(BoxPull<T>) -> BoxPull<U> + Send + Sync + 'static,
    {
        if matches!(self.origin, Origin::Empty) {
            return Sequence::empty();
        }
        let upstream = self.clone();
        let mut derived = Sequence::from_factory(move || Ok(node(upstream.pull()?)));
        derived.once = self.once;
        derived
    }

    /// Keep the elements matching `pred`.
    #[must_use]
    pub fn filter<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_filter(move |item| Ok(pred(item)))
    }

    /// Keep the elements not matching `pred`.
    #[must_use]
    pub fn filter_not<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_filter(move |item| Ok(!pred(item)))
    }

    /// Fallible [`filter`](Self::filter).
    #[must_use]
    pub fn try_filter<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> Result<bool> + Send + Sync + 'static,
    {
        let pred = Arc::new(pred);
        self.derive(move |up| Pull::boxed(Filter::new(up, Arc::clone(&pred))))
    }

    /// Keep the elements for which `pred(index, element)` holds.
    #[must_use]
    pub fn filter_indexed<F>(&self, pred: F) -> Self
    where
        F: Fn(usize, &T) -> bool + Send + Sync + 'static,
    {
        self.indexed()
            .filter(move |(index, item)| pred(*index, item))
            .map(|(_, item)| item)
    }

    /// Transform each element.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        self.try_map(move |item| Ok(f(item)))
    }

    /// Fallible [`map`](Self::map).
    #[must_use]
    pub fn try_map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Result<U> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.derive(move |up| Pull::boxed(Map::new(up, Arc::clone(&f))))
    }

    /// Transform each element together with its index.
    #[must_use]
    pub fn map_indexed<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(usize, T) -> U + Send + Sync + 'static,
    {
        self.indexed().map(move |(index, item)| f(index, item))
    }

    /// Transform each element, dropping those mapped to `None`.
    #[must_use]
    pub fn filter_map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        self.try_filter_map(move |item| Ok(f(item)))
    }

    /// Fallible [`filter_map`](Self::filter_map).
    #[must_use]
    pub fn try_filter_map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Result<Option<U>> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.derive(move |up| Pull::boxed(FilterMap::new(up, Arc::clone(&f))))
    }

    /// Replace each element by the elements of the sequence `f` returns for it.
    #[must_use]
    pub fn flat_map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Sequence<U> + Send + Sync + 'static,
    {
        self.try_flat_map(move |item| Ok(f(item)))
    }

    /// Fallible [`flat_map`](Self::flat_map).
    #[must_use]
    pub fn try_flat_map<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Result<Sequence<U>> + Send + Sync + 'static,
    {
        self.flat_map_pull(move |item| f(item)?.pull())
    }

    /// Replace each element by the items of the iterable `f` returns for it.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let words = Sequence::of(["ab", "", "c"]).flat_map_iter(|s| s.chars().collect::<Vec<_>>());
    /// assert_eq!(words.to_list()?, vec!['a', 'b', 'c']);
    /// # Ok::<(), lazyseq::SeqError>(())
    /// ```
    #[must_use]
    pub fn flat_map_iter<U, I, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(T) -> I + Send + Sync + 'static,
    {
        self.flat_map_pull(move |item| Ok(Pull::boxed(IterSource::new(f(item).into_iter()))))
    }

    fn flat_map_pull<U, F>(&self, f: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> Result<BoxPull<U>> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.derive(move |up| Pull::boxed(FlatMap::new(up, Arc::clone(&f))))
    }

    /// Keep the first occurrence of each element.
    ///
    /// Remembers every distinct element seen during a traversal.
    #[must_use]
    pub fn distinct(&self) -> Self
    where
        T: Eq + Hash + Clone,
    {
        self.distinct_by(T::clone)
    }

    /// Keep the first element seen for each key.
    #[must_use]
    pub fn distinct_by<K, F>(&self, key: F) -> Self
    where
        K: Eq + Hash + 'static,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(move |item: &T| -> Result<K> { Ok(key(item)) });
        self.derive(move |up| Pull::boxed(Distinct::new(up, Arc::clone(&key))))
    }

    /// Sort by natural order. Stable; buffers the whole upstream.
    #[must_use]
    pub fn sorted(&self) -> Self
    where
        T: Ord,
    {
        self.sorted_by(T::cmp)
    }

    /// Sort by reverse natural order. Stable; buffers the whole upstream.
    #[must_use]
    pub fn sorted_descending(&self) -> Self
    where
        T: Ord,
    {
        self.sorted_by(|a, b| b.cmp(a))
    }

    /// Sort with a comparator. Stable; buffers the whole upstream.
    #[must_use]
    pub fn sorted_by<F>(&self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        let cmp = Arc::new(cmp);
        self.derive(move |up| Pull::boxed(Sorted::new(up, Arc::clone(&cmp))))
    }

    /// Sort by a derived key. Stable; buffers the whole upstream.
    #[must_use]
    pub fn sorted_by_key<K, F>(&self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        self.sorted_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// Yield at most `count` elements.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        self.derive(move |up| Pull::boxed(Take::new(up, count)))
    }

    /// [`take`](Self::take) with a signed count; negative counts are rejected
    /// before anything is traversed.
    pub fn try_take(&self, count: i64) -> Result<Self> {
        let count = check::require_count(count, "take count")?;
        Ok(self.take(count))
    }

    /// Yield elements while `pred` holds.
    #[must_use]
    pub fn take_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_take_while(move |item| Ok(pred(item)))
    }

    /// Fallible [`take_while`](Self::take_while).
    #[must_use]
    pub fn try_take_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> Result<bool> + Send + Sync + 'static,
    {
        let pred = Arc::new(pred);
        self.derive(move |up| Pull::boxed(TakeWhile::new(up, Arc::clone(&pred))))
    }

    /// Skip the first `count` elements.
    #[must_use]
    pub fn drop(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        self.derive(move |up| Pull::boxed(Skip::new(up, count)))
    }

    /// [`drop`](Self::drop) with a signed count; negative counts are rejected
    /// before anything is traversed.
    pub fn try_drop(&self, count: i64) -> Result<Self> {
        let count = check::require_count(count, "drop count")?;
        Ok(self.drop(count))
    }

    /// Skip leading elements while `pred` holds.
    #[must_use]
    pub fn drop_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.try_drop_while(move |item| Ok(pred(item)))
    }

    /// Fallible [`drop_while`](Self::drop_while).
    #[must_use]
    pub fn try_drop_while<F>(&self, pred: F) -> Self
    where
        F: Fn(&T) -> Result<bool> + Send + Sync + 'static,
    {
        let pred = Arc::new(pred);
        self.derive(move |up| Pull::boxed(SkipWhile::new(up, Arc::clone(&pred))))
    }

    /// The elements at positions `range.start..range.end`.
    pub fn slice(&self, range: Range<usize>) -> Result<Self> {
        check::require_range(range.start, range.end, usize::MAX)?;
        Ok(self.drop(range.start).take(range.end - range.start))
    }

    /// Pair each element with its zero-based index in the traversal.
    #[must_use]
    pub fn indexed(&self) -> Sequence<(usize, T)> {
        self.derive(|up| Pull::boxed(Indexed::new(up)))
    }

    /// Run `action` on each element as it is pulled through.
    #[must_use]
    pub fn on_each<F>(&self, action: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.try_on_each(move |item| {
            action(item);
            Ok(())
        })
    }

    /// Fallible [`on_each`](Self::on_each).
    #[must_use]
    pub fn try_on_each<F>(&self, action: F) -> Self
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        let action = Arc::new(action);
        self.derive(move |up| Pull::boxed(OnEach::new(up, Arc::clone(&action))))
    }

    /// This sequence followed by `other`. `other` is opened only after this
    /// one is exhausted.
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        match (&self.origin, &other.origin) {
            (_, Origin::Empty) => self.clone(),
            (Origin::Empty, _) => other.clone(),
            _ => {
                let (first, second) = (self.clone(), other.clone());
                Self::from_factory(move || {
                    Ok(Pull::boxed(Concat::new(first.pull()?, second.clone())))
                })
            }
        }
    }

    /// Pair up elements with `other`, stopping at the shorter of the two.
    #[must_use]
    pub fn zip<U>(&self, other: &Sequence<U>) -> Sequence<(T, U)>
    where
        U: 'static,
    {
        if matches!(self.origin, Origin::Empty) || matches!(other.origin, Origin::Empty) {
            return Sequence::empty();
        }
        let (left, right) = (self.clone(), other.clone());
        Sequence::from_factory(move || Ok(Pull::boxed(Zip::new(left.pull()?, right.pull()?))))
    }
}

impl<T> Sequence<Option<T>>
where
    T: 'static,
{
    /// Unwrap every element, failing the traversal with
    /// [`SeqError::NullArgument`](crate::SeqError::NullArgument) at the first `None`.
    #[must_use]
    pub fn require_some(&self) -> Sequence<T> {
        self.try_map(|item| check::require_non_null(item, "sequence element"))
    }
}
