/// Outcome of computing the next element of a pull iterator.
///
/// A [`Compute`](crate::Compute) implementation returns `Step::Yield` to stage
/// a value or `Step::Done` to declare exhaustion. Failures travel separately
/// as the `Err` side of the surrounding `Result`.
///
/// # Examples
///
/// ```rust
/// use lazyseq::Step;
///
/// let staged: Step<i32> = Step::Yield(21);
/// assert_eq!(staged.map(|x| x * 2), Step::Yield(42));
///
/// let done: Step<i32> = Step::Done;
/// assert_eq!(done.map(|x| x * 2), Step::Done);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<T> {
    /// A value is available.
    Yield(T),
    /// The source is exhausted.
    Done,
}

impl<T> Step<T> {
    /// Returns `true` if the step is `Yield`.
    ///
    /// ```rust
    /// use lazyseq::Step;
    ///
    /// assert!(Step::Yield(1).is_yield());
    /// assert!(!Step::<i32>::Done.is_yield());
    /// ```
    #[inline]
    pub const fn is_yield(&self) -> bool {
        matches!(self, Step::Yield(_))
    }

    /// Returns `true` if the step is `Done`.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }

    /// Converts into an `Option`, discarding the distinction between the variants' names.
    ///
    /// ```rust
    /// use lazyseq::Step;
    ///
    /// assert_eq!(Step::Yield(7).into_option(), Some(7));
    /// assert_eq!(Step::<i32>::Done.into_option(), None);
    /// ```
    #[inline]
    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Yield(value) => Some(value),
            Step::Done => None,
        }
    }

    /// Maps a `Step<T>` to `Step<U>` by applying a function to the yielded value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Step<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Step::Yield(value) => Step::Yield(f(value)),
            Step::Done => Step::Done,
        }
    }

    /// Converts from `&Step<T>` to `Step<&T>`.
    #[inline]
    pub const fn as_ref(&self) -> Step<&T> {
        match self {
            Step::Yield(value) => Step::Yield(value),
            Step::Done => Step::Done,
        }
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Done`.
    ///
    /// ```rust
    /// use lazyseq::Step;
    ///
    /// assert_eq!(Step::Yield(3).unwrap_yield(), 3);
    /// ```
    #[inline]
    #[track_caller]
    pub fn unwrap_yield(self) -> T {
        match self {
            Step::Yield(value) => value,
            Step::Done => panic!("called `Step::unwrap_yield()` on a `Done` value"),
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Step::Yield(value),
            None => Step::Done,
        }
    }
}
