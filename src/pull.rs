//! The pull-iterator protocol and the state machine every combinator runs on.
//!
//! A [`PullIter`] exposes the two-method `has_next`/`next` protocol. Most
//! nodes do not implement it by hand: they implement [`Compute`], a single
//! "stage the next value or declare exhaustion" step, and are wrapped in a
//! [`Pull`] which turns that step into the full protocol.
//!
//! # States
//!
//! | state      | meaning                                                    |
//! |------------|------------------------------------------------------------|
//! | `NotReady` | nothing staged; the next `has_next` computes               |
//! | `Ready`    | a value is staged and is returned by the next `next`       |
//! | `Done`     | exhausted; stays exhausted                                 |
//! | `Failed`   | a computation failed; every further call is `IllegalState` |
//!
//! `Failed` is terminal on purpose: after a predicate, mapper or source has
//! failed, the upstream chain may be half-advanced, so the node refuses to
//! continue rather than guess.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::{Compute, Pull, PullIter, Result, Step};
//!
//! struct Countdown(u32);
//!
//! impl Compute for Countdown {
//!     type Item = u32;
//!     fn compute_next(&mut self) -> Result<Step<u32>> {
//!         if self.0 == 0 {
//!             return Ok(Step::Done);
//!         }
//!         self.0 -= 1;
//!         Ok(Step::Yield(self.0))
//!     }
//! }
//!
//! let mut pull = Pull::new(Countdown(2));
//! assert!(pull.has_next()?);
//! assert!(pull.has_next()?); // idempotent, nothing recomputed
//! assert_eq!(pull.next()?, 1);
//! assert_eq!(pull.next()?, 0);
//! assert!(!pull.has_next()?);
//! assert!(pull.next().unwrap_err().is_no_such_element());
//! # Ok::<(), lazyseq::SeqError>(())
//! ```

use std::marker::PhantomData;

use crate::{
    error::{Result, SeqError},
    step::Step,
};

/// Caller-driven iterator: ask whether a value is available, then take it.
pub trait PullIter {
    /// Element type.
    type Item;

    /// Whether a value is available, computing it if needed.
    ///
    /// Repeated calls without an intervening [`next`](PullIter::next) do not
    /// advance the source.
    fn has_next(&mut self) -> Result<bool>;

    /// Take the available value.
    ///
    /// Fails with [`SeqError::NoSuchElement`] when nothing is available.
    fn next(&mut self) -> Result<Self::Item>;
}

/// Boxed pull iterator, the currency between sequence nodes.
pub type BoxPull<T> = Box<dyn PullIter<Item = T>>;

impl<P> PullIter for Box<P>
where
    P: PullIter + ?Sized,
{
    type Item = P::Item;

    #[inline]
    fn has_next(&mut self) -> Result<bool> {
        (**self).has_next()
    }

    #[inline]
    fn next(&mut self) -> Result<Self::Item> {
        (**self).next()
    }
}

/// A single "compute the next value" step.
///
/// Each call must either stage a value (`Ok(Step::Yield)`), declare exhaustion
/// (`Ok(Step::Done)`), or fail. [`Pull`] guarantees the step is never invoked
/// again after `Done` or a failure.
pub trait Compute {
    /// Element type.
    type Item;

    /// Produce the next value.
    fn compute_next(&mut self) -> Result<Step<Self::Item>>;
}

enum PullState<T> {
    NotReady,
    Ready(T),
    Done,
    Failed,
}

impl<T> PullState<T> {
    fn take(&mut self) -> Self {
        std::mem::replace(self, PullState::NotReady)
    }
}

/// Adapts a [`Compute`] step into the [`PullIter`] protocol.
pub struct Pull<C>
where
    C: Compute,
{
    inner: C,
    state: PullState<C::Item>,
}

impl<C> Pull<C>
where
    C: Compute,
{
    /// Wrap a compute step. Nothing is computed until the first `has_next`.
    pub const fn new(inner: C) -> Self {
        Self {
            inner,
            state: PullState::NotReady,
        }
    }

    /// Wrap and box in one go.
    pub fn boxed(inner: C) -> BoxPull<C::Item>
    where
        C: 'static,
    {
        Box::new(Self::new(inner))
    }

    /// Check if the iterator has been exhausted.
    pub const fn is_done(&self) -> bool {
        matches!(self.state, PullState::Done)
    }

    /// Check if an earlier computation failed.
    pub const fn is_poisoned(&self) -> bool {
        matches!(self.state, PullState::Failed)
    }
}

impl<C> PullIter for Pull<C>
where
    C: Compute,
{
    type Item = C::Item;

    fn has_next(&mut self) -> Result<bool> {
        match self.state {
            PullState::Ready(_) => return Ok(true),
            PullState::Done => return Ok(false),
            PullState::Failed => {
                return Err(SeqError::illegal_state(
                    "iterator failed earlier and cannot be advanced",
                ));
            }
            PullState::NotReady => {}
        }

        // Latched until the step returns, so a panic inside leaves the node poisoned too.
        self.state = PullState::Failed;
        match self.inner.compute_next() {
            Ok(Step::Yield(value)) => {
                self.state = PullState::Ready(value);
                Ok(true)
            }
            Ok(Step::Done) => {
                self.state = PullState::Done;
                Ok(false)
            }
            Err(err) => {
                tracing::trace!(error = %err, "pull iterator poisoned");
                Err(err)
            }
        }
    }

    fn next(&mut self) -> Result<Self::Item> {
        if !self.has_next()? {
            return Err(SeqError::no_such_element("iterator is exhausted"));
        }
        match self.state.take() {
            PullState::Ready(value) => Ok(value),
            other => {
                self.state = other;
                Err(SeqError::no_such_element("no value staged"))
            }
        }
    }
}

/// A pull iterator that never yields.
pub struct EmptyPull<T>(PhantomData<fn() -> T>);

impl<T> EmptyPull<T> {
    /// Create an empty iterator.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EmptyPull<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PullIter for EmptyPull<T> {
    type Item = T;

    fn has_next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn next(&mut self) -> Result<T> {
        Err(SeqError::no_such_element("empty sequence"))
    }
}

/// Std [`Iterator`] view over a pull iterator.
///
/// Yields `Ok` for each element, then at most one `Err`, after which it is
/// fused and returns `None`.
pub struct SeqIter<T> {
    pull: BoxPull<T>,
    finished: bool,
}

impl<T> SeqIter<T> {
    pub(crate) fn new(pull: BoxPull<T>) -> Self {
        Self {
            pull,
            finished: false,
        }
    }
}

impl<T> Iterator for SeqIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.pull.has_next() {
            Ok(true) => {
                let next = self.pull.next();
                self.finished = next.is_err();
                Some(next)
            }
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<T> std::iter::FusedIterator for SeqIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    struct Counted {
        calls: Rc<Cell<usize>>,
        remaining: usize,
    }

    impl Compute for Counted {
        type Item = usize;
        fn compute_next(&mut self) -> Result<Step<usize>> {
            self.calls.set(self.calls.get() + 1);
            if self.remaining == 0 {
                return Ok(Step::Done);
            }
            self.remaining -= 1;
            Ok(Step::Yield(self.remaining))
        }
    }

    struct FailsAt(usize);

    impl Compute for FailsAt {
        type Item = usize;
        fn compute_next(&mut self) -> Result<Step<usize>> {
            if self.0 == 0 {
                return Err(SeqError::callback("boom"));
            }
            self.0 -= 1;
            Ok(Step::Yield(self.0))
        }
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let calls = Rc::new(Cell::new(0));
        let mut pull = Pull::new(Counted {
            calls: Rc::clone(&calls),
            remaining: 1,
        });

        assert!(pull.has_next().unwrap());
        assert!(pull.has_next().unwrap());
        assert!(pull.has_next().unwrap());
        assert_eq!(calls.get(), 1);
        assert_eq!(pull.next().unwrap(), 0);
        assert!(!pull.has_next().unwrap());
        assert!(!pull.has_next().unwrap());
        assert_eq!(calls.get(), 2);
        assert!(pull.is_done());
    }

    #[test]
    fn test_next_without_value_is_no_such_element() {
        let calls = Rc::new(Cell::new(0));
        let mut empty = Pull::new(Counted { calls, remaining: 0 });
        assert!(empty.next().unwrap_err().is_no_such_element());
    }

    #[test]
    fn test_failure_poisons_the_iterator() {
        let mut pull = Pull::new(FailsAt(1));
        assert_eq!(pull.next().unwrap(), 0);

        let first = pull.has_next().unwrap_err();
        assert!(matches!(first, SeqError::Callback(_)));
        assert!(pull.is_poisoned());

        // No retry: the original error is not replayed either.
        assert!(pull.has_next().unwrap_err().is_illegal_state());
        assert!(pull.next().unwrap_err().is_illegal_state());
    }

    #[test]
    fn test_boxed_pull_forwards() {
        let calls = Rc::new(Cell::new(0));
        let mut boxed: Box<dyn PullIter<Item = usize>> = Box::new(Pull::new(Counted {
            calls,
            remaining: 2,
        }));
        assert_eq!(boxed.next().unwrap(), 1);
        assert_eq!(boxed.next().unwrap(), 0);
        assert!(!boxed.has_next().unwrap());
    }

    #[test]
    fn test_seq_iter_fuses_after_error() {
        let iter = SeqIter::new(Box::new(Pull::new(FailsAt(2))));
        let collected: Vec<_> = iter.map(|r| r.map_err(|e| e.to_string())).collect();
        assert_eq!(
            collected,
            vec![
                Ok(1),
                Ok(0),
                Err("callback failed: boom".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_pull() {
        let mut empty = EmptyPull::<i32>::new();
        assert!(!empty.has_next().unwrap());
        assert!(empty.next().unwrap_err().is_no_such_element());
    }
}
