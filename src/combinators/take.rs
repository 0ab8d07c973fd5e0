use std::sync::Arc;

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Yields at most `remaining` elements.
///
/// Once the budget is spent the upstream is never touched again, not even
/// to ask whether it has more.
pub struct Take<P> {
    upstream: P,
    remaining: usize,
}

impl<P> Take<P> {
    /// Create a limiting node over `upstream`.
    pub const fn new(upstream: P, count: usize) -> Self {
        Self {
            upstream,
            remaining: count,
        }
    }
}

impl<P> Compute for Take<P>
where
    P: PullIter,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        if self.remaining == 0 || !self.upstream.has_next()? {
            return Ok(Step::Done);
        }
        self.remaining -= 1;
        self.upstream.next().map(Step::Yield)
    }
}

/// Yields elements while the predicate holds, then stops for good.
///
/// The first rejected element is consumed from upstream and discarded.
pub struct TakeWhile<P, F> {
    upstream: P,
    pred: Arc<F>,
    finished: bool,
}

impl<P, F> TakeWhile<P, F> {
    /// Create a take-while node over `upstream`.
    pub const fn new(upstream: P, pred: Arc<F>) -> Self {
        Self {
            upstream,
            pred,
            finished: false,
        }
    }
}

impl<P, F> Compute for TakeWhile<P, F>
where
    P: PullIter,
    F: Fn(&P::Item) -> Result<bool>,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        if self.finished || !self.upstream.has_next()? {
            return Ok(Step::Done);
        }
        let item = self.upstream.next()?;
        if (self.pred)(&item)? {
            Ok(Step::Yield(item))
        } else {
            self.finished = true;
            Ok(Step::Done)
        }
    }
}
