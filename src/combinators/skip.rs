use std::sync::Arc;

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Discards the first `count` elements, then passes everything through.
pub struct Skip<P> {
    upstream: P,
    to_skip: usize,
}

impl<P> Skip<P> {
    /// Create a skipping node over `upstream`.
    pub const fn new(upstream: P, count: usize) -> Self {
        Self {
            upstream,
            to_skip: count,
        }
    }
}

impl<P> Compute for Skip<P>
where
    P: PullIter,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        while self.to_skip > 0 {
            if !self.upstream.has_next()? {
                self.to_skip = 0;
                return Ok(Step::Done);
            }
            self.upstream.next()?;
            self.to_skip -= 1;
        }
        if self.upstream.has_next()? {
            self.upstream.next().map(Step::Yield)
        } else {
            Ok(Step::Done)
        }
    }
}

/// Discards the leading elements that satisfy a predicate.
///
/// The predicate is consulted only until it first rejects; the rejected
/// element is yielded and everything after it passes through unchecked.
pub struct SkipWhile<P, F> {
    upstream: P,
    pred: Arc<F>,
    skipping: bool,
}

impl<P, F> SkipWhile<P, F> {
    /// Create a skip-while node over `upstream`.
    pub const fn new(upstream: P, pred: Arc<F>) -> Self {
        Self {
            upstream,
            pred,
            skipping: true,
        }
    }
}

impl<P, F> Compute for SkipWhile<P, F>
where
    P: PullIter,
    F: Fn(&P::Item) -> Result<bool>,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        while self.upstream.has_next()? {
            let item = self.upstream.next()?;
            if !self.skipping {
                return Ok(Step::Yield(item));
            }
            if !(self.pred)(&item)? {
                self.skipping = false;
                return Ok(Step::Yield(item));
            }
        }
        Ok(Step::Done)
    }
}
