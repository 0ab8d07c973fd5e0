use std::sync::Arc;

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Transforms each element, one upstream element per yielded element.
pub struct Map<P, F> {
    upstream: P,
    f: Arc<F>,
}

impl<P, F> Map<P, F> {
    /// Create a mapping node over `upstream`.
    pub const fn new(upstream: P, f: Arc<F>) -> Self {
        Self { upstream, f }
    }
}

impl<P, F, U> Compute for Map<P, F>
where
    P: PullIter,
    F: Fn(P::Item) -> Result<U>,
{
    type Item = U;

    fn compute_next(&mut self) -> Result<Step<U>> {
        if !self.upstream.has_next()? {
            return Ok(Step::Done);
        }
        let item = self.upstream.next()?;
        (self.f)(item).map(Step::Yield)
    }
}

/// Transforms each element and drops the ones mapped to `None`.
pub struct FilterMap<P, F> {
    upstream: P,
    f: Arc<F>,
}

impl<P, F> FilterMap<P, F> {
    /// Create a filter-map node over `upstream`.
    pub const fn new(upstream: P, f: Arc<F>) -> Self {
        Self { upstream, f }
    }
}

impl<P, F, U> Compute for FilterMap<P, F>
where
    P: PullIter,
    F: Fn(P::Item) -> Result<Option<U>>,
{
    type Item = U;

    fn compute_next(&mut self) -> Result<Step<U>> {
        while self.upstream.has_next()? {
            if let Some(mapped) = (self.f)(self.upstream.next()?)? {
                return Ok(Step::Yield(mapped));
            }
        }
        Ok(Step::Done)
    }
}

/// Runs a side effect on each element as it passes through.
pub struct OnEach<P, F> {
    upstream: P,
    action: Arc<F>,
}

impl<P, F> OnEach<P, F> {
    /// Create a peeking node over `upstream`.
    pub const fn new(upstream: P, action: Arc<F>) -> Self {
        Self { upstream, action }
    }
}

impl<P, F> Compute for OnEach<P, F>
where
    P: PullIter,
    F: Fn(&P::Item) -> Result<()>,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        if !self.upstream.has_next()? {
            return Ok(Step::Done);
        }
        let item = self.upstream.next()?;
        (self.action)(&item)?;
        Ok(Step::Yield(item))
    }
}
