use std::sync::Arc;

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Keeps the elements accepted by a predicate.
///
/// Pulls upstream until an element is accepted or upstream is exhausted; at
/// most one accepted element is staged at a time.
pub struct Filter<P, F> {
    upstream: P,
    pred: Arc<F>,
}

impl<P, F> Filter<P, F> {
    /// Create a filter over `upstream`.
    pub const fn new(upstream: P, pred: Arc<F>) -> Self {
        Self { upstream, pred }
    }
}

impl<P, F> Compute for Filter<P, F>
where
    P: PullIter,
    F: Fn(&P::Item) -> Result<bool>,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        while self.upstream.has_next()? {
            let item = self.upstream.next()?;
            if (self.pred)(&item)? {
                return Ok(Step::Yield(item));
            }
        }
        Ok(Step::Done)
    }
}
