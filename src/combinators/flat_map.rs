use std::sync::Arc;

use crate::{
    error::Result,
    pull::{BoxPull, Compute, PullIter},
    step::Step,
};

/// Expands each element into a sub-iterator and yields their concatenation.
///
/// Holds the current sub-iterator, which may already be exhausted. Empty
/// sub-iterators are skipped until a non-empty one is found or upstream
/// runs out.
pub struct FlatMap<P, F, U> {
    upstream: P,
    f: Arc<F>,
    current: Option<BoxPull<U>>,
}

impl<P, F, U> FlatMap<P, F, U> {
    /// Create a flat-mapping node over `upstream`.
    pub const fn new(upstream: P, f: Arc<F>) -> Self {
        Self {
            upstream,
            f,
            current: None,
        }
    }
}

impl<P, F, U> Compute for FlatMap<P, F, U>
where
    P: PullIter,
    F: Fn(P::Item) -> Result<BoxPull<U>>,
{
    type Item = U;

    fn compute_next(&mut self) -> Result<Step<U>> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if current.has_next()? {
                    return current.next().map(Step::Yield);
                }
            }
            if !self.upstream.has_next()? {
                self.current = None;
                return Ok(Step::Done);
            }
            let outer = self.upstream.next()?;
            self.current = Some((self.f)(outer)?);
        }
    }
}
