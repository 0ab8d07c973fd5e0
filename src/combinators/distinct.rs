use std::{hash::Hash, sync::Arc};

use rustc_hash::FxHashSet;

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Yields only the first element seen for each key.
///
/// Memory grows with the number of distinct keys observed; nothing is ever
/// evicted from the seen-set during one traversal.
pub struct Distinct<P, F, K> {
    upstream: P,
    key: Arc<F>,
    seen: FxHashSet<K>,
}

impl<P, F, K> Distinct<P, F, K> {
    /// Create a de-duplicating node over `upstream`.
    pub fn new(upstream: P, key: Arc<F>) -> Self {
        Self {
            upstream,
            key,
            seen: FxHashSet::default(),
        }
    }
}

impl<P, F, K> Compute for Distinct<P, F, K>
where
    P: PullIter,
    F: Fn(&P::Item) -> Result<K>,
    K: Eq + Hash,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        while self.upstream.has_next()? {
            let item = self.upstream.next()?;
            if self.seen.insert((self.key)(&item)?) {
                return Ok(Step::Yield(item));
            }
        }
        Ok(Step::Done)
    }
}
