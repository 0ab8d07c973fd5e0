use std::{cmp::Ordering, sync::Arc};

use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Buffers the whole upstream on first pull, then yields it in sorted order.
///
/// Not lazy: the first `has_next` drains upstream completely. The sort is
/// stable, so elements that compare equal keep their encounter order.
pub struct Sorted<P, F>
where
    P: PullIter,
{
    upstream: P,
    cmp: Arc<F>,
    buffer: Option<std::vec::IntoIter<P::Item>>,
}

impl<P, F> Sorted<P, F>
where
    P: PullIter,
{
    /// Create a sorting node over `upstream`.
    pub const fn new(upstream: P, cmp: Arc<F>) -> Self {
        Self {
            upstream,
            cmp,
            buffer: None,
        }
    }
}

impl<P, F> Compute for Sorted<P, F>
where
    P: PullIter,
    F: Fn(&P::Item, &P::Item) -> Ordering,
{
    type Item = P::Item;

    fn compute_next(&mut self) -> Result<Step<P::Item>> {
        if self.buffer.is_none() {
            let mut items = Vec::new();
            while self.upstream.has_next()? {
                items.push(self.upstream.next()?);
            }
            items.sort_by(|a, b| (self.cmp)(a, b));
            self.buffer = Some(items.into_iter());
        }
        Ok(self.buffer.as_mut().and_then(Iterator::next).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pull::Pull, source::IterSource};

    #[test]
    fn test_sorted_is_stable() {
        let by_len = Arc::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        let source = Pull::new(IterSource::new(["ccc", "a", "bb", "b", "aa"].into_iter()));
        let mut pull = Pull::new(Sorted::new(source, by_len));
        let mut out = Vec::new();
        while pull.has_next().unwrap() {
            out.push(pull.next().unwrap());
        }
        assert_eq!(out, vec!["a", "b", "bb", "aa", "ccc"]);
    }
}
