use crate::{
    error::Result,
    pull::{Compute, PullIter},
    step::Step,
};

/// Pairs each element with its zero-based position in this traversal.
///
/// The counter lives in the node, so every fresh traversal starts at zero.
pub struct Indexed<P> {
    upstream: P,
    index: usize,
}

impl<P> Indexed<P> {
    /// Create an indexing node over `upstream`.
    pub const fn new(upstream: P) -> Self {
        Self { upstream, index: 0 }
    }
}

impl<P> Compute for Indexed<P>
where
    P: PullIter,
{
    type Item = (usize, P::Item);

    fn compute_next(&mut self) -> Result<Step<Self::Item>> {
        if !self.upstream.has_next()? {
            return Ok(Step::Done);
        }
        let item = self.upstream.next()?;
        let index = self.index;
        self.index += 1;
        Ok(Step::Yield((index, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pull::Pull, source::IterSource};

    #[test]
    fn test_indexed_counts_from_zero() {
        let mut pull = Pull::new(Indexed::new(Pull::new(IterSource::new("xyz".chars()))));
        assert_eq!(pull.next().unwrap(), (0, 'x'));
        assert_eq!(pull.next().unwrap(), (1, 'y'));
        assert_eq!(pull.next().unwrap(), (2, 'z'));
        assert!(!pull.has_next().unwrap());
    }
}
