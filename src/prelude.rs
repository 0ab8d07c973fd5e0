//! Commonly used imports
//!
//! Use `use lazyseq::prelude::*;` for quick access to the most common types.

// Core types
pub use crate::{Sequence, SeqError, Result};

// Protocol
pub use crate::{Compute, Pull, PullIter, Step};

// Results of reductions
pub use crate::{Groups, ImmutableList, ImmutableSet, Summary};
