//! One node type per intermediate operation.
//!
//! Every node owns exactly one upstream (two for [`Zip`]) and implements
//! [`Compute`](crate::Compute); the sequence façade wraps them in
//! [`Pull`](crate::Pull) and boxes them when a traversal starts.

mod chain;
mod distinct;
mod filter;
mod flat_map;
mod indexed;
mod map;
mod skip;
mod sorted;
mod take;

pub use chain::*;
pub use distinct::*;
pub use filter::*;
pub use flat_map::*;
pub use indexed::*;
pub use map::*;
pub use skip::*;
pub use sorted::*;
pub use take::*;
