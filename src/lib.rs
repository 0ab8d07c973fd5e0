//! # Lazyseq: Lazy, Pull-Driven Sequences
//!
//! Describe a pipeline of element transformations once, then run it as many
//! times as the source allows. Nothing is computed until a terminal operation
//! pulls, and every traversal starts from scratch.
//!
//! ## Core Types
//!
//! - **[`Sequence<T>`]**: An immutable description of a source plus the operations layered on it
//! - **[`PullIter`]**: The `has_next`/`next` protocol every node speaks
//! - **[`Compute`]** and **[`Pull`]**: Write one "next value" step, get the full protocol with poisoning
//! - **[`OnceGuard`]**: Turns a second traversal of a non-restartable source into an error
//!
//! ## Key Features
//!
//! - **Lazy**: Intermediate operations only build a description
//! - **Short-circuiting**: `take`, `first`, `any` and friends stop pulling as soon as they can
//! - **Fail-fast**: A failing callback poisons its node; later calls report `IllegalState`
//!
//! ## Example
//!
//! ```
//! use lazyseq::Sequence;
//!
//! let words = Sequence::of(["one", "two", "three", "four", "five"]);
//!
//! let long = words.filter(|w| w.len() > 3).map(str::to_uppercase);
//! assert_eq!(long.to_list()?, vec!["THREE", "FOUR", "FIVE"]);
//!
//! let by_len = words.group_by(|w| w.len())?;
//! assert_eq!(by_len.get(&3), Some(&["one", "two"][..]));
//! # Ok::<(), lazyseq::SeqError>(())
//! ```
//!
//! ## Common Functions
//!
//! **Sources:**
//! - [`Sequence::of`] - Restartable sequence over a fixed list of values
//! - [`Sequence::from_iterable`] - Restartable sequence over a cloneable iterable
//! - [`Sequence::generate`] - Seed plus successor function
//! - [`Sequence::from_iterator`] - Once-only sequence over a raw iterator
//!
//! **Chaining:**
//! - [`Sequence::filter`], [`Sequence::map`], [`Sequence::flat_map`]
//! - [`Sequence::take`], [`Sequence::drop`], [`Sequence::drop_while`]
//! - [`Sequence::distinct`], [`Sequence::sorted`], [`Sequence::indexed`]
//!
//! **Reducing:**
//! - [`Sequence::count`], [`Sequence::first`], [`Sequence::single`], [`Sequence::fold`]
//! - [`Sequence::group_by`], [`Sequence::summary`], [`Sequence::to_list`]

pub mod check;
mod combinators;
mod error;
mod immutable;
mod once;
pub mod prelude;
mod pull;
mod sequence;
mod source;
mod step;
mod terminal;

pub use combinators::*;
pub use error::*;
pub use immutable::*;
pub use once::*;
pub use pull::*;
pub use sequence::*;
pub use source::*;
pub use step::*;
pub use terminal::*;
