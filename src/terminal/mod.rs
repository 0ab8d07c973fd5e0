//! Eager operations that drive a sequence to a result.
//!
//! Every terminal operation opens a fresh traversal, pulls as far as it
//! needs (short-circuiting where the answer is already known) and returns a
//! `Result`: opening a once-only sequence twice, or a failing closure
//! anywhere in the chain, surfaces here.
//!
//! Optional-returning variants carry an `_opt` suffix (or are named `find*`)
//! and report "no value" as `Ok(None)` instead of
//! [`SeqError::NoSuchElement`](crate::SeqError::NoSuchElement).

mod collect;
mod fold;
mod group;
mod numeric;
mod search;

pub use group::Groups;
pub use numeric::{Numeric, Summary};
