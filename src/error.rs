//! Error type shared by every sequence operation.
//!
//! Each variant corresponds to one failure kind of the engine:
//! - argument problems detected eagerly ([`SeqError::NullArgument`],
//!   [`SeqError::InvalidArgument`], [`SeqError::IndexOutOfRange`],
//!   [`SeqError::RangeOutOfBounds`]),
//! - misuse of an iterator or a once-only sequence ([`SeqError::IllegalState`]),
//! - terminal operations with nothing to return ([`SeqError::NoSuchElement`]),
//! - failures raised by caller-supplied closures ([`SeqError::Callback`]).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = SeqError> = std::result::Result<T, E>;

/// Every failure a sequence pipeline can report.
#[derive(Error, Debug)]
pub enum SeqError {
    /// A required value was absent.
    #[error("null argument: {0}")]
    NullArgument(String),

    /// A parameter was malformed, or a result was ambiguous.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the current state.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// There was no element to return.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// An index fell outside `0..len`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length it was checked against.
        len: usize,
    },

    /// A range was inverted or exceeded its bound.
    #[error("range {start}..{end} is out of bounds")]
    RangeOutOfBounds {
        /// Range start.
        start: usize,
        /// Range end (exclusive).
        end: usize,
    },

    /// A caller-supplied closure failed; the original error is kept as the source.
    #[error("callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl SeqError {
    /// Wrap an arbitrary error raised inside a predicate, mapper or generator.
    ///
    /// ```rust
    /// use lazyseq::{Sequence, SeqError};
    ///
    /// let parsed = Sequence::of(["1", "x"])
    ///     .try_map(|s| s.parse::<i32>().map_err(SeqError::callback))
    ///     .to_list();
    /// assert!(matches!(parsed, Err(SeqError::Callback(_))));
    /// ```
    pub fn callback<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self::Callback(err.into())
    }

    pub(crate) fn no_such_element(message: impl Into<String>) -> Self {
        Self::NoSuchElement(message.into())
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Returns `true` for [`SeqError::NoSuchElement`].
    #[must_use]
    pub const fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement(_))
    }

    /// Returns `true` for [`SeqError::IllegalState`].
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }

    /// Returns `true` for [`SeqError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
