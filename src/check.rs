//! Eager argument and state assertions.
//!
//! Messages are taken as `impl Display` so callers can pass `format_args!`
//! and pay for formatting only when a check fails.

use std::fmt::Display;

use crate::error::{Result, SeqError};

/// Unwrap a required value, failing with [`SeqError::NullArgument`] when absent.
///
/// ```rust
/// use lazyseq::check;
///
/// assert_eq!(check::require_non_null(Some(3), "count").unwrap(), 3);
/// assert!(check::require_non_null(None::<i32>, "count").is_err());
/// ```
pub fn require_non_null<T>(value: Option<T>, what: impl Display) -> Result<T> {
    value.ok_or_else(|| SeqError::NullArgument(format!("{what} must not be null")))
}

/// Fail with [`SeqError::InvalidArgument`] unless `condition` holds.
pub fn require_argument(condition: bool, message: impl Display) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SeqError::InvalidArgument(message.to_string()))
    }
}

/// Fail with [`SeqError::IllegalState`] unless `condition` holds.
pub fn require_state(condition: bool, message: impl Display) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(SeqError::IllegalState(message.to_string()))
    }
}

/// Check `index < len`, returning the index.
pub fn require_index(index: usize, len: usize) -> Result<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(SeqError::IndexOutOfRange { index, len })
    }
}

/// Check `start <= end <= bound`.
pub fn require_range(start: usize, end: usize, bound: usize) -> Result<()> {
    if start <= end && end <= bound {
        Ok(())
    } else {
        Err(SeqError::RangeOutOfBounds { start, end })
    }
}

/// Convert a signed count into `usize`, rejecting negatives.
pub fn require_count(count: i64, what: impl Display) -> Result<usize> {
    require_argument(
        count >= 0,
        format_args!("{what} must be non-negative, was {count}"),
    )?;
    usize::try_from(count).map_err(|_| {
        SeqError::InvalidArgument(format!("{what} {count} does not fit in usize"))
    })
}
