//! Single-consumer guard for sequences whose source cannot be restarted.
//!
//! Sources such as a raw iterator or a generator closure are consumed by
//! their first traversal. A second traversal would silently see nothing,
//! so [`OnceGuard`] turns it into a hard [`SeqError::IllegalState`] instead.
//!
//! The hand-off is a get-and-clear under a lock: when several threads race
//! to consume the same guarded sequence, exactly one receives it and every
//! other caller fails immediately, without blocking on the winner's
//! traversal.

use parking_lot::Mutex;

use crate::{
    error::{Result, SeqError},
    sequence::Sequence,
};

/// Holds a sequence until its single consumer takes it.
pub struct OnceGuard<T> {
    slot: Mutex<Option<Sequence<T>>>,
}

impl<T> OnceGuard<T>
where
    T: 'static,
{
    /// Guard `sequence`.
    pub const fn new(sequence: Sequence<T>) -> Self {
        Self {
            slot: Mutex::new(Some(sequence)),
        }
    }

    /// Take the guarded sequence, leaving the guard empty.
    ///
    /// The first call succeeds; every later call fails with
    /// [`SeqError::IllegalState`].
    pub fn take(&self) -> Result<Sequence<T>> {
        let taken = self.slot.lock().take();
        match taken {
            Some(sequence) => {
                tracing::trace!("once-only sequence handed to its consumer");
                Ok(sequence)
            }
            None => {
                tracing::debug!("rejected second traversal of a once-only sequence");
                Err(SeqError::illegal_state(
                    "this sequence can be consumed only once",
                ))
            }
        }
    }

    /// Whether the sequence has already been taken.
    pub fn is_consumed(&self) -> bool {
        self.slot.lock().is_none()
    }
}

impl<T> std::fmt::Debug for OnceGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnceGuard")
            .field("consumed", &self.slot.lock().is_none())
            .finish()
    }
}
