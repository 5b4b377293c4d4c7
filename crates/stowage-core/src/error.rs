//! Error types for container construction and guard verification.

use std::convert::Infallible;
use std::error::Error;
use std::fmt;

use crate::canary::Corruption;

/// Errors surfaced by `Storage` operations.
///
/// `E` is the error type of a fallible value constructor. Paths that take
/// an already-built value use the default `Infallible`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError<E = Infallible> {
    /// The value could not be constructed from the supplied arguments.
    /// No container exists and any region acquired for it has been released.
    Construction(E),
    /// The owned allocation for the value's frame could not be obtained.
    /// No value was constructed and no guard bytes were written.
    Allocation {
        /// Bytes requested for the frame.
        size: usize,
        /// Alignment requested for the frame.
        align: usize,
    },
    /// A guard region no longer holds its sentinel pattern.
    CanaryCorrupted(Corruption),
}

impl<E> StorageError<E> {
    /// Convert the construction error with `f`, leaving other variants as-is.
    pub fn map_construction<F, U>(self, f: F) -> StorageError<U>
    where
        F: FnOnce(E) -> U,
    {
        match self {
            Self::Construction(e) => StorageError::Construction(f(e)),
            Self::Allocation { size, align } => StorageError::Allocation { size, align },
            Self::CanaryCorrupted(c) => StorageError::CanaryCorrupted(c),
        }
    }

    /// The corruption carried by a [`StorageError::CanaryCorrupted`].
    pub fn corruption(&self) -> Option<Corruption> {
        match self {
            Self::CanaryCorrupted(c) => Some(*c),
            _ => None,
        }
    }
}

impl StorageError<Infallible> {
    /// Widen an error from a value-taking path to any construction error type.
    pub fn widen<U>(self) -> StorageError<U> {
        self.map_construction(|never| match never {})
    }
}

impl<E: fmt::Display> fmt::Display for StorageError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction(e) => write!(f, "value construction failed: {e}"),
            Self::Allocation { size, align } => {
                write!(
                    f,
                    "owned allocation failed: {size} bytes aligned to {align}"
                )
            }
            Self::CanaryCorrupted(c) => write!(f, "canary value corruption detected: {c}"),
        }
    }
}

impl<E: Error + 'static> Error for StorageError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Construction(e) => Some(e),
            _ => None,
        }
    }
}
