//! Inline vs owned-allocation placement selection.

use std::fmt;

/// Where a container keeps its value's byte region.
///
/// Placement is a property of the container's type, not of an instance:
/// [`Placement::select`] is a `const fn` and every `Storage` instantiation
/// resolves it at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// The region lives directly inside the container's own footprint.
    Inline,
    /// The region lives in a separate allocation the container exclusively owns.
    Owned,
}

impl Placement {
    /// Choose a placement for a value of `size` bytes under `threshold`.
    ///
    /// Values at or below the threshold are stored inline; anything larger
    /// gets its own allocation.
    pub const fn select(size: usize, threshold: usize) -> Self {
        if size <= threshold {
            Self::Inline
        } else {
            Self::Owned
        }
    }

    /// Choose a placement for `T` under `threshold`.
    pub const fn for_type<T>(threshold: usize) -> Self {
        Self::select(std::mem::size_of::<T>(), threshold)
    }

    /// Returns `true` for [`Placement::Inline`].
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Returns `true` for [`Placement::Owned`].
    pub const fn is_owned(self) -> bool {
        matches!(self, Self::Owned)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("inline"),
            Self::Owned => f.write_str("owned"),
        }
    }
}
