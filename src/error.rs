//! Error types reported by fallible container operations.

use core::alloc::Layout;
use core::fmt;

/// The error type for fallible allocation, returned by operations such as
/// [`try_reserve`] and [`try_push`].
///
/// A vector that reports this error is left exactly as it was before the
/// failing call, unless the operation documents otherwise
/// ([`try_clone_from`] is the one exception).
///
/// [`try_reserve`]: crate::Vec::try_reserve
/// [`try_push`]: crate::Vec::try_push
/// [`try_clone_from`]: crate::Vec::try_clone_from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TryReserveError {
    /// The computed capacity exceeded the collection's maximum
    /// (`isize::MAX` bytes).
    CapacityOverflow,
    /// The allocator refused the request.
    AllocError {
        /// The layout of the allocation that failed.
        layout: Layout,
    },
}

impl fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => f.write_str(
                "memory allocation failed because the computed capacity exceeded \
                 the collection's maximum",
            ),
            Self::AllocError { layout } => {
                write!(f, "memory allocation of {} bytes failed", layout.size())
            }
        }
    }
}

impl core::error::Error for TryReserveError {}

/// The error type for the removal operations [`remove`] and
/// [`shrink_remove`].
///
/// Out-of-range indices are recoverable: the vector is left untouched and
/// remains fully usable.
///
/// [`remove`]: crate::Vec::remove
/// [`shrink_remove`]: crate::Vec::shrink_remove
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RemoveError {
    /// The index was not smaller than the vector's length.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The vector's length at the time of the call.
        len: usize,
    },
    /// Allocating the replacement block failed. Only [`shrink_remove`]
    /// reports this; the vector is left unchanged.
    ///
    /// [`shrink_remove`]: crate::Vec::shrink_remove
    Alloc(TryReserveError),
}

impl From<TryReserveError> for RemoveError {
    fn from(err: TryReserveError) -> Self {
        Self::Alloc(err)
    }
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "removal index (is {index}) should be < len (is {len})")
            }
            Self::Alloc(err) => err.fmt(f),
        }
    }
}

impl core::error::Error for RemoveError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::OutOfRange { .. } => None,
            Self::Alloc(err) => Some(err),
        }
    }
}
