//! Slice interop for `Vec`.
use alloc::boxed::Box;

use crate::vec::Vec;

/// Converts a boxed slice into a vector without reallocating, reusing the
/// box's allocation as a block that is exactly full.
pub fn into_vec<T>(b: Box<[T]>) -> Vec<T> {
    let len = b.len();
    let b = Box::into_raw(b);
    unsafe { Vec::from_raw_parts(b as *mut T, len, len) }
}

/// Clones a slice into a new vector sized to exactly the slice's length.
pub fn to_vec<T: Clone>(s: &[T]) -> Vec<T> {
    let mut vec = Vec::with_capacity(s.len());
    vec.extend_from_slice(s);
    vec
}
