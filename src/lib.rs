//! An exact-fit, allocator-aware implementation of `Vec`.
//!
//! [`Vec`] keeps the usual contiguous-growable contract but pins down the
//! parts `std` leaves to the implementation:
//!
//! - **Growth is plain doubling.** A full vector grows to
//!   `max(2 * capacity, 1)`, nothing cleverer, so capacity is predictable:
//!   pushing onto a fresh vector yields `0, 1, 2, 4, 8, ...`.
//! - **Removal can reallocate to exactly fit.**
//!   [`shrink_remove`](Vec::shrink_remove) migrates the survivors into a
//!   block of exactly the new length; [`remove`](Vec::remove) shifts in
//!   place and keeps the block. Both report out-of-range indices as
//!   recoverable errors instead of panicking.
//! - **Allocation failure is catchable.** [`try_push`](Vec::try_push),
//!   [`try_reserve`](Vec::try_reserve) and friends return
//!   [`TryReserveError`]; a failed growth leaves the vector untouched.
//! - **Destruction is ordered.** Teardown, [`clear`](Vec::clear) and
//!   [`truncate`](Vec::truncate) drop live elements in reverse
//!   construction order, last element first, exactly once each.
//!
//! The allocator is injected via [`allocator_api2`]'s stable `Allocator`
//! trait; every constructor has an `_in` variant taking one.
//!
//! ```
//! use snug::snug;
//!
//! let mut v = snug![1, 2, 3];
//! v.push(4);
//! assert_eq!(v, [1, 2, 3, 4]);
//!
//! assert_eq!(v.shrink_remove(1), Ok(2));
//! assert_eq!(v, [1, 3, 4]);
//! assert_eq!(v.capacity(), 3);
//! ```
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![no_std]
extern crate alloc;

// Module with internal macros used by other modules (needs to be included
// before other modules).
#[macro_use]
mod macros;

pub mod error;
pub mod raw_vec;
pub mod slice;
pub mod vec;

pub use crate::error::{RemoveError, TryReserveError};
pub use crate::vec::Vec;
