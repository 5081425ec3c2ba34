//! Implementation details for `Vec`.
//!
//! [`RawVec`] owns the backing storage block and nothing else: it acquires
//! and releases raw memory sized in element units, but never constructs or
//! drops a `T`. Element lifecycle is the caller's job, which is why
//! releasing a block here is only sound once every live element has been
//! moved out or dropped.
use core::alloc::Layout;
use core::cmp;
use core::mem;
use core::ptr::NonNull;

use alloc::alloc::handle_alloc_error;
use allocator_api2::alloc::{Allocator, Global};

use crate::error::TryReserveError::{self, *};

/// A low-level utility for more ergonomically allocating, reallocating, and
/// deallocating a buffer of memory without having to worry about all the
/// corner cases involved.
///
/// The buffer is uninitialized storage for `cap` elements; slots only ever
/// become initialized through the owning container's writes. `RawVec` does
/// not track which slots are live, and its `Drop` frees the block without
/// running any element destructor.
pub(crate) struct RawVec<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
}

impl<T> RawVec<T, Global> {
    /// Creates a `RawVec` without allocating. If `T` is zero-sized the
    /// capacity reads as `usize::MAX`, otherwise `0`. Useful for
    /// implementing delayed allocation.
    pub(crate) const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Allocates storage for exactly `capacity` elements, aborting on
    /// failure.
    #[inline]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Reconstitutes a `RawVec` from a pointer and capacity.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated via `Global` with the layout of a
    /// `[T; capacity]`, or be dangling with `capacity == 0` (any capacity
    /// for zero-sized `T`).
    #[inline]
    pub(crate) unsafe fn from_raw_parts(ptr: *mut T, capacity: usize) -> Self {
        unsafe { Self::from_raw_parts_in(ptr, capacity, Global) }
    }
}

impl<T, A: Allocator> RawVec<T, A> {
    /// Like `new`, but parameterized over the choice of allocator for the
    /// returned `RawVec`.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
        }
    }

    /// Like `with_capacity`, but parameterized over the choice of allocator
    /// for the returned `RawVec`.
    #[inline]
    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        match Self::try_with_capacity_in(capacity, alloc) {
            Ok(this) => this,
            Err(CapacityOverflow) => capacity_overflow(),
            Err(AllocError { layout }) => handle_alloc_error(layout),
        }
    }

    /// The same as `with_capacity_in`, but returns on errors instead of
    /// aborting. On failure nothing has been allocated.
    pub(crate) fn try_with_capacity_in(
        capacity: usize,
        alloc: A,
    ) -> Result<Self, TryReserveError> {
        let ptr = Self::try_allocate_exact(&alloc, capacity)?;
        let cap = if mem::size_of::<T>() == 0 { 0 } else { capacity };
        Ok(Self { ptr, cap, alloc })
    }

    /// Acquires a block for exactly `capacity` elements from `alloc`
    /// without adopting it. Zero capacities and zero-sized element types
    /// allocate nothing and yield a dangling pointer.
    pub(crate) fn try_allocate_exact(
        alloc: &A,
        capacity: usize,
    ) -> Result<NonNull<T>, TryReserveError> {
        if mem::size_of::<T>() == 0 || capacity == 0 {
            return Ok(NonNull::dangling());
        }
        let layout = Layout::array::<T>(capacity).map_err(|_| CapacityOverflow)?;
        alloc_guard(layout.size())?;
        match alloc.allocate(layout) {
            Ok(block) => Ok(block.cast()),
            Err(_) => Err(AllocError { layout }),
        }
    }

    /// Reconstitutes a `RawVec` from a pointer, capacity and allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been allocated via `alloc` with the layout of a
    /// `[T; capacity]`, or be dangling with a capacity that reports no
    /// current memory (`0`, or any value for zero-sized `T`).
    #[inline]
    pub(crate) unsafe fn from_raw_parts_in(ptr: *mut T, capacity: usize, alloc: A) -> Self {
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            cap: capacity,
            alloc,
        }
    }

    /// Gets a raw pointer to the start of the allocation. Note that this is
    /// `NonNull::dangling()` if `capacity == 0` or `T` is zero-sized. In
    /// the former case, you must be careful.
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Gets the capacity of the allocation.
    ///
    /// This will always be `usize::MAX` if `T` is zero-sized.
    pub(crate) fn cap(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Returns a shared reference to the allocator backing this `RawVec`.
    pub(crate) fn alloc(&self) -> &A {
        &self.alloc
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if mem::size_of::<T>() == 0 || self.cap == 0 {
            None
        } else {
            // We have an allocated chunk of memory, so we can bypass runtime
            // checks to get our current layout.
            unsafe {
                let size = mem::size_of::<T>() * self.cap;
                let layout = Layout::from_size_align_unchecked(size, mem::align_of::<T>());
                Some((self.ptr.cast(), layout))
            }
        }
    }

    /// Adopts a freshly acquired block, releasing the current one.
    ///
    /// # Safety
    ///
    /// Every live element must already have been moved out of or dropped in
    /// the current block, and `ptr`/`cap` must satisfy the same contract as
    /// [`from_raw_parts_in`](Self::from_raw_parts_in).
    pub(crate) unsafe fn adopt_block(&mut self, ptr: NonNull<T>, cap: usize) {
        if let Some((old_ptr, old_layout)) = self.current_memory() {
            unsafe { self.alloc.deallocate(old_ptr, old_layout) };
        }
        self.ptr = ptr;
        self.cap = if mem::size_of::<T>() == 0 { 0 } else { cap };
    }

    /// Ensures that the buffer contains space for at least `len +
    /// additional` elements, growing by doubling so a sequence of pushes
    /// reallocates `O(log n)` times.
    ///
    /// # Panics
    ///
    /// Panics if the required capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub(crate) fn reserve(&mut self, len: usize, additional: usize) {
        match self.try_reserve(len, additional) {
            Err(CapacityOverflow) => capacity_overflow(),
            Err(AllocError { layout }) => handle_alloc_error(layout),
            Ok(()) => { /* yay */ }
        }
    }

    /// The same as `reserve`, but returns on errors instead of panicking or
    /// aborting. On failure the buffer, its capacity and every element in
    /// it are exactly as they were.
    pub(crate) fn try_reserve(
        &mut self,
        len: usize,
        additional: usize,
    ) -> Result<(), TryReserveError> {
        if self.needs_to_grow(len, additional) {
            self.grow_amortized(len, additional)
        } else {
            Ok(())
        }
    }

    /// Returns if the buffer needs to grow to fulfill the needed extra
    /// capacity. Mainly used to make inlining reserve-calls possible
    /// without inlining `grow`.
    fn needs_to_grow(&self, len: usize, additional: usize) -> bool {
        additional > self.cap().wrapping_sub(len)
    }

    fn grow_amortized(&mut self, len: usize, additional: usize) -> Result<(), TryReserveError> {
        // This is ensured by the calling contexts.
        debug_assert!(additional > 0);

        if mem::size_of::<T>() == 0 {
            // Since we return a capacity of `usize::MAX` when the element
            // size is 0, getting to here necessarily means the `RawVec` is
            // overfull.
            return Err(CapacityOverflow);
        }

        let required = len.checked_add(additional).ok_or(CapacityOverflow)?;

        // Doubling with a floor of one element, so growth terminates when
        // starting from an unallocated buffer. The doubling cannot overflow
        // because `cap <= isize::MAX`.
        let new_cap = cmp::max(self.cap * 2, cmp::max(required, 1));

        let new_layout = Layout::array::<T>(new_cap).map_err(|_| CapacityOverflow)?;
        alloc_guard(new_layout.size())?;

        let new_ptr: NonNull<T> = match self.alloc.allocate(new_layout) {
            Ok(block) => block.cast(),
            Err(_) => return Err(AllocError { layout: new_layout }),
        };

        // The new block must hold every live element before the old block
        // is released; a failure above leaves the old block untouched.
        unsafe {
            if len > 0 {
                core::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
            }
            if let Some((old_ptr, old_layout)) = self.current_memory() {
                self.alloc.deallocate(old_ptr, old_layout);
            }
        }

        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }
}

impl<T, A: Allocator> Drop for RawVec<T, A> {
    /// Frees the memory owned by the `RawVec` *without* trying to drop its
    /// contents.
    fn drop(&mut self) {
        if let Some((ptr, layout)) = self.current_memory() {
            unsafe { self.alloc.deallocate(ptr, layout) }
        }
    }
}

// We need to guarantee the following:
// * We don't ever allocate `> isize::MAX` byte-size objects.
// * We don't overflow `usize::MAX` and actually allocate too little.
#[inline]
pub(crate) fn alloc_guard(alloc_size: usize) -> Result<(), TryReserveError> {
    if alloc_size > isize::MAX as usize {
        Err(TryReserveError::CapacityOverflow)
    } else {
        Ok(())
    }
}

// One central function responsible for reporting capacity overflows. This
// ensures the code generation related to these panics is minimal as there's
// only one location which panics rather than a bunch throughout the module.
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
