//! Management of physical page frames.
//!
//! The heart of this module is the [`BuddyAllocator`], which hands out
//! blocks of `2^order` contiguous page frames. The [`PageIndex`] is the
//! host-provided mapping between page-frame numbers and the actual frame
//! memory, and the `overlay` module is the only place that touches the
//! bytes of a free frame.

pub mod buddy;
mod overlay;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use buddy::{BuddyAllocator, LAST_ORDER, MAX_PENDING_MERGES};
pub use page::{Page, PageIndex};

use crate::unit;
use bitflags::bitflags;
use core::fmt;
use displaydoc_lite::displaydoc;

/// Number of bits of the in-page offset of an address.
pub const PAGE_BITS: usize = 12;

/// The size of a single page frame, 4 KiB.
///
/// This is also the size of an order-0 block in the buddy allocator.
pub const PAGE_SIZE: usize = 1 << PAGE_BITS;

bitflags! {
    /// Flags that change how [`PageAllocator::allocate_pages`] behaves.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AllocFlags: u32 {
        /// Zero the whole block before handing it to the caller.
        const ZERO = 1 << 0;
    }
}

displaydoc! {
    /// Errors that can occur while bringing up the physical-memory subsystem.
    #[derive(Debug, PartialEq, Eq)]
    pub enum Error {
        /// the managed region must contain at least one page frame
        EmptyRegion,
        /// the region base address is not aligned to the page size
        MisalignedRegion,
        /// the page-frame range overflows the address space
        RangeOverflow,
    }
}

/// Statistics of a page allocator.
#[derive(Debug, Clone)]
pub struct AllocStats {
    /// The name of the allocator these stats belong to.
    pub name: &'static str,
    /// The number of bytes currently handed out to callers.
    pub allocated: usize,
    /// The number of bytes available for allocation.
    pub free: usize,
    /// The total number of bytes donated to the allocator.
    pub total: usize,
}

impl fmt::Display for AllocStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        self.name.chars().try_for_each(|_| write!(f, "~"))?;
        writeln!(f, "\nAllocated: {}", unit::bytes(self.allocated))?;
        writeln!(f, "Free:      {}", unit::bytes(self.free))?;
        writeln!(f, "Total:     {}", unit::bytes(self.total))?;
        Ok(())
    }
}

/// The operations every page allocator of the kernel offers.
///
/// The rest of the kernel only ever talks to this trait; the buddy
/// allocator is the one implementation of it.
pub trait PageAllocator<'mm> {
    /// Donate `page_count` contiguous, genuinely free pages starting at
    /// `range_start` to the allocator.
    ///
    /// Panics if `page_count` is zero or any page of the range is already
    /// in a free list.
    fn insert_free_pages(&mut self, range_start: Page<'mm>, page_count: usize);

    /// Allocate a block of `2^order` contiguous pages.
    ///
    /// Returns `None` when the request cannot be satisfied even after
    /// reclaiming every deferred merge. Panics if `order` is larger than
    /// [`LAST_ORDER`].
    fn allocate_pages(&mut self, order: usize, flags: AllocFlags) -> Option<Page<'mm>>;

    /// Give a block back that was previously obtained from
    /// [`allocate_pages`](Self::allocate_pages) with the same `order`.
    ///
    /// Freeing a block twice is a fatal error.
    fn free_pages(&mut self, block_start: Page<'mm>, order: usize);

    /// Write the current state of the free lists to the debug console.
    fn dump(&self);
}
