//! Metadata stored inside free pages.
//!
//! While a page is free, the first machine word of its memory belongs to
//! the allocator and holds the PFN of the next free block in the same
//! order's list. The moment the page is handed out, the word belongs to
//! the caller like every other byte of the block. This module is the
//! unsafe boundary for that rule: all reads and writes of free-page
//! memory live here.

use super::page::Page;
use super::PAGE_SIZE;
use core::ptr;

/// Stored in place of a successor PFN when the block is the last of its list.
const NEXT_FREE_NONE: usize = usize::MAX;

/// Read the `next_free` link of a free block-leader page.
///
/// # Safety
///
/// `page` must currently be free and under control of the calling
/// allocator. The link word of an allocated page belongs to whoever the
/// page was handed to.
pub(super) unsafe fn read_next_free(page: Page<'_>) -> Option<usize> {
    // SAFETY
    // Frame memory is page aligned per the `PageIndex::new` contract,
    // which is more than enough for a word sized read.
    let raw = unsafe { ptr::read(page.base_ptr().cast::<usize>().as_ptr()) };

    (raw != NEXT_FREE_NONE).then_some(raw)
}

/// Write the `next_free` link of a free block-leader page.
///
/// # Safety
///
/// Same contract as [`read_next_free`].
pub(super) unsafe fn write_next_free(page: Page<'_>, next: Option<usize>) {
    let raw = next.unwrap_or(NEXT_FREE_NONE);

    // SAFETY
    // See `read_next_free`.
    unsafe { ptr::write(page.base_ptr().cast::<usize>().as_ptr(), raw) };
}

/// Fill the `page_count` pages starting at `block` with zeroes.
///
/// # Safety
///
/// The whole block must be under control of the calling allocator and
/// not handed out yet.
pub(super) unsafe fn zero_block(block: Page<'_>, page_count: usize) {
    // SAFETY
    // The caller guarantees the block covers `page_count` owned pages.
    unsafe { ptr::write_bytes(block.base_ptr().as_ptr(), 0, page_count * PAGE_SIZE) };
}
