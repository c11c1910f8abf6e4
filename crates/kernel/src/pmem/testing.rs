//! Test support for the physical-memory modules.

use super::{PageIndex, PAGE_SIZE};
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};

/// A page-aligned scratch region on the host heap, indexed from PFN 0.
///
/// Stands in for the physical memory the boot code would donate on real
/// hardware; dropped together with the test.
pub(crate) struct TestRegion {
    base: NonNull<u8>,
    layout: Layout,
    index: PageIndex,
}

impl TestRegion {
    pub(crate) fn new(frames: usize) -> Self {
        let layout = Layout::from_size_align(frames * PAGE_SIZE, PAGE_SIZE).unwrap();
        let ptr = unsafe { alloc(layout) };
        let Some(base) = NonNull::new(ptr) else {
            handle_alloc_error(layout)
        };

        // SAFETY
        // The region is freshly allocated, page aligned and exclusively
        // owned by this harness.
        let index = unsafe { PageIndex::new(base, 0, frames) }.unwrap();

        Self {
            base,
            layout,
            index,
        }
    }

    pub(crate) fn index(&self) -> &PageIndex {
        &self.index
    }

    /// Fill the given pages with a non-zero pattern.
    ///
    /// The first word of the leading page is left alone, the allocator
    /// may still keep its free-list link there.
    pub(crate) fn scribble(&self, first_pfn: usize, frames: usize) {
        let skip = core::mem::size_of::<usize>();

        // SAFETY: the offsets stay inside the owned region.
        unsafe {
            let start = self.base.as_ptr().add(first_pfn * PAGE_SIZE);
            core::ptr::write_bytes(start.add(skip), 0xa5, frames * PAGE_SIZE - skip);
        }
    }

    /// View the raw bytes of the given pages.
    pub(crate) fn as_bytes(&self, first_pfn: usize, frames: usize) -> &[u8] {
        // SAFETY: the offsets stay inside the owned region.
        unsafe {
            let start = self.base.as_ptr().add(first_pfn * PAGE_SIZE);
            core::slice::from_raw_parts(start, frames * PAGE_SIZE)
        }
    }
}

impl Drop for TestRegion {
    fn drop(&mut self) {
        // SAFETY: allocated in `new` with the stored layout.
        unsafe { dealloc(self.base.as_ptr(), self.layout) };
    }
}
