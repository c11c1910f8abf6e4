//! Round-robin scheduling.

use super::{Scheduler, Tcb};
use core::ptr::NonNull;

/// Cycles through all runnable threads in FIFO order.
///
/// Every pick rotates the queue by one: the thread at the front gets the
/// CPU and immediately goes to the back, so each runnable thread is
/// served once per round.
pub struct RoundRobin {
    head: Option<NonNull<Tcb>>,
    tail: Option<NonNull<Tcb>>,
}

impl RoundRobin {
    /// Create a scheduler with an empty run queue.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    fn push_back(&mut self, mut tcb: NonNull<Tcb>) {
        // SAFETY
        // The caller of `add` guarantees the block is valid, pinned and
        // exclusively ours while queued.
        unsafe { tcb.as_mut().next = None };

        match self.tail {
            // SAFETY: the old tail is still queued, so still valid.
            Some(mut tail) => unsafe { tail.as_mut().next = Some(tcb) },
            None => self.head = Some(tcb),
        }

        self.tail = Some(tcb);
    }

    fn pop_front(&mut self) -> Option<NonNull<Tcb>> {
        let mut head = self.head?;

        // SAFETY: queued blocks are valid per the `add` contract.
        self.head = unsafe { head.as_mut().next.take() };
        if self.head.is_none() {
            self.tail = None;
        }

        Some(head)
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RoundRobin {
    unsafe fn add(&mut self, tcb: NonNull<Tcb>) {
        self.push_back(tcb);
    }

    unsafe fn remove(&mut self, tcb: NonNull<Tcb>) {
        let mut prev: Option<NonNull<Tcb>> = None;
        let mut cur = self.head;

        while let Some(mut node) = cur {
            if node != tcb {
                prev = cur;
                // SAFETY: queued blocks are valid per the `add` contract.
                cur = unsafe { node.as_ref().next };
                continue;
            }

            // SAFETY: `node` is queued, hence valid.
            let next = unsafe { node.as_mut().next.take() };
            match prev {
                // SAFETY: `prev` is queued, hence valid.
                Some(mut prev) => unsafe { prev.as_mut().next = next },
                None => self.head = next,
            }
            if next.is_none() {
                self.tail = prev;
            }

            return;
        }

        // not queued: nothing to do
    }

    fn pick_next(&mut self, _current: Option<NonNull<Tcb>>) -> Option<NonNull<Tcb>> {
        // rotate: the front thread runs next and goes to the back
        let next = self.pop_front()?;
        self.push_back(next);
        Some(next)
    }
}
