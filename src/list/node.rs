//! Link cells and node handles
//!
//! Cells live in the owning list's slab; `next` is a slot index. A cell's
//! stamp is unique across every list in the process, so a [`NodeRef`] can
//! only ever resolve to the cell it was issued for.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// Allocate a stamp no other cell has carried
pub(crate) fn fresh_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Link cell holding one block reference
#[derive(Debug)]
pub(crate) struct Node<B> {
    /// Referenced block (shared with the caller)
    pub(crate) block: Rc<B>,

    /// Slot of the successor, `None` for the tail
    pub(crate) next: Option<usize>,

    /// Identity of this cell
    pub(crate) stamp: u64,
}

impl<B> Node<B> {
    /// Create an unlinked cell
    pub(crate) fn new(block: Rc<B>) -> Self {
        Self {
            block,
            next: None,
            stamp: fresh_stamp(),
        }
    }
}

/// Handle naming one linked node
///
/// Handles are plain values: they do not keep the node alive and become
/// stale once the node is removed. Stale handles are rejected with
/// [`ListError::NullReference`](crate::ListError::NullReference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) slot: usize,
    pub(crate) stamp: u64,
}

impl NodeRef {
    #[inline]
    pub(crate) fn new(slot: usize, stamp: u64) -> Self {
        Self { slot, stamp }
    }
}
