//! # Block List
//!
//! A singly linked list of references to memory blocks, the bookkeeping
//! structure behind a simple allocator simulation (free list / used list).
//!
//! ## Layout
//!
//! 1. **Arena storage**: nodes live in a per-list slab, linked by slot index
//! 2. **Head/tail caching**: O(1) `add_first`, `add_last`, `remove_first`
//! 3. **Identity semantics**: blocks are `Rc` handles compared with `Rc::ptr_eq`
//! 4. **Borrowing cursor**: the iterator borrows the list, so the chain cannot
//!    change underneath it
//!
//! ## Usage Example
//!
//! ```
//! use std::rc::Rc;
//! use block_list::{LinkedList, MemoryBlock};
//!
//! let mut list = LinkedList::new();
//! let a = Rc::new(MemoryBlock::new(0, 16));
//! let b = Rc::new(MemoryBlock::new(16, 32));
//!
//! list.add_last(Rc::clone(&a));
//! list.add_first(Rc::clone(&b));
//! assert_eq!(list.index_of(&a), Some(1));
//! assert_eq!(list.to_string(), "(16 , 32) (0 , 16) ");
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod block;   // Concrete memory block type
pub mod config;  // Construction-time settings
pub mod list;    // Linked list, nodes and cursor

// Re-exports for convenience
pub use block::MemoryBlock;
pub use config::ListConfig;
pub use list::{LinkedList, ListIterator, NodeRef};

use thiserror::Error;

/// Errors returned by list operations
///
/// Every failing operation fails before touching the chain, so an error
/// never leaves the list partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// Index outside the range accepted by the operation
    #[error("index {index} out of range for list of size {size}")]
    InvalidIndex {
        /// Index that was requested
        index: usize,
        /// Size of the list at the time of the call
        size: usize,
    },

    /// Operation requires at least one element
    #[error("list is empty")]
    EmptyList,

    /// Node handle does not name a linked node of this list
    #[error("node reference is null or no longer linked")]
    NullReference,

    /// Block is not referenced by any node
    #[error("block not found in list")]
    NotFound,

    /// Cursor advanced past the last node
    #[error("iterator exhausted")]
    Exhausted,

    /// Structural invariant violated
    #[error("list corrupted: {0}")]
    Corrupted(String),
}

/// Result alias used throughout the crate
pub type Result<T, E = ListError> = std::result::Result<T, E>;
