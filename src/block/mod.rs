//! Memory block descriptors
//!
//! A block is a span `[base_address, base_address + length)` of a simulated
//! heap. The list never looks inside a block; it only needs the textual form.

use std::fmt;

/// Contiguous span of simulated memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryBlock {
    /// First address covered by the block
    pub base_address: usize,

    /// Number of addresses covered
    pub length: usize,
}

impl MemoryBlock {
    /// Create a block spanning `[base_address, base_address + length)`
    pub fn new(base_address: usize, length: usize) -> Self {
        Self {
            base_address,
            length,
        }
    }

    /// One past the last address (saturates at `usize::MAX`)
    #[inline]
    pub fn end_address(&self) -> usize {
        self.base_address.saturating_add(self.length)
    }

    /// Check whether `address` falls inside the block
    #[inline]
    pub fn contains(&self, address: usize) -> bool {
        address >= self.base_address && address < self.end_address()
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} , {})", self.base_address, self.length)
    }
}
