//! Single-pass cursor over a list
//!
//! States: before first, positioned at node k, exhausted (still positioned
//! at the tail). The cursor borrows the list, so the chain cannot be
//! mutated while it is alive.

use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;

use super::{LinkedList, NodeRef};
use crate::{ListError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeFirst,
    At(usize),
}

/// Forward cursor yielding each block in order
pub struct ListIterator<'a, B> {
    list: &'a LinkedList<B>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, B> ListIterator<'a, B> {
    pub(super) fn new(list: &'a LinkedList<B>) -> Self {
        Self {
            list,
            cursor: Cursor::BeforeFirst,
            remaining: list.size,
        }
    }

    fn peek_slot(&self) -> Option<usize> {
        match self.cursor {
            Cursor::BeforeFirst => self.list.first,
            Cursor::At(slot) => self.list.nodes[slot].next,
        }
    }

    /// Check whether another node lies beyond the cursor
    #[inline]
    pub fn has_next(&self) -> bool {
        self.peek_slot().is_some()
    }

    /// Advance and return the block at the new position
    ///
    /// Unlike [`Iterator::next`], running off the end is an error.
    pub fn next_block(&mut self) -> Result<&'a Rc<B>> {
        self.next().ok_or(ListError::Exhausted)
    }

    /// Node most recently produced, `None` before the first advance
    pub fn current(&self) -> Option<NodeRef> {
        match self.cursor {
            Cursor::BeforeFirst => None,
            Cursor::At(slot) => Some(self.list.handle(slot)),
        }
    }
}

impl<'a, B> Iterator for ListIterator<'a, B> {
    type Item = &'a Rc<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.peek_slot()?;
        self.cursor = Cursor::At(slot);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&self.list.nodes[slot].block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<B> ExactSizeIterator for ListIterator<'_, B> {}

impl<B> FusedIterator for ListIterator<'_, B> {}

impl<B> Clone for ListIterator<'_, B> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<B> fmt::Debug for ListIterator<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListIterator")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}
