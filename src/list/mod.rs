//! Singly linked list of block references
//!
//! Nodes are stored in a per-list slab and linked by slot index. `first`
//! owns the chain through the `next` links; `last` is a cached position used
//! for O(1) appends.
//!
//! Blocks are shared `Rc` handles compared by identity, so two blocks with
//! equal contents are still distinct elements.

mod iter;
mod node;

pub use iter::ListIterator;
pub use node::NodeRef;

use std::fmt;
use std::rc::Rc;

use slab::Slab;
use tracing::{debug, error, trace};

use crate::config::ListConfig;
use crate::{ListError, Result};
use node::Node;

/// Where a node sits in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Sole,
    Head,
    Tail,
    Interior,
}

/// Singly linked list of shared block references
pub struct LinkedList<B> {
    nodes: Slab<Node<B>>,
    first: Option<usize>,
    last: Option<usize>,
    size: usize,
    check_invariants: bool,
}

impl<B> Default for LinkedList<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> LinkedList<B> {
    /// Create an empty list with default settings
    pub fn new() -> Self {
        Self::with_config(ListConfig::default())
    }

    /// Create an empty list
    pub fn with_config(config: ListConfig) -> Self {
        Self {
            nodes: Slab::with_capacity(config.initial_capacity),
            first: None,
            last: None,
            size: 0,
            check_invariants: config.check_invariants,
        }
    }

    /// Handle of the head node
    #[inline]
    pub fn get_first(&self) -> Option<NodeRef> {
        self.first.map(|slot| self.handle(slot))
    }

    /// Handle of the tail node
    #[inline]
    pub fn get_last(&self) -> Option<NodeRef> {
        self.last.map(|slot| self.handle(slot))
    }

    /// Number of nodes
    #[inline]
    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the list has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Get the node at `index` by walking from the head
    ///
    /// Fails with `InvalidIndex` if the list is empty or `index >= size`.
    pub fn get_node(&self, index: usize) -> Result<NodeRef> {
        if index >= self.size {
            return Err(self.reject("get_node", self.invalid_index(index)));
        }
        let slot = self.slot_at(index).ok_or_else(|| self.broken_chain())?;
        Ok(self.handle(slot))
    }

    /// Get the block at `index`
    pub fn get_block(&self, index: usize) -> Result<&Rc<B>> {
        let node = self.get_node(index)?;
        Ok(&self.nodes[node.slot].block)
    }

    /// Get the block referenced by `node`
    pub fn block_of(&self, node: NodeRef) -> Result<&Rc<B>> {
        let slot = self.resolve(node)?;
        Ok(&self.nodes[slot].block)
    }

    /// Get the successor of `node`, `None` for the tail
    pub fn next_of(&self, node: NodeRef) -> Result<Option<NodeRef>> {
        let slot = self.resolve(node)?;
        Ok(self.nodes[slot].next.map(|next| self.handle(next)))
    }

    /// Position of the first node referencing `block` (identity comparison)
    pub fn index_of(&self, block: &Rc<B>) -> Option<usize> {
        self.iter().position(|candidate| Rc::ptr_eq(candidate, block))
    }

    /// Check whether some node references `block`
    pub fn contains(&self, block: &Rc<B>) -> bool {
        self.index_of(block).is_some()
    }

    /// Insert `block` before the node currently at `index`
    ///
    /// `index == size` appends and `index == 0` prepends, both in O(1).
    /// Any other position walks to the predecessor. Fails with
    /// `InvalidIndex` if `index > size`.
    pub fn add(&mut self, index: usize, block: Rc<B>) -> Result<NodeRef> {
        if index > self.size {
            return Err(self.reject("add", self.invalid_index(index)));
        }
        if index == self.size {
            return Ok(self.add_last(block));
        }
        if index == 0 {
            return Ok(self.add_first(block));
        }

        let prev = self.slot_at(index - 1).ok_or_else(|| self.broken_chain())?;
        let slot = self.nodes.insert(Node::new(block));
        self.nodes[slot].next = self.nodes[prev].next;
        self.nodes[prev].next = Some(slot);
        self.size += 1;

        trace!(index, size = self.size, "add");
        self.after_mutation("add");
        Ok(self.handle(slot))
    }

    /// Append `block` after the tail
    pub fn add_last(&mut self, block: Rc<B>) -> NodeRef {
        let slot = self.nodes.insert(Node::new(block));
        match self.last {
            Some(last) => self.nodes[last].next = Some(slot),
            None => self.first = Some(slot),
        }
        self.last = Some(slot);
        self.size += 1;

        trace!(size = self.size, "add_last");
        self.after_mutation("add_last");
        self.handle(slot)
    }

    /// Prepend `block` before the head
    pub fn add_first(&mut self, block: Rc<B>) -> NodeRef {
        let mut node = Node::new(block);
        node.next = self.first;
        let slot = self.nodes.insert(node);
        self.first = Some(slot);
        if self.last.is_none() {
            self.last = Some(slot);
        }
        self.size += 1;

        trace!(size = self.size, "add_first");
        self.after_mutation("add_first");
        self.handle(slot)
    }

    /// Unlink the head and return its block
    ///
    /// Fails with `EmptyList` without touching the list if there is no head.
    pub fn remove_first(&mut self) -> Result<Rc<B>> {
        let head = match self.first {
            Some(head) => head,
            None => return Err(self.reject("remove_first", ListError::EmptyList)),
        };

        let node = self.nodes.remove(head);
        self.first = node.next;
        if self.first.is_none() {
            self.last = None;
        }
        self.size -= 1;

        trace!(size = self.size, "remove_first");
        self.after_mutation("remove_first");
        Ok(node.block)
    }

    /// Unlink the tail and return its block
    ///
    /// Walks to the tail's predecessor, so this is O(n).
    pub fn remove_last(&mut self) -> Result<Rc<B>> {
        let tail = match self.last {
            Some(tail) => tail,
            None => return Err(self.reject("remove_last", ListError::EmptyList)),
        };
        if self.size == 1 {
            return Ok(self.unlink_sole(tail));
        }

        let prev = self
            .slot_at(self.size - 2)
            .filter(|&prev| self.nodes[prev].next == Some(tail))
            .ok_or_else(|| self.broken_chain())?;
        self.nodes[prev].next = None;
        self.last = Some(prev);
        let node = self.nodes.remove(tail);
        self.size -= 1;

        trace!(size = self.size, "remove_last");
        self.after_mutation("remove_last");
        Ok(node.block)
    }

    /// Unlink `node` and return its block
    ///
    /// Fails with `EmptyList` on an empty list and with `NullReference` if
    /// the handle is stale or belongs to another list.
    pub fn remove_node(&mut self, node: NodeRef) -> Result<Rc<B>> {
        if self.is_empty() {
            return Err(self.reject("remove_node", ListError::EmptyList));
        }
        let slot = match self.resolve(node) {
            Ok(slot) => slot,
            Err(err) => return Err(self.reject("remove_node", err)),
        };

        match self.placement(slot) {
            Placement::Sole => Ok(self.unlink_sole(slot)),
            Placement::Head => self.remove_first(),
            Placement::Tail => self.remove_last(),
            Placement::Interior => self.unlink_interior(slot),
        }
    }

    /// Remove the node at `index` and return its block
    pub fn remove(&mut self, index: usize) -> Result<Rc<B>> {
        if index > self.size {
            return Err(self.reject("remove", self.invalid_index(index)));
        }
        if self.is_empty() {
            return Err(self.reject("remove", ListError::EmptyList));
        }
        let node = self.get_node(index)?;
        self.remove_node(node)
    }

    /// Remove the node referencing `block` (identity comparison)
    pub fn remove_block(&mut self, block: &Rc<B>) -> Result<Rc<B>> {
        let index = match self.index_of(block) {
            Some(index) => index,
            None => return Err(self.reject("remove_block", ListError::NotFound)),
        };
        let node = self.get_node(index)?;
        self.remove_node(node)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.first = None;
        self.last = None;
        self.size = 0;
        trace!("clear");
    }

    /// Cursor positioned before the first node
    pub fn iter(&self) -> ListIterator<'_, B> {
        ListIterator::new(self)
    }

    /// Check the structural invariants
    ///
    /// - `size == 0` iff there is no head iff there is no tail
    /// - following `next` from the head ends after exactly `size` steps
    /// - the last node reached is the cached tail
    pub fn validate(&self) -> Result<()> {
        if self.nodes.len() != self.size {
            return Err(ListError::Corrupted(format!(
                "{} stored nodes but size is {}",
                self.nodes.len(),
                self.size
            )));
        }
        match (self.first, self.last, self.size) {
            (None, None, 0) => {}
            (Some(_), Some(_), size) if size > 0 => {}
            _ => {
                return Err(ListError::Corrupted(
                    "head/tail presence disagrees with size".to_string(),
                ))
            }
        }

        let mut steps = 0;
        let mut reached = None;
        let mut cursor = self.first;
        while let Some(slot) = cursor {
            if steps == self.size {
                return Err(ListError::Corrupted(format!(
                    "chain longer than size {} (cycle?)",
                    self.size
                )));
            }
            let node = self.nodes.get(slot).ok_or_else(|| {
                ListError::Corrupted(format!("link to vacant slot {}", slot))
            })?;
            reached = Some(slot);
            cursor = node.next;
            steps += 1;
        }

        if steps != self.size {
            return Err(ListError::Corrupted(format!(
                "chain has {} nodes but size is {}",
                steps, self.size
            )));
        }
        if reached != self.last {
            return Err(ListError::Corrupted(
                "cached tail is not the last node of the chain".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    fn handle(&self, slot: usize) -> NodeRef {
        NodeRef::new(slot, self.nodes[slot].stamp)
    }

    fn resolve(&self, node: NodeRef) -> Result<usize> {
        match self.nodes.get(node.slot) {
            Some(cell) if cell.stamp == node.stamp => Ok(node.slot),
            _ => Err(ListError::NullReference),
        }
    }

    fn slot_at(&self, index: usize) -> Option<usize> {
        let mut slot = self.first;
        for _ in 0..index {
            slot = self.nodes.get(slot?)?.next;
        }
        slot
    }

    fn placement(&self, slot: usize) -> Placement {
        match (self.first == Some(slot), self.last == Some(slot)) {
            (true, true) => Placement::Sole,
            (true, false) => Placement::Head,
            (false, true) => Placement::Tail,
            (false, false) => Placement::Interior,
        }
    }

    fn unlink_sole(&mut self, slot: usize) -> Rc<B> {
        let node = self.nodes.remove(slot);
        self.first = None;
        self.last = None;
        self.size = 0;

        trace!(size = self.size, "remove sole node");
        self.after_mutation("remove_sole");
        node.block
    }

    fn unlink_interior(&mut self, slot: usize) -> Result<Rc<B>> {
        let mut cursor = self.first;
        while let Some(current) = cursor {
            let next = self.nodes[current].next;
            if next == Some(slot) {
                self.nodes[current].next = self.nodes[slot].next;
                let node = self.nodes.remove(slot);
                self.size -= 1;

                trace!(size = self.size, "remove interior node");
                self.after_mutation("remove_interior");
                return Ok(node.block);
            }
            cursor = next;
        }
        Err(self.broken_chain())
    }

    fn invalid_index(&self, index: usize) -> ListError {
        ListError::InvalidIndex {
            index,
            size: self.size,
        }
    }

    fn broken_chain(&self) -> ListError {
        let err = ListError::Corrupted("chain shorter than size".to_string());
        error!(size = self.size, %err, "traversal fell off the chain");
        err
    }

    fn reject(&self, op: &'static str, err: ListError) -> ListError {
        debug!(op, size = self.size, %err, "operation rejected");
        err
    }

    fn after_mutation(&self, op: &'static str) {
        if !self.check_invariants {
            return;
        }
        if let Err(err) = self.validate() {
            error!(op, %err, "invariant check failed");
            if cfg!(debug_assertions) {
                panic!("{} left the list inconsistent: {}", op, err);
            }
        }
    }
}

impl<B: fmt::Display> fmt::Display for LinkedList<B> {
    /// Every block's textual form followed by a single space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in self.iter() {
            write!(f, "{} ", block)?;
        }
        Ok(())
    }
}

impl<B: fmt::Debug> fmt::Debug for LinkedList<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<B> FromIterator<Rc<B>> for LinkedList<B> {
    fn from_iter<I: IntoIterator<Item = Rc<B>>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<B> Extend<Rc<B>> for LinkedList<B> {
    fn extend<I: IntoIterator<Item = Rc<B>>>(&mut self, iter: I) {
        for block in iter {
            self.add_last(block);
        }
    }
}

impl<'a, B> IntoIterator for &'a LinkedList<B> {
    type Item = &'a Rc<B>;
    type IntoIter = ListIterator<'a, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
