//! Shared helpers for list tests

#![allow(dead_code)]

use std::rc::Rc;

use block_list::{LinkedList, ListConfig, MemoryBlock};

/// Blocks laid out back to back, `length` addresses each
pub fn contiguous_blocks(count: usize, length: usize) -> Vec<Rc<MemoryBlock>> {
    (0..count)
        .map(|i| Rc::new(MemoryBlock::new(i * length, length)))
        .collect()
}

/// List built by appending `blocks` in order, with invariant checks on
pub fn list_of(blocks: &[Rc<MemoryBlock>]) -> LinkedList<MemoryBlock> {
    let mut list = LinkedList::with_config(ListConfig::default().check_invariants(true));
    list.extend(blocks.iter().cloned());
    list
}

/// Identity-wise comparison of the list contents against `expected`
pub fn assert_order(list: &LinkedList<MemoryBlock>, expected: &[&Rc<MemoryBlock>]) {
    let actual: Vec<&Rc<MemoryBlock>> = list.iter().collect();
    assert_eq!(actual.len(), expected.len(), "length mismatch: {:?}", list);
    for (position, (got, want)) in actual.iter().zip(expected).enumerate() {
        assert!(
            Rc::ptr_eq(got, want),
            "position {}: expected {} got {}",
            position,
            want,
            got
        );
    }
    assert_eq!(list.get_size(), expected.len());
    list.validate().expect("invariants hold");
}
