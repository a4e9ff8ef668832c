//! Behavioural scenarios for the block list

mod common;

use std::rc::Rc;

use block_list::{LinkedList, ListError, MemoryBlock};
use common::{assert_order, contiguous_blocks, list_of};
use test_case::test_case;

#[test]
fn append_renders_with_trailing_separator() {
    let blocks = contiguous_blocks(3, 10);
    let list = list_of(&blocks);
    assert_eq!(list.to_string(), "(0 , 10) (10 , 10) (20 , 10) ");
    // Rendering again walks the chain again
    assert_eq!(list.to_string(), "(0 , 10) (10 , 10) (20 , 10) ");
}

#[test]
fn add_first_becomes_head() {
    let blocks = contiguous_blocks(2, 8);
    let mut list = list_of(&blocks);
    let x = Rc::new(MemoryBlock::new(500, 1));

    let node = list.add_first(Rc::clone(&x));

    assert_eq!(list.get_first(), Some(node));
    assert!(Rc::ptr_eq(list.block_of(node).unwrap(), &x));
    assert_order(&list, &[&x, &blocks[0], &blocks[1]]);
}

#[test]
fn add_in_the_middle() {
    let blocks = contiguous_blocks(3, 8);
    let mut list = list_of(&blocks);
    let y = Rc::new(MemoryBlock::new(900, 4));

    list.add(1, Rc::clone(&y)).unwrap();

    let node = list.get_node(1).unwrap();
    assert!(Rc::ptr_eq(list.block_of(node).unwrap(), &y));
    assert_order(&list, &[&blocks[0], &y, &blocks[1], &blocks[2]]);
}

#[test_case(0, &[1, 2] ; "head")]
#[test_case(1, &[0, 2] ; "interior")]
#[test_case(2, &[0, 1] ; "tail")]
fn remove_by_index(index: usize, survivors: &[usize]) {
    let blocks = contiguous_blocks(3, 4);
    let mut list = list_of(&blocks);

    let removed = list.remove(index).unwrap();

    assert!(Rc::ptr_eq(&removed, &blocks[index]));
    let expected: Vec<&Rc<MemoryBlock>> = survivors.iter().map(|&i| &blocks[i]).collect();
    assert_order(&list, &expected);
}

#[test_case(3, 5 ; "well past the end")]
#[test_case(3, 3 ; "index equal to size")]
#[test_case(0, 0 ; "empty list")]
fn get_node_out_of_range(size: usize, index: usize) {
    let list = list_of(&contiguous_blocks(size, 1));
    assert_eq!(
        list.get_node(index),
        Err(ListError::InvalidIndex { index, size })
    );
    assert!(list.get_block(index).is_err());
}

#[test_case(0, 1 ; "beyond empty list")]
#[test_case(2, 3 ; "beyond populated list")]
fn add_out_of_range(size: usize, index: usize) {
    let mut list = list_of(&contiguous_blocks(size, 1));
    let err = list.add(index, Rc::new(MemoryBlock::new(0, 1))).unwrap_err();
    assert_eq!(err, ListError::InvalidIndex { index, size });
    assert_eq!(list.get_size(), size);
}

#[test]
fn add_at_size_appends() {
    let blocks = contiguous_blocks(2, 2);
    let mut list = list_of(&blocks);
    let z = Rc::new(MemoryBlock::new(77, 7));
    let node = list.add(2, Rc::clone(&z)).unwrap();
    assert_eq!(list.get_last(), Some(node));
    assert_order(&list, &[&blocks[0], &blocks[1], &z]);
}

#[test]
fn removals_on_empty_list_fail_cleanly() {
    let mut list: LinkedList<MemoryBlock> = LinkedList::new();
    assert_eq!(list.remove_first(), Err(ListError::EmptyList));
    assert_eq!(list.remove_last(), Err(ListError::EmptyList));
    assert_eq!(list.remove(0), Err(ListError::EmptyList));
    assert_eq!(
        list.remove(1),
        Err(ListError::InvalidIndex { index: 1, size: 0 })
    );
    assert_eq!(list.get_size(), 0);
    assert!(list.get_first().is_none());
    assert!(list.get_last().is_none());
}

#[test]
fn remove_index_equal_to_size_rejected() {
    let mut list = list_of(&contiguous_blocks(2, 1));
    assert_eq!(
        list.remove(2),
        Err(ListError::InvalidIndex { index: 2, size: 2 })
    );
    assert_eq!(list.get_size(), 2);
}

#[test]
fn remove_absent_block_is_not_found() {
    let blocks = contiguous_blocks(2, 1);
    let mut list = list_of(&blocks);
    let lookalike = Rc::new(MemoryBlock::new(0, 1));
    assert_eq!(*lookalike, *blocks[0]);
    assert_eq!(list.index_of(&lookalike), None);
    assert_eq!(list.remove_block(&lookalike), Err(ListError::NotFound));
    assert_order(&list, &[&blocks[0], &blocks[1]]);
}

#[test]
fn index_of_after_append_is_last_position() {
    let blocks = contiguous_blocks(4, 3);
    let mut list = list_of(&blocks[..3]);
    list.add_last(Rc::clone(&blocks[3]));
    assert_eq!(list.index_of(&blocks[3]), Some(list.get_size() - 1));
    assert!(list.contains(&blocks[3]));
}

#[test]
fn node_handles_walk_the_chain() {
    let blocks = contiguous_blocks(3, 5);
    let list = list_of(&blocks);
    let mut node = list.get_first();
    let mut seen = Vec::new();
    while let Some(current) = node {
        seen.push(Rc::clone(list.block_of(current).unwrap()));
        node = list.next_of(current).unwrap();
    }
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().zip(&blocks).all(|(a, b)| Rc::ptr_eq(a, b)));
}

#[test]
fn drain_each_way_leaves_empty_list() {
    let blocks = contiguous_blocks(6, 2);

    let mut by_head = list_of(&blocks);
    while by_head.remove_first().is_ok() {}

    let mut by_tail = list_of(&blocks);
    while by_tail.remove_last().is_ok() {}

    let mut by_block = list_of(&blocks);
    for block in &blocks {
        by_block.remove_block(block).unwrap();
    }

    let mut by_node = list_of(&blocks);
    while let Some(node) = by_node.get_last() {
        by_node.remove_node(node).unwrap();
    }

    for list in [&by_head, &by_tail, &by_block, &by_node] {
        assert_eq!(list.get_size(), 0);
        assert!(list.get_first().is_none());
        assert!(list.get_last().is_none());
        list.validate().expect("empty list is consistent");
    }
}

#[test]
fn iterator_next_block_fails_past_end() {
    let blocks = contiguous_blocks(1, 1);
    let list = list_of(&blocks);
    let mut itr = list.iter();
    assert!(itr.has_next());
    assert!(Rc::ptr_eq(itr.next_block().unwrap(), &blocks[0]));
    assert!(!itr.has_next());
    assert_eq!(itr.next_block(), Err(ListError::Exhausted));
}
