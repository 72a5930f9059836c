//! Model-based checks: every operation sequence must leave the ring buffer
//! holding exactly what a `VecDeque` would.

use std::collections::VecDeque;

use proptest::prelude::*;
use replay_ring::{ByteRingBuffer, RingBuffer, RingError};

#[derive(Debug, Clone)]
enum Op {
    PushBack(i32),
    PushFront(i32),
    PopBack,
    PopFront,
    Insert(usize, i32),
    Erase(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i32>().prop_map(Op::PushBack),
        3 => any::<i32>().prop_map(Op::PushFront),
        2 => Just(Op::PopBack),
        2 => Just(Op::PopFront),
        2 => (0usize..40, any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => (0usize..40).prop_map(Op::Erase),
        1 => Just(Op::Clear),
    ]
}

fn assert_invariants<T>(ring: &RingBuffer<T>) {
    assert!(ring.capacity().is_power_of_two());
    assert!(ring.len() < ring.capacity());
    assert_eq!(ring.is_empty(), ring.len() == 0);
    assert_eq!(ring.is_full(), ring.len() == ring.capacity() - 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_matches_vecdeque(ops in prop::collection::vec(op(), 1..300)) {
        let mut ring = RingBuffer::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    ring.push_back(v).unwrap();
                    model.push_back(v);
                }
                Op::PushFront(v) => {
                    ring.push_front(v).unwrap();
                    model.push_front(v);
                }
                Op::PopBack => {
                    prop_assert_eq!(ring.pop_back(), model.pop_back());
                }
                Op::PopFront => {
                    prop_assert_eq!(ring.pop_front(), model.pop_front());
                }
                Op::Insert(i, v) => {
                    let result = ring.insert_at(i, v);
                    if i <= model.len() {
                        prop_assert!(result.is_ok());
                        model.insert(i, v);
                    } else {
                        prop_assert_eq!(result, Err(RingError::InvalidIndex { index: i, len: model.len() }));
                    }
                }
                Op::Erase(i) => {
                    let result = ring.erase_at(i);
                    match model.remove(i) {
                        Some(expected) => {
                            prop_assert_eq!(result, Ok(expected));
                        }
                        None => {
                            prop_assert!(result.is_err());
                        }
                    }
                }
                Op::Clear => {
                    ring.clear();
                    model.clear();
                }
            }

            assert_invariants(&ring);
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.peek_front(), model.front());
            prop_assert_eq!(ring.peek_back(), model.back());
        }

        prop_assert!(ring.iter().eq(model.iter()));
        prop_assert!(ring.iter().rev().eq(model.iter().rev()));
    }

    #[test]
    fn prop_fifo(values in prop::collection::vec(any::<u64>(), 0..200)) {
        let mut ring = RingBuffer::new();
        for v in &values {
            ring.push_back(*v).unwrap();
        }
        let drained: Vec<_> = std::iter::from_fn(|| ring.pop_front()).collect();
        prop_assert_eq!(drained, values);
        prop_assert!(ring.is_empty());
    }

    #[test]
    fn prop_lifo(values in prop::collection::vec(any::<u64>(), 0..200)) {
        let mut ring = RingBuffer::new();
        for v in &values {
            ring.push_back(*v).unwrap();
        }
        let drained: Vec<_> = std::iter::from_fn(|| ring.pop_back()).collect();
        let expected: Vec<_> = values.iter().rev().copied().collect();
        prop_assert_eq!(drained, expected);
    }

    #[test]
    fn prop_push_front_pop_front_restores(
        values in prop::collection::vec(any::<i16>(), 0..50),
        extra in any::<i16>(),
    ) {
        let mut ring = RingBuffer::new();
        for v in &values {
            ring.push_back(*v).unwrap();
        }
        let len = ring.len();

        ring.push_front(extra).unwrap();
        prop_assert_eq!(ring.pop_front(), Some(extra));
        prop_assert_eq!(ring.len(), len);
        prop_assert_eq!(ring.to_vec(), values);
    }

    #[test]
    fn prop_insert_then_erase_is_identity(
        values in prop::collection::vec(any::<i32>(), 0..60),
        rotate in 0usize..64,
        index in any::<prop::sample::Index>(),
        value in any::<i32>(),
    ) {
        // Rotate first so the contents start anywhere in storage.
        let mut ring = RingBuffer::with_capacity(64).unwrap();
        for _ in 0..rotate {
            ring.push_back(0).unwrap();
            ring.pop_front();
        }
        for v in &values {
            ring.push_back(*v).unwrap();
        }
        let i = index.index(values.len() + 1);

        ring.insert_at(i, value).unwrap();
        prop_assert_eq!(ring.peek_at(i), Some(&value));
        prop_assert_eq!(ring.erase_at(i), Ok(value));
        prop_assert_eq!(ring.to_vec(), values);
    }

    #[test]
    fn prop_growth_preserves_order(
        rotate in 0usize..16,
        values in prop::collection::vec(any::<u8>(), 1..16),
    ) {
        let mut ring = RingBuffer::with_capacity(16).unwrap();
        for _ in 0..rotate {
            ring.push_back(0).unwrap();
            ring.pop_front();
        }
        for v in &values {
            ring.push_back(*v).unwrap();
        }
        let before = ring.to_vec();

        ring.grow_to(64).unwrap();

        prop_assert_eq!(ring.capacity(), 64);
        prop_assert_eq!(ring.to_vec(), before);
    }

    #[test]
    fn prop_byte_ring_matches_typed_ring(ops in prop::collection::vec(op(), 1..200)) {
        let mut bytes = ByteRingBuffer::new(4).unwrap();
        let mut typed = RingBuffer::new();

        for op in ops {
            match op {
                Op::PushBack(v) => {
                    bytes.push_back(&v.to_le_bytes()).unwrap();
                    typed.push_back(v).unwrap();
                }
                Op::PushFront(v) => {
                    bytes.push_front(&v.to_le_bytes()).unwrap();
                    typed.push_front(v).unwrap();
                }
                Op::PopBack => {
                    let popped = bytes.pop_back().map(|b| b.to_vec());
                    prop_assert_eq!(popped, typed.pop_back().map(|v| v.to_le_bytes().to_vec()));
                }
                Op::PopFront => {
                    let popped = bytes.pop_front().map(|b| b.to_vec());
                    prop_assert_eq!(popped, typed.pop_front().map(|v| v.to_le_bytes().to_vec()));
                }
                Op::Insert(i, v) => {
                    prop_assert_eq!(
                        bytes.insert_at(i, &v.to_le_bytes()).is_ok(),
                        typed.insert_at(i, v).is_ok()
                    );
                }
                Op::Erase(i) => {
                    prop_assert_eq!(bytes.erase_at(i).is_ok(), typed.erase_at(i).is_ok());
                }
                Op::Clear => {
                    bytes.clear();
                    typed.clear();
                }
            }
            prop_assert_eq!(bytes.len(), typed.len());
            prop_assert_eq!(bytes.capacity(), typed.capacity());
        }

        let decoded: Vec<i32> = bytes
            .iter()
            .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        prop_assert_eq!(decoded, typed.to_vec());
    }
}
