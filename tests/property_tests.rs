//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the heap invariants are always maintained.

use meldable_heaps::fibonacci::FibonacciHeap;
use meldable_heaps::pairing::PairingHeap;
use meldable_heaps::{PriorityQueue, TrackedQueue};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    ExtractMax,
    Increase(usize, i32),
    Decrease(usize, i32),
    Remove(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(Op::Insert),
        2 => Just(Op::ExtractMax),
        1 => (any::<usize>(), 0i32..500).prop_map(|(i, d)| Op::Increase(i, d)),
        1 => (any::<usize>(), 0i32..500).prop_map(|(i, d)| Op::Decrease(i, d)),
        1 => any::<usize>().prop_map(Op::Remove),
    ]
}

/// Runs `ops` against a heap and a plain vector model, checking `max` after each step
fn check_against_model<H, F>(ops: Vec<Op>, mut check: F) -> Result<(), TestCaseError>
where
    H: TrackedQueue<i32> + Default,
    F: FnMut(&H) -> Result<(), TestCaseError>,
{
    let mut heap = H::default();
    // (tracker, current value) for every live element
    let mut live = Vec::new();

    for op in ops {
        match op {
            Op::Insert(x) => live.push((heap.insert(x), x)),
            Op::ExtractMax => {
                if let Ok(x) = heap.extract_max() {
                    let pos = live.iter().position(|&(_, v)| v == x);
                    prop_assert!(pos.is_some(), "extracted {} which was never live", x);
                    let (tracker, _) = live.swap_remove(pos.unwrap_or_default());
                    // Duplicates may leave the extracted tracker alive; swap the
                    // model entry for whichever equal tracker actually died.
                    if heap.in_collection(&tracker) {
                        let dead = live
                            .iter()
                            .position(|&(t, v)| v == x && !heap.in_collection(&t));
                        prop_assert!(dead.is_some());
                        let idx = dead.unwrap_or_default();
                        live[idx].0 = tracker;
                    }
                } else {
                    prop_assert!(live.is_empty());
                }
            }
            Op::Increase(i, delta) if !live.is_empty() => {
                let idx = i % live.len();
                let (tracker, value) = live[idx];
                heap.increase_priority(&tracker, value + delta).unwrap();
                live[idx].1 = value + delta;
            }
            Op::Decrease(i, delta) if !live.is_empty() => {
                let idx = i % live.len();
                let (tracker, value) = live[idx];
                heap.decrease_priority(&tracker, value - delta).unwrap();
                live[idx].1 = value - delta;
            }
            Op::Remove(i) if !live.is_empty() => {
                let idx = i % live.len();
                let (tracker, value) = live.swap_remove(idx);
                prop_assert_eq!(heap.remove(&tracker), Ok(value));
            }
            _ => {}
        }

        prop_assert_eq!(heap.len(), live.len());
        prop_assert_eq!(heap.max().ok().copied(), live.iter().map(|&(_, v)| v).max());
        for &(tracker, value) in &live {
            prop_assert_eq!(heap.get(&tracker), Ok(&value));
        }
        check(&heap)?;
    }

    Ok(())
}

/// Test that extracting everything yields the input sorted in descending order
fn test_heap_sort<H: PriorityQueue<i32> + Default>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = H::default();
    for &v in &values {
        heap.push(v);
    }

    let mut drained = Vec::with_capacity(values.len());
    while !heap.is_empty() {
        let before = heap.len();
        drained.push(heap.extract_max().unwrap());
        prop_assert_eq!(heap.len(), before - 1);
    }

    let mut expected = values;
    expected.sort_unstable_by(|a, b| b.cmp(a));
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Test meld keeps every element of both heaps
fn test_meld_invariant<H: PriorityQueue<i32> + Default>(
    heap1_values: Vec<i32>,
    heap2_values: Vec<i32>,
) -> Result<(), TestCaseError> {
    let mut heap1 = H::default();
    let mut heap2 = H::default();
    for &v in &heap1_values {
        heap1.push(v);
    }
    for &v in &heap2_values {
        heap2.push(v);
    }

    let expected_max = heap1_values.iter().chain(&heap2_values).max().copied();
    heap1.meld(heap2);

    prop_assert_eq!(heap1.max().ok().copied(), expected_max);
    prop_assert_eq!(heap1.len(), heap1_values.len() + heap2_values.len());
    Ok(())
}

/// Degree bound ⌊log_φ n⌋ + 1 for a Fibonacci heap of n live elements
fn fibonacci_degree_bound(n: usize) -> usize {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    if n == 0 {
        0
    } else {
        ((n as f64).ln() / phi.ln()).floor() as usize + 1
    }
}

proptest! {
    #[test]
    fn test_pairing_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model::<PairingHeap<i32>, _>(ops, |heap| {
            prop_assert!(heap.verify_structure());
            Ok(())
        })?;
    }

    #[test]
    fn test_fibonacci_matches_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        check_against_model::<FibonacciHeap<i32>, _>(ops, |heap| {
            prop_assert!(heap.verify_structure());
            prop_assert!(
                heap.max_degree() <= fibonacci_degree_bound(heap.len()),
                "degree {} exceeds bound for {} elements",
                heap.max_degree(),
                heap.len()
            );
            Ok(())
        })?;
    }

    #[test]
    fn test_pairing_heap_sort(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_heap_sort::<PairingHeap<i32>>(values)?;
    }

    #[test]
    fn test_fibonacci_heap_sort(values in prop::collection::vec(-100i32..100, 0..200)) {
        test_heap_sort::<FibonacciHeap<i32>>(values)?;
    }

    #[test]
    fn test_pairing_meld_invariant(
        heap1 in prop::collection::vec(-100i32..100, 0..50),
        heap2 in prop::collection::vec(-100i32..100, 0..50)
    ) {
        test_meld_invariant::<PairingHeap<i32>>(heap1, heap2)?;
    }

    #[test]
    fn test_fibonacci_meld_invariant(
        heap1 in prop::collection::vec(-100i32..100, 0..50),
        heap2 in prop::collection::vec(-100i32..100, 0..50)
    ) {
        test_meld_invariant::<FibonacciHeap<i32>>(heap1, heap2)?;
    }

    #[test]
    fn test_tracker_walk_skips_removed(
        values in prop::collection::vec(-100i32..100, 1..60),
        removals in prop::collection::vec(any::<bool>(), 1..60)
    ) {
        let mut heap = FibonacciHeap::new();
        let trackers: Vec<_> = values.iter().map(|&v| heap.insert(v)).collect();

        let mut expected = Vec::new();
        for (i, (&v, tracker)) in values.iter().zip(&trackers).enumerate() {
            if removals.get(i).copied().unwrap_or(false) {
                heap.remove(tracker).unwrap();
            } else {
                expected.push(v);
            }
        }

        // Start from every removed position and check where advancing lands
        for (i, tracker) in trackers.iter().enumerate() {
            if heap.in_collection(tracker) {
                continue;
            }
            let mut cursor = *tracker;
            let next_live = values[i + 1..]
                .iter()
                .zip(&trackers[i + 1..])
                .find(|(_, t)| heap.in_collection(t))
                .map(|(v, _)| *v);
            let moved = heap.advance(&mut cursor).unwrap();
            prop_assert_eq!(moved, next_live.is_some());
            prop_assert_eq!(heap.get(&cursor).ok().copied(), next_live);
        }

        let mut cursor = heap.tracker();
        let mut seen = Vec::new();
        while heap.advance(&mut cursor).unwrap() {
            seen.push(*heap.get(&cursor).unwrap());
        }
        prop_assert_eq!(seen, expected);
    }
}
