//! Priority orders
//!
//! A heap ranks its elements with a [`Comparator`]. `Ordering::Greater` means
//! "higher priority": the heap's `max` is the element that compares greatest.
//!
//! - [`NaturalOrder`] uses `Ord` directly (a max-heap over the values)
//! - [`ReverseOrder`] flips `Ord` (a min-heap over the values)
//! - any `Fn(&E, &E) -> Ordering` closure is a comparator too
//!
//! # Example
//!
//! ```rust
//! use meldable_heaps::compare::ReverseOrder;
//! use meldable_heaps::pairing::PairingHeap;
//! use meldable_heaps::PriorityQueue;
//!
//! let mut heap = PairingHeap::with_comparator(ReverseOrder);
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//! assert_eq!(heap.max(), Ok(&1));
//! ```

use std::cmp::Ordering;

/// Three-way comparison defining the priority of heap elements.
pub trait Comparator<E> {
    /// Compares `a` with `b`; `Greater` means `a` has the higher priority.
    fn compare(&self, a: &E, b: &E) -> Ordering;
}

impl<E, F> Comparator<E> for F
where
    F: Fn(&E, &E) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &E, b: &E) -> Ordering {
        self(a, b)
    }
}

/// Orders elements by `Ord`: the largest value has the highest priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<E: Ord> Comparator<E> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &E, b: &E) -> Ordering {
        a.cmp(b)
    }
}

/// Orders elements by reversed `Ord`: the smallest value has the highest priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<E: Ord> Comparator<E> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &E, b: &E) -> Ordering {
        b.cmp(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_and_reverse() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
        assert_eq!(ReverseOrder.compare(&7, &7), Ordering::Equal);
    }

    #[test]
    fn test_closure_comparator() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"abc", &"z"), Ordering::Greater);
    }
}
