//! Common traits for meldable priority queues
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`PriorityQueue`]: Base trait with `push`, `max`, `extract_max`, `meld` and
//!   the linear-time equivalence queries
//! - [`TrackedQueue`]: Extended trait adding [`Tracker`] handles, which locate an
//!   element for later removal or priority changes and walk every element in
//!   insertion order
//!
//! Both [`PairingHeap`](crate::pairing::PairingHeap) and
//! [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) implement both traits.

use crate::tracker::Tracker;
use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `max` or `extract_max` on an empty heap
    EmptyCollection,
    /// The tracker is not at a live element, or no equivalent element exists
    NoSuchElement,
    /// A priority change moved in the wrong direction
    PreconditionViolation,
    /// The tracker was issued by another heap, or its tombstone was purged
    InvalidTracker,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyCollection => write!(f, "heap is empty"),
            HeapError::NoSuchElement => {
                write!(f, "no such element (tracker is not at a live element)")
            }
            HeapError::PreconditionViolation => {
                write!(f, "new priority does not move in the requested direction")
            }
            HeapError::InvalidTracker => {
                write!(f, "tracker does not belong to this heap or was purged")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for meldable max-priority queues
///
/// Priority is defined by the heap's [`Comparator`](crate::compare::Comparator):
/// `max` is an element that compares greatest. Elements that compare equal are
/// kept side by side, never merged.
///
/// # Example
///
/// ```rust
/// use meldable_heaps::PriorityQueue;
/// use meldable_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3);
/// heap.push(7);
/// heap.push(5);
///
/// assert_eq!(heap.max(), Ok(&7));
/// assert_eq!(heap.extract_max(), Ok(7));
/// assert_eq!(heap.len(), 2);
/// ```
pub trait PriorityQueue<E> {
    /// Returns the number of live elements
    fn len(&self) -> usize;

    /// Returns true if the heap holds no live elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element, discarding its tracker
    ///
    /// # Time Complexity
    /// O(1)
    fn push(&mut self, element: E);

    /// Returns a highest-priority element
    ///
    /// # Errors
    /// [`HeapError::EmptyCollection`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(1)
    fn max(&self) -> Result<&E, HeapError>;

    /// Removes and returns a highest-priority element
    ///
    /// # Errors
    /// [`HeapError::EmptyCollection`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn extract_max(&mut self) -> Result<E, HeapError>;

    /// Returns true if some live element compares equal to `element`
    ///
    /// # Time Complexity
    /// O(number of elements ever inserted since the last purge)
    fn contains(&self, element: &E) -> bool {
        self.get_equivalent(element).is_ok()
    }

    /// Returns the first live element, in insertion order, that compares equal to `element`
    ///
    /// # Errors
    /// [`HeapError::NoSuchElement`] if there is none.
    fn get_equivalent(&self, element: &E) -> Result<&E, HeapError>;

    /// Removes the first live element that compares equal to `element`
    ///
    /// Returns true if one was found and removed.
    fn remove_equivalent(&mut self, element: &E) -> bool;

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Trackers issued by `other` become invalid.
    fn meld(&mut self, other: Self)
    where
        Self: Sized;

    /// Removes every element
    ///
    /// All outstanding trackers become invalid.
    fn clear(&mut self);
}

/// Extended heap trait with [`Tracker`] support
///
/// A tracker is returned by [`insert`](Self::insert) and stays bound to that
/// element however the heap restructures itself. It can also be used as a
/// cursor over all elements in insertion order: a tracker whose element was
/// removed still knows where it was, and advancing it reaches the next live
/// element.
///
/// # Example
///
/// ```rust
/// use meldable_heaps::{PriorityQueue, TrackedQueue};
/// use meldable_heaps::pairing::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// let low = heap.insert(2);
/// heap.insert(10);
///
/// heap.increase_priority(&low, 25).unwrap();
/// assert_eq!(heap.max(), Ok(&25));
///
/// assert_eq!(heap.remove(&low), Ok(25));
/// assert!(!heap.in_collection(&low));
/// ```
pub trait TrackedQueue<E>: PriorityQueue<E> {
    /// Inserts an element and returns a tracker bound to it
    ///
    /// # Time Complexity
    /// O(1)
    fn insert(&mut self, element: E) -> Tracker;

    /// Returns a tracker positioned before the first element
    fn tracker(&self) -> Tracker;

    /// Returns a tracker positioned at the first live element that compares equal to `element`
    ///
    /// # Errors
    /// [`HeapError::NoSuchElement`] if there is none.
    fn locator_for(&self, element: &E) -> Result<Tracker, HeapError>;

    /// Moves the tracker to the next live element in insertion order
    ///
    /// Returns `Ok(true)` if the tracker is now at a live element and
    /// `Ok(false)` if it reached the after-last position (where it stays).
    ///
    /// # Errors
    /// [`HeapError::InvalidTracker`] if the tracker does not belong to this heap.
    fn advance(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError>;

    /// Moves the tracker to the previous live element in insertion order
    ///
    /// Returns `Ok(true)` if the tracker is now at a live element and
    /// `Ok(false)` if it reached the before-first position (where it stays).
    ///
    /// # Errors
    /// [`HeapError::InvalidTracker`] if the tracker does not belong to this heap.
    fn retreat(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError>;

    /// Returns the tracked element
    ///
    /// # Errors
    /// [`HeapError::NoSuchElement`] if the tracker is at a sentinel or a removed element.
    fn get(&self, tracker: &Tracker) -> Result<&E, HeapError>;

    /// Returns true if the tracker is at a live element of this heap
    fn in_collection(&self, tracker: &Tracker) -> bool;

    /// Removes the tracked element and returns it
    ///
    /// # Errors
    /// [`HeapError::NoSuchElement`] if the element was already removed.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn remove(&mut self, tracker: &Tracker) -> Result<E, HeapError>;

    /// Replaces the tracked element, raising or lowering its priority as needed
    ///
    /// # Errors
    /// [`HeapError::NoSuchElement`] if the element was already removed.
    fn update(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError>;

    /// Replaces the tracked element with one of equal or higher priority
    ///
    /// # Errors
    /// - [`HeapError::NoSuchElement`] if the element was already removed
    /// - [`HeapError::PreconditionViolation`] if `element` ranks lower than the
    ///   current one; the heap is left unchanged
    fn increase_priority(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError>;

    /// Replaces the tracked element with one of equal or lower priority
    ///
    /// # Errors
    /// - [`HeapError::NoSuchElement`] if the element was already removed
    /// - [`HeapError::PreconditionViolation`] if `element` ranks higher than the
    ///   current one; the heap is left unchanged
    fn decrease_priority(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError>;
}
