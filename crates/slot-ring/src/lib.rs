//! Circular doubly-linked lists threaded through a slotmap arena.
//!
//! This crate provides the ring primitives used by heap structures whose nodes
//! live in a [`SlotMap`]: every node embeds a [`RingLink`] holding the keys of
//! its neighbours, and [`CircularListOps`] rewires those keys.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! This is what Fibonacci heaps need: siblings form a ring around their parent,
//! the top-level trees form another ring, and melding two heaps is a splice.
//!
//! # Example
//!
//! ```rust
//! use slot_ring::{CircularListOps, Linked, RingLink};
//! use slotmap::{DefaultKey, SlotMap};
//!
//! struct Node {
//!     ring: RingLink<DefaultKey>,
//!     value: i32,
//! }
//!
//! impl Linked<DefaultKey> for Node {
//!     fn ring(&self) -> &RingLink<DefaultKey> {
//!         &self.ring
//!     }
//!     fn ring_mut(&mut self) -> &mut RingLink<DefaultKey> {
//!         &mut self.ring
//!     }
//! }
//!
//! let mut nodes = SlotMap::new();
//! let a = nodes.insert(Node { ring: RingLink::new(), value: 1 });
//! let b = nodes.insert(Node { ring: RingLink::new(), value: 2 });
//!
//! let ops = CircularListOps::new();
//! ops.make_circular(&mut nodes, a);
//! ops.insert_after(&mut nodes, a, b);
//!
//! assert_eq!(ops.next(&nodes, a), b);
//! assert_eq!(ops.next(&nodes, b), a);
//! assert_eq!(nodes[b].value, 2);
//! ```

use slotmap::{Key, SlotMap};
use std::fmt;

// =============================================================================
// RingLink
// =============================================================================

/// Link embedded in a node that can be part of a circular list.
///
/// When unlinked, both `next` and `prev` are null keys.
/// When linked (even as a single node), both hold valid keys.
/// A single node in a circular list points to itself.
pub struct RingLink<K> {
    next: K,
    prev: K,
}

impl<K: Key> RingLink<K> {
    /// Creates a new unlinked `RingLink`.
    #[inline]
    pub fn new() -> Self {
        RingLink {
            next: K::null(),
            prev: K::null(),
        }
    }

    /// Checks whether the link is part of a ring.
    #[inline]
    pub fn is_linked(&self) -> bool {
        !self.next.is_null()
    }

    /// Key of the next node in the ring (null when unlinked).
    #[inline]
    pub fn next(&self) -> K {
        self.next
    }

    /// Key of the previous node in the ring (null when unlinked).
    #[inline]
    pub fn prev(&self) -> K {
        self.prev
    }

    #[inline]
    fn force_unlink(&mut self) {
        self.next = K::null();
        self.prev = K::null();
    }
}

impl<K: Key> Default for RingLink<K> {
    #[inline]
    fn default() -> Self {
        RingLink::new()
    }
}

impl<K: Key> Clone for RingLink<K> {
    /// Cloning a link creates a new unlinked link.
    #[inline]
    fn clone(&self) -> Self {
        RingLink::new()
    }
}

impl<K: Key> fmt::Debug for RingLink<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "RingLink(linked)")
        } else {
            write!(f, "RingLink(unlinked)")
        }
    }
}

/// Implemented by arena values that embed a [`RingLink`].
pub trait Linked<K: Key> {
    /// The embedded link.
    fn ring(&self) -> &RingLink<K>;

    /// The embedded link, mutably.
    fn ring_mut(&mut self) -> &mut RingLink<K>;
}

// =============================================================================
// CircularListOps
// =============================================================================

/// Operations for manipulating circular doubly-linked lists stored in a `SlotMap`.
///
/// All operations except [`count`](Self::count) and iteration are O(1).
///
/// # Panics
///
/// Every method indexes the arena with the keys it is given, so a key that is
/// not present in `nodes` panics. Methods that require a linked (or unlinked)
/// node check this with `debug_assert!`.
#[derive(Clone, Copy, Default, Debug)]
pub struct CircularListOps;

impl CircularListOps {
    /// Creates a new `CircularListOps`.
    #[inline]
    pub const fn new() -> Self {
        CircularListOps
    }

    /// Checks if a node is linked.
    #[inline]
    pub fn is_linked<K: Key, N: Linked<K>>(&self, nodes: &SlotMap<K, N>, key: K) -> bool {
        nodes[key].ring().is_linked()
    }

    /// Gets the next node in the ring.
    #[inline]
    pub fn next<K: Key, N: Linked<K>>(&self, nodes: &SlotMap<K, N>, key: K) -> K {
        nodes[key].ring().next
    }

    /// Gets the previous node in the ring.
    #[inline]
    pub fn prev<K: Key, N: Linked<K>>(&self, nodes: &SlotMap<K, N>, key: K) -> K {
        nodes[key].ring().prev
    }

    /// Makes a single node into a ring of one element.
    ///
    /// After this, `next(key) == key` and `prev(key) == key`.
    #[inline]
    pub fn make_circular<K: Key, N: Linked<K>>(&self, nodes: &mut SlotMap<K, N>, key: K) {
        let link = nodes[key].ring_mut();
        debug_assert!(!link.is_linked(), "node is already linked");
        link.next = key;
        link.prev = key;
    }

    /// Inserts `new` after `at`.
    ///
    /// `at` must be linked and `new` must not be.
    #[inline]
    pub fn insert_after<K: Key, N: Linked<K>>(&self, nodes: &mut SlotMap<K, N>, at: K, new: K) {
        debug_assert!(nodes[at].ring().is_linked(), "at is not linked");
        debug_assert!(!nodes[new].ring().is_linked(), "new is already linked");

        let next = nodes[at].ring().next;

        nodes[at].ring_mut().next = new;
        let link = nodes[new].ring_mut();
        link.prev = at;
        link.next = next;
        nodes[next].ring_mut().prev = new;
    }

    /// Inserts `new` before `at`.
    ///
    /// `at` must be linked and `new` must not be.
    #[inline]
    pub fn insert_before<K: Key, N: Linked<K>>(&self, nodes: &mut SlotMap<K, N>, at: K, new: K) {
        debug_assert!(nodes[at].ring().is_linked(), "at is not linked");
        debug_assert!(!nodes[new].ring().is_linked(), "new is already linked");

        let prev = nodes[at].ring().prev;

        nodes[at].ring_mut().prev = new;
        let link = nodes[new].ring_mut();
        link.next = at;
        link.prev = prev;
        nodes[prev].ring_mut().next = new;
    }

    /// Removes a node from its ring and leaves it unlinked.
    ///
    /// Returns the node that followed it, or `None` if it was the only
    /// element (the ring is now empty).
    #[inline]
    pub fn remove<K: Key, N: Linked<K>>(&self, nodes: &mut SlotMap<K, N>, key: K) -> Option<K> {
        debug_assert!(nodes[key].ring().is_linked(), "node is not linked");

        let link = nodes[key].ring_mut();
        let (next, prev) = (link.next, link.prev);
        link.force_unlink();

        if next == key {
            None
        } else {
            nodes[prev].ring_mut().next = next;
            nodes[next].ring_mut().prev = prev;
            Some(next)
        }
    }

    /// Splices two rings together.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were
    /// empty. If either is `None`, returns the other.
    #[inline]
    pub fn splice<K: Key, N: Linked<K>>(
        &self,
        nodes: &mut SlotMap<K, N>,
        a: Option<K>,
        b: Option<K>,
    ) -> Option<K> {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                // Before:
                //   Ring A: ... <-> a_prev <-> a <-> ...
                //   Ring B: ... <-> b_prev <-> b <-> ...
                //
                // After:
                //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
                let a_prev = nodes[a].ring().prev;
                let b_prev = nodes[b].ring().prev;

                nodes[a_prev].ring_mut().next = b;
                nodes[b].ring_mut().prev = a_prev;

                nodes[b_prev].ring_mut().next = a;
                nodes[a].ring_mut().prev = b_prev;

                Some(a)
            }
        }
    }

    /// Counts the number of elements in the ring containing `start`. O(n).
    pub fn count<K: Key, N: Linked<K>>(&self, nodes: &SlotMap<K, N>, start: K) -> usize {
        self.iter(nodes, start).count()
    }

    /// Iterates over the ring starting at `start`, following `next` links.
    pub fn iter<'a, K: Key, N: Linked<K>>(
        &self,
        nodes: &'a SlotMap<K, N>,
        start: K,
    ) -> RingIter<'a, K, N> {
        debug_assert!(nodes[start].ring().is_linked(), "node is not linked");
        RingIter {
            nodes,
            start,
            current: Some(start),
        }
    }

    /// Snapshot of the ring's keys, for callers that restructure while walking.
    pub fn collect<K: Key, N: Linked<K>>(&self, nodes: &SlotMap<K, N>, start: K) -> Vec<K> {
        self.iter(nodes, start).collect()
    }
}

/// Iterator over the keys of a ring.
pub struct RingIter<'a, K: Key, N> {
    nodes: &'a SlotMap<K, N>,
    start: K,
    current: Option<K>,
}

impl<K: Key, N: Linked<K>> Iterator for RingIter<'_, K, N> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let key = self.current?;
        let next = self.nodes[key].ring().next;
        self.current = if next == self.start { None } else { Some(next) };
        Some(key)
    }
}

// =============================================================================
// Tests
// =============================================================================
