//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert and meld
//! - O(1) amortized increase_priority
//! - O(log n) amortized extract_max and remove
//!
//! The structure consists of a collection of heap-ordered trees whose roots
//! are linked in a circular doubly linked list (the root chain). The heap
//! keeps a key to a maximum root. Trees are only combined lazily, by
//! `consolidate`, which links roots of equal degree until every degree occurs
//! at most once.
//!
//! # Marks and cascading cuts
//!
//! A non-root node is marked once it has lost a child since it last became a
//! child. Losing a second child cuts it into the root chain, and the cut may
//! cascade upwards through marked ancestors. This keeps a node of degree k at
//! the root of a subtree of at least F(k+2) nodes, so degrees stay below
//! log_φ(n) + 1.

use crate::compare::{Comparator, NaturalOrder};
use crate::storage::{EntryKey, NodeKey};
use crate::tracker::{LiveNodes, OrderList, Tracker};
use crate::tracing_helpers::{debug_log, trace_log};
use crate::traits::{HeapError, PriorityQueue, TrackedQueue};
use slot_ring::{CircularListOps, Linked, RingLink};
use slotmap::{SecondaryMap, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;

const RING: CircularListOps = CircularListOps::new();

/// The golden ratio, base of the degree bound
const PHI: f64 = 1.618_033_988_749_895;

struct Node<E> {
    element: E,
    entry: EntryKey,
    parent: Option<NodeKey>,
    /// Any one child; the others follow it around its ring
    child: Option<NodeKey>,
    /// Position in the parent's child ring, or in the root chain
    ring: RingLink<NodeKey>,
    degree: usize,
    marked: bool,
}

impl<E> Linked<NodeKey> for Node<E> {
    fn ring(&self) -> &RingLink<NodeKey> {
        &self.ring
    }

    fn ring_mut(&mut self) -> &mut RingLink<NodeKey> {
        &mut self.ring
    }
}

/// Upper bound on the degree of any node in a heap of `len` nodes
fn degree_bound(len: usize) -> usize {
    if len <= 1 {
        1
    } else {
        ((len as f64).ln() / PHI.ln()) as usize + 2
    }
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use meldable_heaps::fibonacci::FibonacciHeap;
/// use meldable_heaps::{PriorityQueue, TrackedQueue};
///
/// let mut heap = FibonacciHeap::new();
/// let tracker = heap.insert(5);
/// heap.insert(8);
/// heap.decrease_priority(&tracker, 1).unwrap();
/// assert_eq!(heap.extract_max(), Ok(8));
/// assert_eq!(heap.max(), Ok(&1));
/// ```
pub struct FibonacciHeap<E, C = NaturalOrder> {
    nodes: SlotMap<NodeKey, Node<E>>,
    order: OrderList,
    /// Maximum root, and entry point into the root chain
    root: Option<NodeKey>,
    comparator: C,
}

impl<E: Ord> FibonacciHeap<E> {
    /// Creates an empty heap ordered by `Ord` (largest value first)
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<E, C: Comparator<E>> FibonacciHeap<E, C> {
    /// Creates an empty heap ordered by `comparator`
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            order: OrderList::new(),
            root: None,
            comparator,
        }
    }

    /// The comparator defining this heap's priority order
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Iterates over live elements in insertion order
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            nodes: &self.nodes,
            live: self.order.live_nodes(),
        }
    }

    /// Number of removed elements still kept as tombstones for trackers
    pub fn tombstones(&self) -> usize {
        self.order.tombstones()
    }

    /// Reclaims all tombstones, returning how many were freed
    ///
    /// Trackers parked on a removed element become invalid: advancing or
    /// retreating them fails with [`HeapError::InvalidTracker`].
    pub fn purge_tombstones(&mut self) -> usize {
        let purged = self.order.purge_tombstones();
        debug_log!(purged, "purged fibonacci heap tombstones");
        purged
    }

    /// Drains the heap into a vector ordered from highest to lowest priority
    pub fn into_sorted_vec(mut self) -> Vec<E> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(element) = self.extract_max() {
            sorted.push(element);
        }
        sorted
    }

    /// Number of trees in the root chain
    pub fn root_count(&self) -> usize {
        self.root.map_or(0, |root| RING.count(&self.nodes, root))
    }

    /// Largest degree of any node
    pub fn max_degree(&self) -> usize {
        self.nodes.values().map(|node| node.degree).max().unwrap_or(0)
    }

    /// Checks every structural invariant of the heap
    ///
    /// Verifies heap order, that `root` is a maximum root, parent and ring
    /// consistency, exact degrees, that roots are never marked, the F(k+2)
    /// subtree size bound, and that the trees and the iteration list both
    /// account for exactly `len()` elements.
    pub fn verify_structure(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty() && self.order.live_nodes().next().is_none();
        };

        let mut visited = 0;
        for r in RING.iter(&self.nodes, root) {
            let node = &self.nodes[r];
            if node.parent.is_some() || node.marked || self.outranks(r, root) {
                return false;
            }
            match self.verify_subtree(r) {
                Some(size) => visited += size,
                None => return false,
            }
        }

        visited == self.nodes.len() && self.order.live_nodes().count() == self.nodes.len()
    }

    /// Returns the subtree size, or `None` if an invariant is broken below `key`
    fn verify_subtree(&self, key: NodeKey) -> Option<usize> {
        let node = &self.nodes[key];
        let mut size = 1;
        let mut degree = 0;
        if let Some(child) = node.child {
            for c in RING.iter(&self.nodes, child) {
                if self.nodes[c].parent != Some(key) || self.outranks(c, key) {
                    return None;
                }
                degree += 1;
                size += self.verify_subtree(c)?;
            }
        }
        if degree != node.degree || (size as u128) < fibonacci(degree + 2) {
            return None;
        }
        Some(size)
    }

    #[inline]
    fn outranks(&self, a: NodeKey, b: NodeKey) -> bool {
        self.comparator
            .compare(&self.nodes[a].element, &self.nodes[b].element)
            == Ordering::Greater
    }

    /// Adds an unlinked node to the root chain without touching `root`,
    /// unless the chain was empty
    fn add_root(&mut self, key: NodeKey) {
        match self.root {
            Some(root) => RING.insert_before(&mut self.nodes, root, key),
            None => {
                RING.make_circular(&mut self.nodes, key);
                self.root = Some(key);
            }
        }
    }

    /// Adds an unlinked node to the root chain, making it `root` if it outranks it
    fn push_root(&mut self, key: NodeKey) {
        match self.root {
            Some(root) => {
                RING.insert_before(&mut self.nodes, root, key);
                if self.outranks(key, root) {
                    self.root = Some(key);
                }
            }
            None => self.add_root(key),
        }
    }

    /// Makes root `y` a child of root `x`; both must be off every ring
    fn link(&mut self, y: NodeKey, x: NodeKey) {
        match self.nodes[x].child {
            Some(child) => RING.insert_before(&mut self.nodes, child, y),
            None => {
                RING.make_circular(&mut self.nodes, y);
                self.nodes[x].child = Some(y);
            }
        }
        let node = &mut self.nodes[y];
        node.parent = Some(x);
        node.marked = false;
        self.nodes[x].degree += 1;
    }

    /// Moves every child of `key` into the root chain as unmarked roots
    fn promote_children(&mut self, key: NodeKey) {
        let Some(child) = self.nodes[key].child.take() else {
            return;
        };
        for c in RING.collect(&self.nodes, child) {
            let node = &mut self.nodes[c];
            node.parent = None;
            node.marked = false;
        }
        self.nodes[key].degree = 0;
        self.root = RING.splice(&mut self.nodes, self.root, Some(child));
    }

    /// Cuts `key` from its parent into the root chain, cascading through
    /// marked ancestors
    fn cut(&mut self, key: NodeKey) {
        let mut current = key;
        while let Some(parent) = self.nodes[current].parent {
            let survivor = RING.remove(&mut self.nodes, current);
            if self.nodes[parent].child == Some(current) {
                self.nodes[parent].child = survivor;
            }
            self.nodes[parent].degree -= 1;

            let node = &mut self.nodes[current];
            node.parent = None;
            node.marked = false;
            self.add_root(current);

            // Roots are never marked
            if self.nodes[parent].parent.is_none() {
                break;
            }
            if !self.nodes[parent].marked {
                self.nodes[parent].marked = true;
                break;
            }
            trace_log!(?parent, "cascading cut");
            current = parent;
        }
    }

    /// Links roots of equal degree until every degree occurs at most once,
    /// then recomputes `root` as a maximum root
    fn consolidate(&mut self) {
        let Some(start) = self.root else {
            return;
        };
        let roots = RING.collect(&self.nodes, start);
        if roots.len() == 1 {
            return;
        }
        debug_log!(roots = roots.len(), "consolidating root chain");

        for &r in &roots {
            RING.remove(&mut self.nodes, r);
        }

        let mut buckets: SmallVec<[Option<NodeKey>; 64]> =
            smallvec![None; degree_bound(self.nodes.len()) + 1];
        for mut x in roots {
            let mut degree = self.nodes[x].degree;
            while let Some(mut y) = buckets.get_mut(degree).and_then(Option::take) {
                if self.outranks(y, x) {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }
            if degree >= buckets.len() {
                buckets.resize(degree + 1, None);
            }
            buckets[degree] = Some(x);
        }

        self.root = None;
        for x in buckets.into_iter().flatten() {
            self.push_root(x);
        }
    }

    fn remove_node(&mut self, key: NodeKey) -> Result<E, HeapError> {
        self.promote_children(key);
        if self.nodes[key].parent.is_some() {
            self.cut(key);
        }

        let survivor = RING.remove(&mut self.nodes, key);
        if self.root == Some(key) {
            self.root = survivor;
        }
        self.consolidate();

        let node = self.nodes.remove(key).ok_or(HeapError::NoSuchElement)?;
        self.order.remove(node.entry);
        Ok(node.element)
    }

    fn increase_node(&mut self, key: NodeKey, element: E) -> Result<(), HeapError> {
        if self.comparator.compare(&element, &self.nodes[key].element) == Ordering::Less {
            return Err(HeapError::PreconditionViolation);
        }
        self.nodes[key].element = element;

        if let Some(parent) = self.nodes[key].parent {
            if self.outranks(key, parent) {
                self.cut(key);
            }
        }
        if let Some(root) = self.root {
            if self.nodes[key].parent.is_none() && self.outranks(key, root) {
                self.root = Some(key);
            }
        }
        Ok(())
    }

    fn decrease_node(&mut self, key: NodeKey, element: E) -> Result<(), HeapError> {
        if self.comparator.compare(&element, &self.nodes[key].element) == Ordering::Greater {
            return Err(HeapError::PreconditionViolation);
        }
        self.nodes[key].element = element;

        if self.nodes[key].child.is_some() {
            self.promote_children(key);
            if self.nodes[key].parent.is_some() {
                self.cut(key);
            }
            self.consolidate();
        } else if self.root == Some(key) {
            self.consolidate();
        }
        Ok(())
    }
}

/// F(n) with F(0) = 0, F(1) = 1, saturating
fn fibonacci(n: usize) -> u128 {
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..n {
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    a
}

impl<E, C: Comparator<E>> PriorityQueue<E> for FibonacciHeap<E, C> {
    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, element: E) {
        self.insert(element);
    }

    fn max(&self) -> Result<&E, HeapError> {
        self.root
            .map(|root| &self.nodes[root].element)
            .ok_or(HeapError::EmptyCollection)
    }

    fn extract_max(&mut self) -> Result<E, HeapError> {
        let root = self.root.ok_or(HeapError::EmptyCollection)?;
        self.remove_node(root)
    }

    fn get_equivalent(&self, element: &E) -> Result<&E, HeapError> {
        self.order
            .find(|key| self.comparator.compare(element, &self.nodes[key].element) == Ordering::Equal)
            .map(|(_, key)| &self.nodes[key].element)
            .ok_or(HeapError::NoSuchElement)
    }

    fn remove_equivalent(&mut self, element: &E) -> bool {
        let found = self
            .order
            .find(|key| self.comparator.compare(element, &self.nodes[key].element) == Ordering::Equal);
        match found {
            Some((_, key)) => self.remove_node(key).is_ok(),
            None => false,
        }
    }

    /// Moves `other`'s nodes into this heap's arena, then splices the two
    /// root chains together
    fn meld(&mut self, mut other: Self) {
        let moved: Vec<NodeKey> = other.order.live_nodes().collect();
        let mut remap = SecondaryMap::with_capacity(moved.len());
        for &old in &moved {
            if let Some(mut node) = other.nodes.remove(old) {
                node.ring = RingLink::new();
                node.child = None;
                remap.insert(old, self.nodes.insert(node));
            }
        }

        // Rebuild child rings and the root chain under the new keys; degrees
        // and marks carry over unchanged.
        let mut chain: Option<NodeKey> = None;
        for &old in &moved {
            let Some(&new) = remap.get(old) else { continue };
            let entry = self.order.push_back(new);
            let parent = self.nodes[new].parent.and_then(|p| remap.get(p).copied());
            let node = &mut self.nodes[new];
            node.entry = entry;
            node.parent = parent;

            let head = match parent {
                Some(p) => self.nodes[p].child,
                None => chain,
            };
            match head {
                Some(head) => RING.insert_before(&mut self.nodes, head, new),
                None => {
                    RING.make_circular(&mut self.nodes, new);
                    match parent {
                        Some(p) => self.nodes[p].child = Some(new),
                        None => chain = Some(new),
                    }
                }
            }
        }

        debug_log!(moved = moved.len(), "melded fibonacci heaps");
        let other_max = other.root.and_then(|r| remap.get(r).copied());
        let mine = self.root;
        RING.splice(&mut self.nodes, mine, chain);
        self.root = match (mine, other_max) {
            (Some(m), Some(o)) if self.outranks(o, m) => Some(o),
            (Some(m), _) => Some(m),
            (None, o) => o,
        };
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.root = None;
    }
}

impl<E, C: Comparator<E>> TrackedQueue<E> for FibonacciHeap<E, C> {
    fn insert(&mut self, element: E) -> Tracker {
        let key = self.nodes.insert(Node {
            element,
            entry: EntryKey::default(),
            parent: None,
            child: None,
            ring: RingLink::new(),
            degree: 0,
            marked: false,
        });
        let entry = self.order.push_back(key);
        self.nodes[key].entry = entry;
        self.push_root(key);
        self.order.tracker_at(entry)
    }

    fn tracker(&self) -> Tracker {
        self.order.before_first()
    }

    fn locator_for(&self, element: &E) -> Result<Tracker, HeapError> {
        self.order
            .find(|key| self.comparator.compare(element, &self.nodes[key].element) == Ordering::Equal)
            .map(|(entry, _)| self.order.tracker_at(entry))
            .ok_or(HeapError::NoSuchElement)
    }

    fn advance(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError> {
        self.order.advance(tracker)
    }

    fn retreat(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError> {
        self.order.retreat(tracker)
    }

    fn get(&self, tracker: &Tracker) -> Result<&E, HeapError> {
        let key = self.order.live_node(tracker)?;
        Ok(&self.nodes[key].element)
    }

    fn in_collection(&self, tracker: &Tracker) -> bool {
        self.order.live_node(tracker).is_ok()
    }

    fn remove(&mut self, tracker: &Tracker) -> Result<E, HeapError> {
        let key = self.order.live_node(tracker)?;
        self.remove_node(key)
    }

    fn update(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError> {
        let key = self.order.live_node(tracker)?;
        match self.comparator.compare(&element, &self.nodes[key].element) {
            Ordering::Greater => self.increase_node(key, element),
            Ordering::Less => self.decrease_node(key, element),
            Ordering::Equal => {
                self.nodes[key].element = element;
                Ok(())
            }
        }
    }

    fn increase_priority(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError> {
        let key = self.order.live_node(tracker)?;
        self.increase_node(key, element)
    }

    fn decrease_priority(&mut self, tracker: &Tracker, element: E) -> Result<(), HeapError> {
        let key = self.order.live_node(tracker)?;
        self.decrease_node(key, element)
    }
}

impl<E, C: Comparator<E> + Default> Default for FibonacciHeap<E, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<E, C: Comparator<E>> Extend<E> for FibonacciHeap<E, C> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<E, C: Comparator<E> + Default> FromIterator<E> for FibonacciHeap<E, C> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<E: fmt::Debug, C: Comparator<E>> fmt::Debug for FibonacciHeap<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the live elements of a [`FibonacciHeap`] in insertion order
pub struct Iter<'a, E> {
    nodes: &'a SlotMap<NodeKey, Node<E>>,
    live: LiveNodes<'a>,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<&'a E> {
        self.live.next().map(|key| &self.nodes[key].element)
    }
}

impl<'a, E, C: Comparator<E>> IntoIterator for &'a FibonacciHeap<E, C> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_with_degree<E, C: Comparator<E>>(
        heap: &FibonacciHeap<E, C>,
        parent: NodeKey,
        degree: usize,
    ) -> NodeKey {
        let first = heap.nodes[parent].child.unwrap();
        RING.iter(&heap.nodes, first)
            .find(|c| heap.nodes[*c].degree == degree)
            .unwrap()
    }

    fn tracker_for<E, C: Comparator<E>>(heap: &FibonacciHeap<E, C>, key: NodeKey) -> Tracker {
        heap.order.tracker_at(heap.nodes[key].entry)
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5);
        heap.insert(3);
        heap.insert(7);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.max(), Ok(&7));
        assert_eq!(heap.root_count(), 3);

        assert_eq!(heap.extract_max(), Ok(7));
        assert_eq!(heap.max(), Ok(&5));
        assert_eq!(heap.root_count(), 1);
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_increase_priority() {
        let mut heap = FibonacciHeap::new();
        heap.insert(10);
        let h2 = heap.insert(20);
        let h3 = heap.insert(30);

        assert_eq!(heap.max(), Ok(&30));

        heap.increase_priority(&h2, 35).unwrap();
        assert_eq!(heap.max(), Ok(&35));

        heap.increase_priority(&h3, 50).unwrap();
        assert_eq!(heap.max(), Ok(&50));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_consolidate_builds_binomial_tree() {
        let mut heap: FibonacciHeap<i32> = (0..17).collect();
        assert_eq!(heap.extract_max(), Ok(16));

        // 16 singleton roots consolidate into one tree of degree 4
        assert_eq!(heap.root_count(), 1);
        let root = heap.root.unwrap();
        assert_eq!(heap.nodes[root].degree, 4);
        assert_eq!(heap.max_degree(), 4);
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_cascading_cut() {
        let mut heap: FibonacciHeap<i32> = (0..17).collect();
        heap.extract_max().unwrap();

        let g = heap.root.unwrap();
        let p = child_with_degree(&heap, g, 3);
        let c1 = child_with_degree(&heap, p, 2);
        let c2 = child_with_degree(&heap, p, 1);

        heap.cut(c1);

        // c1 alone was cut; p lost its first child and is now marked
        assert_eq!(heap.nodes[c1].parent, None);
        assert_eq!(heap.nodes[p].parent, Some(g));
        assert!(heap.nodes[p].marked);
        assert_eq!(heap.nodes[p].degree, 2);
        assert_eq!(heap.root_count(), 2);
        assert!(heap.verify_structure());

        heap.cut(c2);

        // Losing a second child cut p too, and a root is never marked
        assert_eq!(heap.nodes[c2].parent, None);
        assert_eq!(heap.nodes[p].parent, None);
        assert!(!heap.nodes[p].marked);
        assert!(!heap.nodes[g].marked);
        assert_eq!(heap.nodes[p].degree, 1);
        assert_eq!(heap.nodes[g].degree, 3);
        assert_eq!(heap.root_count(), 4);
        assert_eq!(heap.root, Some(g));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_cascading_cut_through_decrease_priority() {
        let mut heap: FibonacciHeap<i32> = (0..17).collect();
        heap.extract_max().unwrap();

        let g = heap.root.unwrap();
        let p = child_with_degree(&heap, g, 3);
        let c1 = child_with_degree(&heap, p, 2);
        let c2 = child_with_degree(&heap, p, 1);
        let p_value = heap.nodes[p].element;

        let t1 = tracker_for(&heap, c1);
        let lower = heap.nodes[c1].element - 100;
        heap.decrease_priority(&t1, lower).unwrap();

        assert_ne!(heap.nodes[c1].parent, Some(p));
        assert_eq!(heap.nodes[p].parent, Some(g));
        assert!(heap.nodes[p].marked);
        assert!(heap.verify_structure());

        let t2 = tracker_for(&heap, c2);
        let lower = heap.nodes[c2].element - 100;
        heap.decrease_priority(&t2, lower).unwrap();

        // p went through the root chain, so its mark is gone
        assert!(!heap.nodes[p].marked);
        assert!(!heap.nodes[g].marked);
        assert_eq!(heap.nodes[p].element, p_value);
        assert_eq!(heap.root, Some(g));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_cut_on_increase_past_parent() {
        let mut heap: FibonacciHeap<i32> = (0..9).collect();
        heap.extract_max().unwrap();

        let g = heap.root.unwrap();
        let leaf = child_with_degree(&heap, g, 0);
        let t = tracker_for(&heap, leaf);

        heap.increase_priority(&t, 100).unwrap();
        assert_eq!(heap.nodes[leaf].parent, None);
        assert_eq!(heap.nodes[g].degree, 2);
        assert!(!heap.nodes[g].marked);
        assert_eq!(heap.root_count(), 2);
        assert_eq!(heap.root, Some(leaf));
        assert_eq!(heap.max(), Ok(&100));
        assert!(heap.verify_structure());
    }

    #[test]
    fn test_consolidate_large_heap() {
        // 2^12 singleton roots link into one tree of degree 12
        let mut heap: FibonacciHeap<u32> = (0..=4096).collect();
        assert_eq!(heap.extract_max(), Ok(4096));
        assert_eq!(heap.root_count(), 1);
        assert_eq!(heap.max_degree(), 12);
        assert!(heap.max_degree() < degree_bound(heap.len()));
        assert!(heap.verify_structure());

        let drained = heap.into_sorted_vec();
        assert_eq!(drained.len(), 4096);
        assert!(drained.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_meld_splices_root_chains() {
        let mut heap1: FibonacciHeap<i32> = [5, 10].into_iter().collect();
        let mut heap2: FibonacciHeap<i32> = (0..9).collect();
        heap2.extract_max().unwrap();
        let degree = heap2.max_degree();

        heap1.meld(heap2);
        assert_eq!(heap1.len(), 10);
        assert_eq!(heap1.max(), Ok(&10));
        assert_eq!(heap1.root_count(), 3);
        assert_eq!(heap1.max_degree(), degree);
        assert!(heap1.verify_structure());
        assert_eq!(heap1.into_sorted_vec(), vec![10, 7, 6, 5, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_degree_bound_constants() {
        assert_eq!(fibonacci(2), 1);
        assert_eq!(fibonacci(6), 8);
        assert!(degree_bound(1_000_000) >= 29);
    }
}
