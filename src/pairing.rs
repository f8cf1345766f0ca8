//! Pairing Heap implementation
//!
//! A pairing heap is a single heap-ordered multiway tree with:
//! - O(1) insert and meld
//! - O(log n) amortized extract_max and remove
//! - o(log n) amortized priority changes
//!
//! Every restructuring is expressed through one comparison primitive, `link`,
//! which makes the lower-priority of two trees the new leftmost child of the
//! other. Removing a node detaches its children into a FIFO queue, links them
//! pairwise from the front until one tree remains, and links that tree back
//! against the root.
//!
//! Nodes live in a slotmap arena. Children of a node form a non-circular
//! doubly linked list; each child also stores an explicit parent key, so "is
//! this the leftmost child" and "is this the root" are O(1) checks.

use crate::compare::{Comparator, NaturalOrder};
use crate::storage::{EntryKey, NodeKey};
use crate::tracker::{LiveNodes, OrderList, Tracker};
use crate::tracing_helpers::debug_log;
use crate::traits::{HeapError, PriorityQueue, TrackedQueue};
use slotmap::{SecondaryMap, SlotMap};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

struct Node<E> {
    element: E,
    entry: EntryKey,
    parent: Option<NodeKey>,
    /// Leftmost child
    child: Option<NodeKey>,
    /// Left sibling
    prev: Option<NodeKey>,
    /// Right sibling
    next: Option<NodeKey>,
}

/// Pairing Heap
///
/// # Example
///
/// ```rust
/// use meldable_heaps::pairing::PairingHeap;
/// use meldable_heaps::{PriorityQueue, TrackedQueue};
///
/// let mut heap = PairingHeap::new();
/// let tracker = heap.insert(5);
/// heap.insert(8);
/// heap.increase_priority(&tracker, 12).unwrap();
/// assert_eq!(heap.max(), Ok(&12));
/// ```
pub struct PairingHeap<E, C = NaturalOrder> {
    nodes: SlotMap<NodeKey, Node<E>>,
    order: OrderList,
    root: Option<NodeKey>,
    comparator: C,
}

impl<E: Ord> PairingHeap<E> {
    /// Creates an empty heap ordered by `Ord` (largest value first)
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<E, C: Comparator<E>> PairingHeap<E, C> {
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
        debug_log!(purged, "purged pairing heap tombstones");
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

    /// Checks every structural invariant of the heap
    ///
    /// Verifies heap order, parent and sibling link consistency, that the
    /// root has no parent or siblings, and that the tree and the iteration
    /// list both account for exactly `len()` elements.
    pub fn verify_structure(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty() && self.order.live_nodes().next().is_none();
        };
        let root_node = &self.nodes[root];
        if root_node.parent.is_some() || root_node.prev.is_some() || root_node.next.is_some() {
            return false;
        }

        let mut visited = 0;
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            visited += 1;
            let mut prev = None;
            let mut child = self.nodes[key].child;
            while let Some(c) = child {
                let node = &self.nodes[c];
                if node.parent != Some(key) || node.prev != prev || self.outranks(c, key) {
                    return false;
                }
                stack.push(c);
                prev = Some(c);
                child = node.next;
            }
        }

        visited == self.nodes.len() && self.order.live_nodes().count() == self.nodes.len()
    }

    #[inline]
    fn outranks(&self, a: NodeKey, b: NodeKey) -> bool {
        self.comparator
            .compare(&self.nodes[a].element, &self.nodes[b].element)
            == Ordering::Greater
    }

    /// Links two free-standing trees, returning the root of the result
    ///
    /// The lower-priority root becomes the new leftmost child of the other.
    /// On a tie `a` stays on top.
    fn link(&mut self, a: NodeKey, b: NodeKey) -> NodeKey {
        if self.outranks(b, a) {
            self.add_child(b, a);
            b
        } else {
            self.add_child(a, b);
            a
        }
    }

    fn add_child(&mut self, parent: NodeKey, child: NodeKey) {
        let first = self.nodes[parent].child;
        if let Some(first) = first {
            self.nodes[first].prev = Some(child);
        }
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.prev = None;
        node.next = first;
        self.nodes[parent].child = Some(child);
    }

    /// Detaches `key` (with its subtree) from wherever it sits
    fn detach(&mut self, key: NodeKey) {
        if self.root == Some(key) {
            self.root = None;
            return;
        }
        let node = &mut self.nodes[key];
        let (parent, prev, next) = (node.parent.take(), node.prev.take(), node.next.take());

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].child = next;
                }
            }
        }
        if let Some(n) = next {
            self.nodes[n].prev = prev;
        }
    }

    /// Moves every child of `key` into a queue of free-standing trees
    fn take_children(&mut self, key: NodeKey) -> VecDeque<NodeKey> {
        let mut queue = VecDeque::new();
        let mut child = self.nodes[key].child.take();
        while let Some(c) = child {
            let node = &mut self.nodes[c];
            child = node.next.take();
            node.parent = None;
            node.prev = None;
            queue.push_back(c);
        }
        queue
    }

    /// Links trees from the front of the queue in pairs until one remains
    fn pair_up(&mut self, mut queue: VecDeque<NodeKey>) -> Option<NodeKey> {
        while queue.len() > 1 {
            if let (Some(a), Some(b)) = (queue.pop_front(), queue.pop_front()) {
                let linked = self.link(a, b);
                queue.push_back(linked);
            }
        }
        queue.pop_front()
    }

    fn meld_with_root(&mut self, tree: NodeKey) {
        self.root = Some(match self.root {
            Some(root) => self.link(root, tree),
            None => tree,
        });
    }

    fn remove_node(&mut self, key: NodeKey) -> Result<E, HeapError> {
        let children = self.take_children(key);
        self.detach(key);
        if let Some(tree) = self.pair_up(children) {
            self.meld_with_root(tree);
        }

        let node = self.nodes.remove(key).ok_or(HeapError::NoSuchElement)?;
        self.order.remove(node.entry);
        Ok(node.element)
    }

    fn increase_node(&mut self, key: NodeKey, element: E) -> Result<(), HeapError> {
        if self.comparator.compare(&element, &self.nodes[key].element) == Ordering::Less {
            return Err(HeapError::PreconditionViolation);
        }
        self.nodes[key].element = element;
        if self.root != Some(key) {
            self.detach(key);
            self.meld_with_root(key);
        }
        Ok(())
    }

    fn decrease_node(&mut self, key: NodeKey, element: E) -> Result<(), HeapError> {
        if self.comparator.compare(&element, &self.nodes[key].element) == Ordering::Greater {
            return Err(HeapError::PreconditionViolation);
        }
        self.nodes[key].element = element;
        // A leaf can only drop below its ancestors, which keeps heap order
        if self.nodes[key].child.is_some() {
            let children = self.take_children(key);
            if let Some(tree) = self.pair_up(children) {
                self.meld_with_root(tree);
            }
        }
        Ok(())
    }
}

impl<E, C: Comparator<E>> PriorityQueue<E> for PairingHeap<E, C> {
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

    fn meld(&mut self, mut other: Self) {
        let moved: Vec<NodeKey> = other.order.live_nodes().collect();
        let mut remap = SecondaryMap::with_capacity(moved.len());
        for &old in &moved {
            if let Some(node) = other.nodes.remove(old) {
                remap.insert(old, self.nodes.insert(node));
            }
        }
        let relink = |key: Option<NodeKey>| key.and_then(|k| remap.get(k).copied());

        for &old in &moved {
            let Some(&new) = remap.get(old) else { continue };
            let entry = self.order.push_back(new);
            let node = &mut self.nodes[new];
            node.entry = entry;
            node.parent = relink(node.parent);
            node.child = relink(node.child);
            node.prev = relink(node.prev);
            node.next = relink(node.next);
        }

        debug_log!(moved = moved.len(), "melded pairing heaps");
        if let Some(tree) = relink(other.root) {
            self.meld_with_root(tree);
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.order.clear();
        self.root = None;
    }
}

impl<E, C: Comparator<E>> TrackedQueue<E> for PairingHeap<E, C> {
    fn insert(&mut self, element: E) -> Tracker {
        let key = self.nodes.insert(Node {
            element,
            entry: EntryKey::default(),
            parent: None,
            child: None,
            prev: None,
            next: None,
        });
        let entry = self.order.push_back(key);
        self.nodes[key].entry = entry;
        self.meld_with_root(key);
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

impl<E, C: Comparator<E> + Default> Default for PairingHeap<E, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<E, C: Comparator<E>> Extend<E> for PairingHeap<E, C> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<E, C: Comparator<E> + Default> FromIterator<E> for PairingHeap<E, C> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<E: fmt::Debug, C: Comparator<E>> fmt::Debug for PairingHeap<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the live elements of a [`PairingHeap`] in insertion order
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

impl<'a, E, C: Comparator<E>> IntoIterator for &'a PairingHeap<E, C> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Iter<'a, E> {
        self.iter()
    }
}
