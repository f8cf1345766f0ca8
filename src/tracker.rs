//! Trackers and the iteration list
//!
//! Every heap threads all of its elements, in insertion order, through an
//! [`OrderList`] that is independent of the priority trees. A [`Tracker`] is a
//! position in that list: before the first element, at an element, or after
//! the last one.
//!
//! # Tombstones
//!
//! Removing an element unlinks its entry from the list at once (its neighbours
//! are rewired to point at each other), but the entry itself is kept as a
//! tombstone that still remembers its old neighbours. A tracker parked on a
//! tombstone follows those links to find the next or previous live element.
//! Runs of tombstones are path-compressed as they are walked, so repeatedly
//! stepping out of the same dead region costs amortized O(1).
//!
//! Tombstones are reclaimed by [`OrderList::purge_tombstones`]; a tracker
//! parked on a reclaimed tombstone is reported as invalid from then on.

use crate::storage::{EntryKey, HeapId, NodeKey};
use crate::traits::HeapError;
use slotmap::SlotMap;

/// Where a tracker currently points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Before the first element in insertion order
    BeforeFirst,
    /// At an entry of the iteration list (live, or a tombstone)
    At(EntryKey),
    /// After the last element in insertion order
    AfterLast,
}

/// Handle to an element of a heap, and a cursor over the heap's insertion order
///
/// Trackers are plain values: they can be copied, stored and compared freely.
/// All operations on them go through the heap that issued them (see
/// [`TrackedQueue`](crate::TrackedQueue)). Several trackers may point at the
/// same element; once it is removed, all of them report
/// [`in_collection`](crate::TrackedQueue::in_collection) as false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tracker {
    heap: HeapId,
    position: Position,
}

impl Tracker {
    /// Current position of this tracker
    pub fn position(&self) -> Position {
        self.position
    }

    /// Identity of the heap that issued this tracker
    pub fn heap_id(&self) -> HeapId {
        self.heap
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

struct Entry {
    /// `None` once the element was removed (tombstone)
    node: Option<NodeKey>,
    /// `None` means the before-first sentinel
    prev: Option<EntryKey>,
    /// `None` means the after-last sentinel
    next: Option<EntryKey>,
}

impl Entry {
    fn link(&self, dir: Direction) -> Option<EntryKey> {
        match dir {
            Direction::Forward => self.next,
            Direction::Backward => self.prev,
        }
    }

    fn set_link(&mut self, dir: Direction, to: Option<EntryKey>) {
        match dir {
            Direction::Forward => self.next = to,
            Direction::Backward => self.prev = to,
        }
    }
}

/// Insertion-ordered list of every element a heap holds, plus tombstones
pub(crate) struct OrderList {
    id: HeapId,
    entries: SlotMap<EntryKey, Entry>,
    head: Option<EntryKey>,
    tail: Option<EntryKey>,
    tombstones: usize,
}

impl OrderList {
    pub(crate) fn new() -> Self {
        Self {
            id: HeapId::fresh(),
            entries: SlotMap::with_key(),
            head: None,
            tail: None,
            tombstones: 0,
        }
    }

    pub(crate) fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Appends a live entry for `node` just before the after-last sentinel
    pub(crate) fn push_back(&mut self, node: NodeKey) -> EntryKey {
        let key = self.entries.insert(Entry {
            node: Some(node),
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.entries[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        key
    }

    pub(crate) fn tracker_at(&self, entry: EntryKey) -> Tracker {
        Tracker {
            heap: self.id,
            position: Position::At(entry),
        }
    }

    pub(crate) fn before_first(&self) -> Tracker {
        Tracker {
            heap: self.id,
            position: Position::BeforeFirst,
        }
    }

    /// Resolves a tracker to the live node it points at
    pub(crate) fn live_node(&self, tracker: &Tracker) -> Result<NodeKey, HeapError> {
        if tracker.heap != self.id {
            return Err(HeapError::InvalidTracker);
        }
        match tracker.position {
            Position::At(entry) => self
                .entries
                .get(entry)
                .and_then(|e| e.node)
                .ok_or(HeapError::NoSuchElement),
            Position::BeforeFirst | Position::AfterLast => Err(HeapError::NoSuchElement),
        }
    }

    /// Turns a live entry into a tombstone and unlinks it from the live chain
    pub(crate) fn remove(&mut self, entry: EntryKey) {
        let Entry { node, prev, next } = &mut self.entries[entry];
        debug_assert!(node.is_some(), "entry is already a tombstone");
        *node = None;
        let (prev, next) = (*prev, *next);

        match prev {
            Some(p) => self.entries[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entries[n].prev = prev,
            None => self.tail = prev,
        }
        self.tombstones += 1;
    }

    pub(crate) fn advance(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError> {
        if tracker.heap != self.id {
            return Err(HeapError::InvalidTracker);
        }
        let next = match tracker.position {
            Position::AfterLast => return Ok(false),
            Position::BeforeFirst => self.head,
            Position::At(entry) => {
                let current = self.entries.get(entry).ok_or(HeapError::InvalidTracker)?;
                if current.node.is_some() {
                    current.next
                } else {
                    self.next_live_after_tombstone(entry)
                }
            }
        };
        tracker.position = next.map_or(Position::AfterLast, Position::At);
        Ok(next.is_some())
    }

    pub(crate) fn retreat(&mut self, tracker: &mut Tracker) -> Result<bool, HeapError> {
        if tracker.heap != self.id {
            return Err(HeapError::InvalidTracker);
        }
        let prev = match tracker.position {
            Position::BeforeFirst => return Ok(false),
            Position::AfterLast => self.tail,
            Position::At(entry) => {
                let current = self.entries.get(entry).ok_or(HeapError::InvalidTracker)?;
                if current.node.is_some() {
                    current.prev
                } else {
                    self.compress(entry, Direction::Backward)
                }
            }
        };
        tracker.position = prev.map_or(Position::BeforeFirst, Position::At);
        Ok(prev.is_some())
    }

    fn next_live_after_tombstone(&mut self, entry: EntryKey) -> Option<EntryKey> {
        if let Some(live) = self.compress(entry, Direction::Forward) {
            return Some(live);
        }
        // The forward chain ran off the end of the list as it was when these
        // entries died; anything appended since follows the nearest live
        // predecessor.
        match self.compress(entry, Direction::Backward) {
            Some(pred) => self.entries[pred].next,
            None => self.head,
        }
    }

    /// Follows `dir` links from the tombstone `from` to the first live entry
    /// (or a sentinel), pointing every tombstone on the way straight at it.
    fn compress(&mut self, from: EntryKey, dir: Direction) -> Option<EntryKey> {
        let mut target = self.entries[from].link(dir);
        while let Some(key) = target {
            let entry = &self.entries[key];
            if entry.node.is_some() {
                break;
            }
            target = entry.link(dir);
        }

        let mut current = Some(from);
        while let Some(key) = current {
            if current == target {
                break;
            }
            let entry = &mut self.entries[key];
            current = entry.link(dir);
            entry.set_link(dir, target);
        }
        target
    }

    /// Live nodes in insertion order
    pub(crate) fn live_nodes(&self) -> LiveNodes<'_> {
        LiveNodes {
            entries: &self.entries,
            current: self.head,
        }
    }

    /// First live entry, in insertion order, whose node satisfies `pred`
    pub(crate) fn find<F>(&self, mut pred: F) -> Option<(EntryKey, NodeKey)>
    where
        F: FnMut(NodeKey) -> bool,
    {
        let mut current = self.head;
        while let Some(key) = current {
            let entry = &self.entries[key];
            if let Some(node) = entry.node {
                if pred(node) {
                    return Some((key, node));
                }
            }
            current = entry.next;
        }
        None
    }

    /// Reclaims every tombstone, returning how many were freed
    pub(crate) fn purge_tombstones(&mut self) -> usize {
        let purged = self.tombstones;
        self.entries.retain(|_, entry| entry.node.is_some());
        self.tombstones = 0;
        purged
    }

    /// Drops every entry; all trackers at elements become invalid
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.head = None;
        self.tail = None;
        self.tombstones = 0;
    }
}

/// Iterator over the live nodes of an [`OrderList`]
pub(crate) struct LiveNodes<'a> {
    entries: &'a SlotMap<EntryKey, Entry>,
    current: Option<EntryKey>,
}

impl Iterator for LiveNodes<'_> {
    type Item = NodeKey;

    fn next(&mut self) -> Option<NodeKey> {
        loop {
            let entry = &self.entries[self.current?];
            self.current = entry.next;
            if let Some(node) = entry.node {
                return Some(node);
            }
        }
    }
}
