//! Arena keys and heap identity
//!
//! All nodes live in a [`slotmap::SlotMap`] owned by their heap, so structural
//! links (child, sibling, parent) are plain generational keys instead of
//! pointers. A removed node's slot is reused eagerly; the generation stored in
//! the key detects any stale reference to it.
//!
//! Trackers never hold a [`NodeKey`] directly. They hold an [`EntryKey`] into
//! the heap's iteration list (see [`crate::tracker`]), plus the [`HeapId`] of
//! the heap that issued them.

use std::sync::atomic::{AtomicU64, Ordering};

slotmap::new_key_type! {
    /// Key of a node in a heap's node arena
    pub struct NodeKey;

    /// Key of an entry in a heap's iteration list
    pub struct EntryKey;
}

/// Process-unique identity of a heap instance.
///
/// Trackers remember the heap that issued them so that handing one to a
/// different heap is reported instead of addressing an unrelated slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeapId(u64);

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(1);

impl HeapId {
    pub(crate) fn fresh() -> Self {
        HeapId(NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}
