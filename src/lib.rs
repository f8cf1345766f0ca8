//! Meldable max-priority queues with element trackers
//!
//! This crate provides two addressable heap data structures sharing one API:
//!
//! - **Pairing Heap**: O(1) insert and meld; O(log n) amortized extract_max and
//!   remove; a single heap-ordered tree with two-pass (FIFO) pairing
//! - **Fibonacci Heap**: O(1) insert and meld; O(1) amortized increase_priority;
//!   O(log n) amortized extract_max and remove; lazy root chain with marks and
//!   cascading cuts
//!
//! Priority is given by a [`Comparator`]: the element comparing greatest is
//! the maximum. Every inserted element receives a [`Tracker`], which locates it
//! for later removal or priority changes and doubles as a cursor over all
//! elements in insertion order. Trackers survive the removal of their element:
//! they remain at a tombstone, and advancing them reaches the next live element.
//!
//! # Example
//!
//! ```rust
//! use meldable_heaps::fibonacci::FibonacciHeap;
//! use meldable_heaps::{PriorityQueue, TrackedQueue};
//!
//! let mut heap = FibonacciHeap::new();
//! let five = heap.insert(5);
//! heap.insert(3);
//! heap.insert(9);
//!
//! heap.increase_priority(&five, 12).unwrap();
//! assert_eq!(heap.max(), Ok(&12));
//!
//! assert_eq!(heap.remove(&five), Ok(12));
//! assert_eq!(heap.extract_max(), Ok(9));
//! ```
//!
//! # Features
//!
//! - `tracing`: emit `tracing` events for consolidation, cascading cuts, melds
//!   and tombstone purges

mod tracing_helpers;

pub mod compare;
pub mod fibonacci;
pub mod pairing;
pub mod storage;
pub mod tracker;
pub mod traits;

pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use fibonacci::FibonacciHeap;
pub use pairing::PairingHeap;
pub use tracker::{Position, Tracker};
pub use traits::{HeapError, PriorityQueue, TrackedQueue};
