//! A Pugh skip list: a sorted `i64 -> V` index with expected `O(log n)`
//! search, insertion and removal and no rebalancing.
//!
//! Nodes live in an arena and are linked by stable handles, one forward link
//! per level the node participates in. Node heights are drawn from a
//! [`LevelGenerator`], by default a [`Geometric`] generator seeded from the
//! operating system.
//!
//! The list provides no internal synchronization. Every mutating operation
//! takes `&mut self`; share it between threads behind a lock.
//!
//! ```rust
//! use pskl::{Error, SkipList};
//!
//! let mut list = SkipList::new(4, 0.5);
//! list.insert(3, "a");
//! list.insert(1, "b");
//! list.insert(2, "c");
//!
//! assert_eq!(list.get(2), Ok(&"c"));
//! assert_eq!(list.get(5), Err(Error::KeyNotFound(5)));
//!
//! assert_eq!(list.remove(1), Ok("b"));
//! assert_eq!(list.get(1), Err(Error::KeyNotFound(1)));
//! assert_eq!(list.len(), 2);
//! ```
#![cfg_attr(not(all(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]
#![allow(clippy::type_complexity)]

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

mod error;
pub use error::Error;

mod level;
pub use level::{Geometric, LevelGenerator};

mod list;
pub use list::SkipList;

mod node;

mod options;
pub use options::Options;

/// The highest level cap a skiplist accepts. Larger requests are clamped.
///
/// With the default promotion probability, `2^31` entries are needed before
/// level 31 is expected to be populated.
pub const MAX_LEVEL: usize = 31;

/// The level cap used by [`Options::new`].
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// The promotion probability used when none, or an invalid one, is given.
pub const DEFAULT_PROBABILITY: f64 = 0.5;
