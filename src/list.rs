use core::{fmt, iter, mem};
use std::{boxed::Box, vec};

use rand::RngCore;

use super::{
  node::{Arena, Link, Node, NodeId},
  Error, Geometric, LevelGenerator, Options, MAX_LEVEL,
};


/// Position of a traversal: the head sentinel or a real node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
  Head,
  Node(NodeId),
}

/// Per-call record of the last node visited on every level before descending,
/// i.e. the splice point of each level. Lives on the stack of one operation.
type Update = [Cursor; MAX_LEVEL + 1];

/// A sorted map from `i64` keys to values, implemented as a skip list.
///
/// Level 0 links every entry in ascending key order; each higher level links a
/// random subset of the level below it, which lets lookups skip over runs of
/// entries.
///
/// ```text
/// level 2: HEAD ----------------> 20 -------------------------> nil
/// level 1: HEAD -------> 10 ----> 20 -------> 40 -------------> nil
/// level 0: HEAD -> 5 --> 10 ----> 20 -> 30 -> 40 -> 50 -------> nil
/// ```
pub struct SkipList<V, G = Geometric> {
  arena: Arena<V>,
  /// Forward links of the head sentinel, always `max_level + 1` long.
  head: Box<[Link]>,
  /// Highest level with a non-empty chain, `0` for an empty list.
  level: usize,
  max_level: usize,
  levels: G,
}

impl<V> SkipList<V> {
  /// Creates an empty skiplist whose nodes occupy at most levels `0..=max_level`
  /// and are promoted to the next level with probability `p`.
  ///
  /// `max_level` is clamped to [`MAX_LEVEL`]; `0` yields a plain sorted
  /// linked list. A `p` outside `(0, 1)` is silently replaced by
  /// [`DEFAULT_PROBABILITY`](crate::DEFAULT_PROBABILITY).
  ///
  /// Node heights are drawn from a generator seeded by the operating system,
  /// so the shape of the list is not predictable from the insertion order.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use pskl::SkipList;
  ///
  /// let list = SkipList::<u64>::new(8, 2.0);
  /// assert_eq!(list.max_level(), 8);
  /// assert_eq!(list.probability(), pskl::DEFAULT_PROBABILITY);
  /// ```
  #[inline]
  pub fn new(max_level: usize, p: f64) -> Self {
    Self::with_options(
      Options::new()
        .with_max_level(max_level)
        .with_probability(p),
    )
  }

  /// Creates an empty skiplist from the given [`Options`].
  #[inline]
  pub fn with_options(opts: Options) -> Self {
    let opts = opts.sanitize();
    Self::with_generator(Geometric::new(opts.max_level(), opts.probability()))
  }

  /// Like [`SkipList::new`], but node heights are drawn from a generator seeded
  /// with `seed`, so the resulting structure is reproducible.
  ///
  /// Intended for tests. A list fed by untrusted keys should use
  /// [`SkipList::new`].
  #[inline]
  pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Self {
    Self::with_generator(Geometric::with_seed(max_level, p, seed))
  }
}

impl<V, R: RngCore> SkipList<V, Geometric<R>> {
  /// Returns the promotion probability of the level generator.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.levels.probability()
  }
}

impl<V, G: LevelGenerator> SkipList<V, G> {
  /// Creates an empty skiplist drawing node heights from `levels`.
  ///
  /// The maximum level of the list is the generator's
  /// [`max_level`](LevelGenerator::max_level).
  ///
  /// ## Panics
  /// - The generator's maximum level exceeds [`MAX_LEVEL`].
  pub fn with_generator(levels: G) -> Self {
    let max_level = levels.max_level();
    assert!(
      max_level <= MAX_LEVEL,
      "level generator max level {max_level} exceeds {MAX_LEVEL}"
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(max_level, "created skiplist");

    Self {
      arena: Arena::new(),
      head: vec![None; max_level + 1].into_boxed_slice(),
      level: 0,
      max_level,
      levels,
    }
  }

  /// Returns the number of entries in the skiplist.
  #[inline]
  pub const fn len(&self) -> usize {
    self.arena.len()
  }

  /// Returns `true` if the skiplist holds no entries.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns the highest level that currently links at least one entry.
  ///
  /// An empty list, or one whose entries all live on level 0 only, reports `0`.
  #[inline]
  pub const fn level(&self) -> usize {
    self.level
  }

  /// Returns the highest level any entry may ever occupy.
  #[inline]
  pub const fn max_level(&self) -> usize {
    self.max_level
  }

  /// Returns the level generator.
  #[inline]
  pub const fn generator(&self) -> &G {
    &self.levels
  }

  /// Returns the value stored under `key`.
  ///
  /// ## Errors
  /// - [`Error::KeyNotFound`] if no entry has the key.
  pub fn get(&self, key: i64) -> Result<&V, Error> {
    match self.find(key) {
      Some(id) => Ok(&self.arena.get(id).value),
      None => Err(Error::KeyNotFound(key)),
    }
  }

  /// Returns a mutable reference to the value stored under `key`.
  ///
  /// ## Errors
  /// - [`Error::KeyNotFound`] if no entry has the key.
  pub fn get_mut(&mut self, key: i64) -> Result<&mut V, Error> {
    match self.find(key) {
      Some(id) => Ok(&mut self.arena.get_mut(id).value),
      None => Err(Error::KeyNotFound(key)),
    }
  }

  /// Returns `true` if an entry with `key` exists.
  #[inline]
  pub fn contains_key(&self, key: i64) -> bool {
    self.find(key).is_some()
  }

  /// Inserts `value` under `key`. Never fails.
  ///
  /// If the key already exists its value is replaced in place and the old
  /// value is returned; the structure of the list does not change. Otherwise a
  /// new node with a freshly drawn height is linked in and `None` is returned.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use pskl::SkipList;
  ///
  /// let mut list = SkipList::new(4, 0.5);
  /// assert_eq!(list.insert(7, "first"), None);
  /// assert_eq!(list.insert(7, "second"), Some("first"));
  /// assert_eq!(list.get(7), Ok(&"second"));
  /// assert_eq!(list.len(), 1);
  /// ```
  pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
    let mut update: Update = [Cursor::Head; MAX_LEVEL + 1];
    let candidate = self.descend(key, |level, at| update[level] = at);

    if let Some(id) = candidate {
      let node = self.arena.get_mut(id);
      if node.key == key {
        return Some(mem::replace(&mut node.value, value));
      }
    }

    let height = self.levels.random_level();
    assert!(
      height <= self.max_level,
      "level generator returned level {height} above max level {}",
      self.max_level
    );

    if height > self.level {
      // No real predecessor exists yet on the new levels.
      for at in &mut update[self.level + 1..=height] {
        *at = Cursor::Head;
      }

      #[cfg(feature = "tracing")]
      tracing::trace!(from = self.level, to = height, "raised skiplist level");

      self.level = height;
    }

    let id = self.arena.alloc(Node::new(key, value, height));
    for (level, &prev) in update[..=height].iter().enumerate() {
      let next = self.next(prev, level);
      self.arena.get_mut(id).set_next(level, next);
      self.set_next(prev, level, Some(id));
    }
    None
  }

  /// Removes the entry under `key` and returns its value.
  ///
  /// ## Errors
  /// - [`Error::KeyNotFound`] if no entry has the key. The list is left
  ///   untouched.
  pub fn remove(&mut self, key: i64) -> Result<V, Error> {
    let mut update: Update = [Cursor::Head; MAX_LEVEL + 1];
    let target = match self.descend(key, |level, at| update[level] = at) {
      Some(id) if self.arena.get(id).key == key => id,
      _ => return Err(Error::KeyNotFound(key)),
    };

    for (level, &prev) in update[..=self.level].iter().enumerate() {
      // Nodes occupy a contiguous prefix of levels, so the first level not
      // linking the target ends the unlinking.
      if self.next(prev, level) != Some(target) {
        break;
      }
      let next = self.arena.get(target).next(level);
      self.set_next(prev, level, next);
    }

    let node = self.arena.dealloc(target);
    self.shrink_level();
    Ok(node.value)
  }

  /// Removes every entry. The level cap and the generator are kept.
  pub fn clear(&mut self) {
    self.arena.clear();
    self.head.iter_mut().for_each(|link| *link = None);
    self.level = 0;
  }

  fn find(&self, key: i64) -> Option<NodeId> {
    self
      .descend(key, |_, _| {})
      .filter(|id| self.arena.get(*id).key == key)
  }

  /// Walks from the top active level down to level 0, advancing on each level
  /// while the next key is less than `key`. `record` receives the last node
  /// visited on every level. Returns the level 0 successor of the final
  /// position, the only node that can hold `key`.
  fn descend(&self, key: i64, mut record: impl FnMut(usize, Cursor)) -> Link {
    debug_assert_eq!(self.head.len(), self.max_level + 1, "malformed head links");

    let mut at = Cursor::Head;
    for level in (0..=self.level).rev() {
      while let Some(next) = self.next(at, level) {
        if self.arena.get(next).key >= key {
          break;
        }
        at = Cursor::Node(next);
      }
      record(level, at);
    }
    self.next(at, 0)
  }

  /// Lowers `level` past every emptied top level.
  fn shrink_level(&mut self) {
    #[cfg(feature = "tracing")]
    let before = self.level;

    while self.level > 0 && self.head[self.level].is_none() {
      self.level -= 1;
    }

    #[cfg(feature = "tracing")]
    if before != self.level {
      tracing::trace!(from = before, to = self.level, "shrank skiplist level");
    }
  }

  #[inline]
  fn next(&self, at: Cursor, level: usize) -> Link {
    match at {
      Cursor::Head => self.head[level],
      Cursor::Node(id) => self.arena.get(id).next(level),
    }
  }

  #[inline]
  fn set_next(&mut self, at: Cursor, level: usize, next: Link) {
    match at {
      Cursor::Head => self.head[level] = next,
      Cursor::Node(id) => self.arena.get_mut(id).set_next(level, next),
    }
  }

  /// Nodes linked on `level`, in chain order.
  fn chain(&self, level: usize) -> impl Iterator<Item = NodeId> + '_ {
    iter::successors(self.head[level], move |id| self.arena.get(*id).next(level))
  }
}

impl<V: fmt::Debug, G: LevelGenerator> fmt::Debug for SkipList<V, G> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    struct Chain<'a, V, G>(&'a SkipList<V, G>, usize);

    impl<V, G: LevelGenerator> fmt::Debug for Chain<'_, V, G> {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0;
        f.debug_list()
          .entries(list.chain(self.1).map(|id| list.arena.get(id).key))
          .finish()
      }
    }

    struct Levels<'a, V, G>(&'a SkipList<V, G>);

    impl<V, G: LevelGenerator> fmt::Debug for Levels<'_, V, G> {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0;
        f.debug_map()
          .entries((0..=list.level).rev().map(|level| (level, Chain(list, level))))
          .finish()
      }
    }

    struct Entries<'a, V, G>(&'a SkipList<V, G>);

    impl<V: fmt::Debug, G: LevelGenerator> fmt::Debug for Entries<'_, V, G> {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0;
        f.debug_map()
          .entries(list.chain(0).map(|id| {
            let node = list.arena.get(id);
            (node.key, &node.value)
          }))
          .finish()
      }
    }

    f.debug_struct("SkipList")
      .field("len", &self.len())
      .field("level", &self.level)
      .field("max_level", &self.max_level)
      .field("levels", &Levels(self))
      .field("entries", &Entries(self))
      .finish()
  }
}
