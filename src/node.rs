use core::mem;
use std::{boxed::Box, vec, vec::Vec};

/// Stable handle of a node inside an [`Arena`].
///
/// A handle stays valid until the node is deallocated; the slot may then be
/// handed out again for a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
  #[inline]
  pub(crate) const fn index(self) -> usize {
    self.0
  }
}

/// A forward reference, `None` marks the end of a level's chain.
pub(crate) type Link = Option<NodeId>;

#[derive(Debug)]
pub(crate) struct Node<V> {
  pub(crate) key: i64,
  pub(crate) value: V,
  /// `forward[i]` is the successor on level `i`, the length is `level + 1`.
  forward: Box<[Link]>,
}

impl<V> Node<V> {
  #[inline]
  pub(crate) fn new(key: i64, value: V, level: usize) -> Self {
    Self {
      key,
      value,
      forward: vec![None; level + 1].into_boxed_slice(),
    }
  }

  /// Returns the highest level this node participates in.
  #[cfg(test)]
  #[inline]
  pub(crate) fn level(&self) -> usize {
    self.forward.len() - 1
  }

  #[inline]
  pub(crate) fn next(&self, level: usize) -> Link {
    self.forward[level]
  }

  #[inline]
  pub(crate) fn set_next(&mut self, level: usize, next: Link) {
    self.forward[level] = next;
  }
}

#[derive(Debug)]
enum Slot<V> {
  Occupied(Node<V>),
  Vacant { next_free: Option<NodeId> },
}

/// Owns every node of a skiplist and hands out [`NodeId`]s for them.
///
/// Vacated slots are threaded onto a free list and reused by later
/// allocations, so memory stays proportional to the peak number of entries.
#[derive(Debug)]
pub(crate) struct Arena<V> {
  slots: Vec<Slot<V>>,
  free: Option<NodeId>,
  len: usize,
}

impl<V> Default for Arena<V> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<V> Arena<V> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      slots: Vec::new(),
      free: None,
      len: 0,
    }
  }

  /// Returns the number of live nodes.
  #[inline]
  pub(crate) const fn len(&self) -> usize {
    self.len
  }

  /// Returns the number of slots, live or vacant.
  #[cfg(test)]
  #[inline]
  pub(crate) fn capacity(&self) -> usize {
    self.slots.len()
  }

  pub(crate) fn alloc(&mut self, node: Node<V>) -> NodeId {
    self.len += 1;
    match self.free {
      Some(id) => {
        let slot = &mut self.slots[id.index()];
        match slot {
          Slot::Vacant { next_free } => self.free = *next_free,
          Slot::Occupied(_) => panic!("free list points at an occupied slot {}", id.index()),
        }
        *slot = Slot::Occupied(node);
        id
      }
      None => {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot::Occupied(node));
        id
      }
    }
  }

  /// Removes the node from the arena and returns it.
  ///
  /// ## Panics
  /// - The slot is already vacant.
  pub(crate) fn dealloc(&mut self, id: NodeId) -> Node<V> {
    let vacant = Slot::Vacant {
      next_free: self.free,
    };
    match mem::replace(&mut self.slots[id.index()], vacant) {
      Slot::Occupied(node) => {
        self.free = Some(id);
        self.len -= 1;
        node
      }
      Slot::Vacant { .. } => panic!("double free of node {}", id.index()),
    }
  }

  /// ## Panics
  /// - The slot is vacant, i.e. the handle outlived its node.
  #[inline]
  pub(crate) fn get(&self, id: NodeId) -> &Node<V> {
    match &self.slots[id.index()] {
      Slot::Occupied(node) => node,
      Slot::Vacant { .. } => panic!("dangling node handle {}", id.index()),
    }
  }

  /// ## Panics
  /// - The slot is vacant, i.e. the handle outlived its node.
  #[inline]
  pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<V> {
    match &mut self.slots[id.index()] {
      Slot::Occupied(node) => node,
      Slot::Vacant { .. } => panic!("dangling node handle {}", id.index()),
    }
  }

  /// Drops every node and releases the slot storage.
  pub(crate) fn clear(&mut self) {
    self.slots.clear();
    self.free = None;
    self.len = 0;
  }
}
