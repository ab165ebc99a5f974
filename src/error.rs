/// Error type for the [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
  /// Indicates that no entry with the given key exists in the skiplist.
  ///
  /// Returned by lookups and removals; the skiplist is never modified when
  /// this error is produced.
  KeyNotFound(i64),
}

impl Error {
  /// Returns the key the failed operation was looking for.
  #[inline]
  pub const fn key(&self) -> i64 {
    match self {
      Self::KeyNotFound(key) => *key,
    }
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::KeyNotFound(key) => write!(f, "key {key} not found in the skiplist"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
