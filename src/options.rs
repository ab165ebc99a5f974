use super::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL};

/// Options for [`SkipList`](crate::SkipList).
#[viewit::viewit(vis_all = "pub(super)", getters(skip), setters(skip))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
  max_level: usize,
  probability: f64,
}

impl Default for Options {
  #[inline]
  fn default() -> Options {
    Options::new()
  }
}

impl Options {
  /// Creates a new set of options with the default values.
  ///
  /// The default maximum level is [`DEFAULT_MAX_LEVEL`] and the default
  /// promotion probability is [`DEFAULT_PROBABILITY`].
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_level: DEFAULT_MAX_LEVEL,
      probability: DEFAULT_PROBABILITY,
    }
  }

  /// Set the highest level (0-indexed) any node may occupy.
  ///
  /// A maximum level of `0` turns the skiplist into a plain sorted singly-linked
  /// list. Values above [`MAX_LEVEL`] are clamped to [`MAX_LEVEL`].
  ///
  /// ## Example
  ///
  /// ```rust
  /// use pskl::Options;
  ///
  /// let opts = Options::new().with_max_level(8);
  /// assert_eq!(opts.max_level(), 8);
  ///
  /// let opts = Options::new().with_max_level(1000);
  /// assert_eq!(opts.max_level(), pskl::MAX_LEVEL);
  /// ```
  #[inline]
  pub const fn with_max_level(mut self, max_level: usize) -> Self {
    self.max_level = if max_level > MAX_LEVEL {
      MAX_LEVEL
    } else {
      max_level
    };
    self
  }

  /// Set the probability that a node on level `k` is promoted to level `k + 1`.
  ///
  /// The probability must lie in the open interval `(0, 1)`. Anything else,
  /// `NaN` included, is replaced by [`DEFAULT_PROBABILITY`] when the skiplist
  /// is constructed; no error is reported.
  ///
  /// ## Example
  ///
  /// ```rust
  /// use pskl::Options;
  ///
  /// let opts = Options::new().with_probability(0.25);
  /// assert_eq!(opts.probability(), 0.25);
  /// ```
  #[inline]
  pub const fn with_probability(mut self, probability: f64) -> Self {
    self.probability = probability;
    self
  }

  /// Returns the highest level (0-indexed) a node may occupy.
  #[inline]
  pub const fn max_level(&self) -> usize {
    self.max_level
  }

  /// Returns the configured promotion probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.probability
  }

  /// Returns `true` if `p` is usable as a promotion probability.
  #[inline]
  pub fn is_valid_probability(p: f64) -> bool {
    p > 0.0 && p < 1.0
  }

  pub(crate) fn sanitize(mut self) -> Self {
    if self.max_level > MAX_LEVEL {
      self.max_level = MAX_LEVEL;
    }

    if !Self::is_valid_probability(self.probability) {
      #[cfg(feature = "tracing")]
      tracing::warn!(
        "promotion probability {} is outside (0, 1), falling back to {}",
        self.probability,
        DEFAULT_PROBABILITY
      );
      self.probability = DEFAULT_PROBABILITY;
    }
    self
  }
}
