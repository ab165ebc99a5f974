//! Node height selection.
//!
//! Every node lives on level 0 and, with probability `p`, is promoted to the
//! next level, repeatedly, until a promotion fails or the maximum level is hit.
//! The resulting heights follow a truncated geometric distribution with
//! `P(level >= k) = p^k`.

use rand::{rngs::SmallRng, RngCore, SeedableRng};

use super::{Options, MAX_LEVEL};

/// Decides how many levels a freshly inserted node participates in.
///
/// The skiplist calls [`random_level`](LevelGenerator::random_level) once per
/// inserted key. Implementations must never return a level above
/// [`max_level`](LevelGenerator::max_level).
pub trait LevelGenerator {
  /// Returns the highest level (0-indexed) this generator can produce.
  fn max_level(&self) -> usize;

  /// Returns a level in `[0, max_level]` for a new node.
  fn random_level(&mut self) -> usize;
}

impl<G: LevelGenerator + ?Sized> LevelGenerator for &mut G {
  #[inline]
  fn max_level(&self) -> usize {
    (**self).max_level()
  }

  #[inline]
  fn random_level(&mut self) -> usize {
    (**self).random_level()
  }
}

/// The default [`LevelGenerator`], producing geometrically distributed levels.
///
/// The cumulative promotion probabilities are precomputed into a threshold
/// table, so only a single random number is drawn per generated level.
#[derive(Debug, Clone)]
pub struct Geometric<R = SmallRng> {
  max_level: usize,
  p: f64,
  /// `thresholds[k] = u32::MAX * p^k`, a draw `<= thresholds[k]` reaches level `k`.
  thresholds: [u32; MAX_LEVEL + 1],
  rng: R,
}

impl Geometric {
  /// Creates a generator seeded from the operating system's entropy source.
  ///
  /// `max_level` is clamped to [`MAX_LEVEL`], an invalid `p` is replaced by
  /// [`DEFAULT_PROBABILITY`](crate::DEFAULT_PROBABILITY).
  #[inline]
  pub fn new(max_level: usize, p: f64) -> Self {
    Self::with_rng(max_level, p, SmallRng::from_os_rng())
  }

  /// Creates a deterministic generator. Two generators built from the same
  /// arguments produce the same sequence of levels.
  ///
  /// Meant for tests and reproducible benchmarks, not for lists exposed to
  /// untrusted key streams.
  #[inline]
  pub fn with_seed(max_level: usize, p: f64, seed: u64) -> Self {
    Self::with_rng(max_level, p, SmallRng::seed_from_u64(seed))
  }
}

impl<R: RngCore> Geometric<R> {
  /// Creates a generator drawing from the given random source.
  pub fn with_rng(max_level: usize, p: f64, rng: R) -> Self {
    let opts = Options::new()
      .with_max_level(max_level)
      .with_probability(p)
      .sanitize();
    Self::from_options(opts, rng)
  }

  pub(crate) fn from_options(opts: Options, rng: R) -> Self {
    let max_level = opts.max_level();
    let p = opts.probability();
    assert!(max_level <= MAX_LEVEL, "max level {max_level} exceeds {MAX_LEVEL}");

    let mut thresholds = [0; MAX_LEVEL + 1];
    let mut cumulative = 1f64;
    for threshold in thresholds.iter_mut() {
      *threshold = ((u32::MAX as f64) * cumulative) as u32;
      cumulative *= p;
    }

    Self {
      max_level,
      p,
      thresholds,
      rng,
    }
  }

  /// Returns the promotion probability.
  #[inline]
  pub const fn probability(&self) -> f64 {
    self.p
  }
}

impl<R: RngCore> LevelGenerator for Geometric<R> {
  #[inline]
  fn max_level(&self) -> usize {
    self.max_level
  }

  fn random_level(&mut self) -> usize {
    let rnd = self.rng.next_u32();
    let mut level = 0;

    while level < self.max_level && rnd <= self.thresholds[level + 1] {
      level += 1;
    }
    level
  }
}
