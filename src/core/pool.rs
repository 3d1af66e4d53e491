//! Draw Pool
//!
//! Numbers are drawn without replacement from `[1, N]`. The pool of numbers
//! still available at any point is that range minus everything claimed by
//! earlier draws, kept in ascending order. The derivation index selects
//! into that ordered sequence.
//!
//! Uses `BTreeSet` for sorted iteration, like the rest of the crate.

use std::collections::BTreeSet;

/// Numbers already claimed by earlier draws in a game.
///
/// Members outside `[1, N]` are kept but never affect the available pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawnPool {
    drawn: BTreeSet<u32>,
}

impl DrawnPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drawn number. Returns false if it was already present.
    pub fn insert(&mut self, number: u32) -> bool {
        self.drawn.insert(number)
    }

    /// Has this number been drawn?
    #[inline]
    pub fn contains(&self, number: u32) -> bool {
        self.drawn.contains(&number)
    }

    /// Number of distinct drawn numbers.
    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    /// True if nothing has been drawn yet.
    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    /// Drawn numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.drawn.iter().copied()
    }

    /// Numbers in `[1, pool_size]` not yet drawn, ascending.
    pub fn available(&self, pool_size: u32) -> Vec<u32> {
        self.available_iter(pool_size).collect()
    }

    /// Count of numbers in `[1, pool_size]` not yet drawn.
    pub fn available_count(&self, pool_size: u32) -> u32 {
        if pool_size == 0 {
            return 0;
        }
        let taken = self.drawn.range(1..=pool_size).count() as u32;
        pool_size - taken
    }

    /// The `index`-th available number (0-based), if any.
    pub fn nth_available(&self, pool_size: u32, index: u32) -> Option<u32> {
        self.available_iter(pool_size).nth(index as usize)
    }

    /// Select the next number for a seed value.
    ///
    /// Picks `available[seed_value % available.len()]`. Returns `None` when
    /// the pool is exhausted.
    pub fn derive_number(&self, pool_size: u32, seed_value: u32) -> Option<u32> {
        let remaining = self.available_count(pool_size);
        if remaining == 0 {
            return None;
        }
        self.nth_available(pool_size, seed_value % remaining)
    }

    fn available_iter(&self, pool_size: u32) -> impl Iterator<Item = u32> + '_ {
        (1..=pool_size).filter(move |n| !self.drawn.contains(n))
    }
}

impl FromIterator<u32> for DrawnPool {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            drawn: iter.into_iter().collect(),
        }
    }
}

impl Extend<u32> for DrawnPool {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        self.drawn.extend(iter);
    }
}
