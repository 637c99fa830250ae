use tracing::debug;

use crate::error::{ensure_positive, Result};
use crate::hash_family::{HashFamily, SeededHasher};

/// A Count-Min sketch: `depth` rows of `width` saturating `u32` counters.
///
/// Each row hashes a key with its own seed (the row index) into one counter.
/// An estimate is the minimum of those counters, so it is never below the
/// true number of adds for the key; collisions can only push it up.
pub struct CountMinSketch<H = SeededHasher> {
    width: usize,
    depth: usize,
    counters: Vec<Vec<u32>>,
    hasher: H,
}

impl CountMinSketch {
    pub fn new(width: usize, depth: usize) -> Result<Self> {
        Self::with_hasher(width, depth, SeededHasher::default())
    }
}

impl<H: HashFamily> CountMinSketch<H> {
    pub fn with_hasher(width: usize, depth: usize, hasher: H) -> Result<Self> {
        ensure_positive("width", width)?;
        ensure_positive("depth", depth)?;

        debug!(width, depth, "allocating count-min sketch");
        Ok(CountMinSketch {
            width,
            depth,
            counters: vec![vec![0; width]; depth],
            hasher,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    fn bucket(&self, key: &[u8], row: usize) -> usize {
        (self.hasher.hash(key, row as u32) as usize) % self.width
    }

    pub fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        self.add_count(key, 1);
    }

    /// Adds `count` occurrences of `key`. Counters clamp at `u32::MAX`.
    pub fn add_count<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, count: u32) {
        let key = key.as_ref();
        for row in 0..self.depth {
            let idx = self.bucket(key, row);
            let counter = &mut self.counters[row][idx];
            *counter = counter.saturating_add(count);
        }
    }

    pub fn estimate<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u32 {
        let key = key.as_ref();
        (0..self.depth)
            .map(|row| self.counters[row][self.bucket(key, row)])
            .min()
            .unwrap_or(0)
    }

    pub fn reset(&mut self) {
        for row in &mut self.counters {
            row.fill(0);
        }
    }
}
