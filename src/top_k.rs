use ahash::RandomState;
use tracing::{debug, trace};

use crate::count_min::CountMinSketch;
use crate::error::{ensure_positive, Result};
use crate::hash_family::{HashFamily, SeededHasher};
use crate::priority_queue::SlotHeap;

const MIN_WIDTH: usize = 100;
const MIN_DEPTH: usize = 3;

/// Sketch dimensions for a tracker of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchDimensions {
    pub width: usize,
    pub depth: usize,
}

impl SketchDimensions {
    /// Default sizing taken from the HeavyKeeper evaluation:
    /// `width = max(100, ceil(k ln k))`, `depth = max(3, ceil(ln k))`.
    ///
    /// This is an empirical starting point, not a bound; use
    /// [`TopK::with_dimensions`] to tune it.
    pub fn for_k(k: usize) -> Self {
        let ln_k = (k.max(1) as f64).ln();
        let width = (k as f64 * ln_k).ceil() as usize;
        let depth = ln_k.ceil() as usize;

        SketchDimensions {
            width: width.max(MIN_WIDTH),
            depth: depth.max(MIN_DEPTH),
        }
    }
}

/// An entry of [`TopK::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyHitter {
    pub key: String,
    pub frequency: u32,
}

/// Tracks the `k` most frequent keys of a stream.
///
/// Frequencies come from an owned [`CountMinSketch`]; the candidates live in
/// `k` fixed heap slots whose root is always the smallest tracked frequency.
/// A key that is already tracked is refreshed in place. A new key only gets
/// in by overwriting the root, and only when its estimate reaches the root's
/// frequency.
///
/// Not synchronised. Callers sharing a tracker across threads must guard the
/// whole tracker with one lock so that the sketch update and the heap update
/// of an `add` are seen together.
pub struct TopK<H = SeededHasher> {
    sketch: CountMinSketch<H>,
    heap: SlotHeap,
}

impl TopK {
    pub fn new(k: usize) -> Result<Self> {
        ensure_positive("k", k)?;
        let SketchDimensions { width, depth } = SketchDimensions::for_k(k);
        Self::with_dimensions(k, width, depth)
    }

    pub fn with_dimensions(k: usize, width: usize, depth: usize) -> Result<Self> {
        Self::with_hasher(k, width, depth, SeededHasher::default())
    }
}

impl<H: HashFamily> TopK<H> {
    pub fn with_hasher(k: usize, width: usize, depth: usize, hasher: H) -> Result<Self> {
        ensure_positive("k", k)?;
        let sketch = CountMinSketch::with_hasher(width, depth, hasher)?;

        debug!(k, width, depth, "creating top-k tracker");
        Ok(TopK {
            sketch,
            heap: SlotHeap::with_capacity_and_hasher(k, RandomState::new()),
        })
    }

    pub fn k(&self) -> usize {
        self.heap.capacity()
    }

    pub fn dimensions(&self) -> SketchDimensions {
        SketchDimensions {
            width: self.sketch.width(),
            depth: self.sketch.depth(),
        }
    }

    /// Number of slots holding a key.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.len() == 0
    }

    /// Smallest frequency among the `k` slots; 0 while any slot is empty.
    pub fn min_frequency(&self) -> u32 {
        self.heap.min_frequency()
    }

    /// Records one occurrence of `key`.
    ///
    /// Returns the key pushed out of the top-k to make room, if any. Filling
    /// a still-empty slot evicts nothing.
    pub fn add(&mut self, key: &str) -> Option<String> {
        self.sketch.add(key);
        let freq = self.sketch.estimate(key);

        if freq < self.heap.min_frequency() {
            return None;
        }

        if let Some(pos) = self.heap.position(key) {
            self.heap.refresh(pos, freq);
            return None;
        }

        let evicted = self.heap.replace_root(key.to_owned(), freq);
        if let Some(old) = &evicted {
            trace!(evicted = %old, admitted = key, frequency = freq, "evicted heavy hitter");
        }
        evicted
    }

    /// Frequency recorded for `key` the last time its slot was synced, or 0
    /// if it is not tracked. This can trail [`TopK::estimate`].
    pub fn query(&self, key: &str) -> u32 {
        self.heap.get(key).unwrap_or(0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.heap.position(key).is_some()
    }

    /// Live sketch estimate for `key`, tracked or not.
    pub fn estimate(&self, key: &str) -> u32 {
        self.sketch.estimate(key)
    }

    /// Snapshot of the tracked keys, highest frequency first. Ties keep
    /// their slot order.
    pub fn list(&self) -> Vec<HeavyHitter> {
        let mut nodes: Vec<HeavyHitter> = self
            .heap
            .slots()
            .iter()
            .filter_map(|slot| {
                slot.key.as_ref().map(|key| HeavyHitter {
                    key: key.clone(),
                    frequency: slot.frequency,
                })
            })
            .collect();
        // `sort_by` is stable.
        nodes.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        nodes.retain(|node| node.frequency > 0);
        nodes
    }

    pub fn reset(&mut self) {
        self.sketch.reset();
        self.heap.clear();
        debug!(k = self.k(), "reset top-k tracker");
    }
}
