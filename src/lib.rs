//! Bounded-memory frequency estimation and Top-K heavy hitter tracking.
//!
//! [`CountMinSketch`] estimates how often a key has been seen using a fixed
//! `depth x width` table of counters. Estimates never fall below the true
//! count; hash collisions can only inflate them.
//!
//! [`TopK`] keeps the `k` keys with the largest estimates in a min-heap of
//! fixed slots, in the style of Redis' `TOPK.ADD`: adding a key reports the
//! key it pushed out, if any.
//!
//! ```
//! use countmin_topk::TopK;
//!
//! let mut topk = TopK::new(2).unwrap();
//! for key in ["a", "a", "a", "b", "b", "c"] {
//!     topk.add(key);
//! }
//! assert_eq!(topk.add("c"), Some("b".to_string()));
//! assert_eq!(topk.list()[0].key, "a");
//! ```

mod count_min;
pub use count_min::CountMinSketch;

mod error;
pub use error::{Error, Result};

mod hash_family;
pub use hash_family::{HashFamily, SeededHasher};

mod priority_queue;

mod top_k;
pub use top_k::{HeavyHitter, SketchDimensions, TopK};
