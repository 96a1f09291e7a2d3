//! # Scalable Bloom Filter
//!
//! Membership filter used to report each substring match once.
//!
//! The filter is a chain of stages. When the newest stage reaches its
//! capacity a larger one is appended, with one more hash function so the
//! false positive rate of later stages shrinks geometrically. There are no
//! false negatives: an inserted item is always reported as present.
//!
//! Sizing is integer-only. A stage holding `n` items with `k` hash functions
//! gets `n * k * 3 / 2` bits, putting its false positive rate near `2^-k`.

use crate::config::FilterConfig;
use crate::primitives::MAX_FILTER_HASH_FUNCTIONS;
use ahash::RandomState;
use std::hash::Hash;

/// Chain of Bloom filter stages with fixed-seed double hashing.
#[derive(Clone, Debug)]
pub struct ScalableBloomFilter {
    stages: Vec<Stage>,
    growth_factor: usize,
    first: RandomState,
    second: RandomState,
    len: usize,
}

#[derive(Clone, Debug)]
struct Stage {
    /// Bit array stored as u64 words
    bits: Vec<u64>,
    num_bits: u64,
    num_hashes: u32,
    capacity: usize,
    items: usize,
}

impl Stage {
    fn new(capacity: usize, num_hashes: u32) -> Self {
        let wanted = capacity
            .saturating_mul(num_hashes as usize)
            .saturating_mul(3)
            / 2;
        let num_words = wanted.div_ceil(64).max(1);
        Self {
            bits: vec![0u64; num_words],
            num_bits: (num_words * 64) as u64,
            num_hashes,
            capacity,
            items: 0,
        }
    }

    fn positions(&self, (h1, h2): (u64, u64)) -> impl Iterator<Item = (usize, u64)> {
        let num_bits = self.num_bits;
        (0..u64::from(self.num_hashes)).map(move |i| {
            // Double hashing: h(i) = h1 + i*h2
            let bit = h1.wrapping_add(i.wrapping_mul(h2)) % num_bits;
            ((bit / 64) as usize, 1u64 << (bit % 64))
        })
    }

    fn contains(&self, hashes: (u64, u64)) -> bool {
        self.positions(hashes)
            .all(|(word, mask)| self.bits.get(word).is_some_and(|bits| bits & mask != 0))
    }

    fn insert(&mut self, hashes: (u64, u64)) {
        let positions: Vec<(usize, u64)> = self.positions(hashes).collect();
        for (word, mask) in positions {
            if let Some(bits) = self.bits.get_mut(word) {
                *bits |= mask;
            }
        }
        self.items += 1;
    }

    fn is_full(&self) -> bool {
        self.items >= self.capacity
    }
}

impl ScalableBloomFilter {
    /// Create a filter with a single stage sized by `config`.
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        let capacity = config.initial_capacity.max(1);
        let num_hashes = config.hash_functions.clamp(1, MAX_FILTER_HASH_FUNCTIONS);
        Self {
            stages: vec![Stage::new(capacity, num_hashes)],
            growth_factor: config.growth_factor.max(2),
            first: RandomState::with_seeds(0, 0, 0, 0),
            second: RandomState::with_seeds(
                0x517c_c1b7_2722_0a95,
                0x9e37_79b9_7f4a_7c15,
                0xbf58_476d_1ce4_e5b9,
                0x94d0_49bb_1331_11eb,
            ),
            len: 0,
        }
    }

    /// Whether `item` may have been inserted. `false` is definitive.
    #[must_use]
    pub fn contains<T: Hash + ?Sized>(&self, item: &T) -> bool {
        let hashes = self.hash_pair(item);
        self.stages.iter().any(|stage| stage.contains(hashes))
    }

    /// Insert `item`, returning `false` if it was (probably) present already.
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let hashes = self.hash_pair(item);
        if self.stages.iter().any(|stage| stage.contains(hashes)) {
            return false;
        }
        if self.stages.last().is_none_or(Stage::is_full) {
            let (capacity, num_hashes) = self.stages.last().map_or((1, 1), |stage| {
                (
                    stage.capacity.saturating_mul(self.growth_factor),
                    (stage.num_hashes + 1).min(MAX_FILTER_HASH_FUNCTIONS),
                )
            });
            self.stages.push(Stage::new(capacity, num_hashes));
        }
        if let Some(stage) = self.stages.last_mut() {
            stage.insert(hashes);
        }
        self.len += 1;
        true
    }

    /// Number of distinct items inserted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        // Two independently seeded hashers; an odd step keeps every probe
        // sequence from collapsing onto one bit.
        (self.first.hash_one(item), self.second.hash_one(item) | 1)
    }
}

impl Default for ScalableBloomFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}
