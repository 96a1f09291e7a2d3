//! # Engine Primitives
//!
//! Hardcoded constants of the SeaDawg engine.
//!
//! These values are compiled into the binary. Tunables that callers may
//! override live in [`crate::config`]; the constants here are their defaults
//! and hard limits.

/// Length of the root node.
///
/// Root sits one position before source: every root edge has length 1 and
/// leads to source, so suffix-link chains always bottom out at root.
pub const ROOT_LENGTH: i64 = -1;

/// Length of the source node (the empty string).
pub const SOURCE_LENGTH: i64 = 0;

/// Default upper bound on the number of symbols in a single text.
///
/// - Construction allocates one shared label buffer per text.
/// - This prevents a single oversized insert from dominating memory.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 65_536;

/// Default number of items the first duplicate-filter stage is sized for.
pub const DEFAULT_FILTER_CAPACITY: usize = 64;

/// Default number of hash functions in the first duplicate-filter stage.
///
/// Each stage is sized at `capacity * k * 3 / 2` bits, which puts its false
/// positive rate at roughly `2^-k`.
pub const DEFAULT_FILTER_HASH_FUNCTIONS: u32 = 14;

/// Default capacity multiplier between consecutive filter stages.
pub const DEFAULT_FILTER_GROWTH_FACTOR: usize = 2;

/// Hard ceiling on hash functions per filter stage.
pub const MAX_FILTER_HASH_FUNCTIONS: u32 = 48;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_precedes_source() {
        assert_eq!(ROOT_LENGTH + 1, SOURCE_LENGTH);
    }

    #[test]
    fn filter_defaults_within_limits() {
        assert!(DEFAULT_FILTER_CAPACITY > 0);
        assert!(DEFAULT_FILTER_HASH_FUNCTIONS > 0);
        assert!(DEFAULT_FILTER_HASH_FUNCTIONS <= MAX_FILTER_HASH_FUNCTIONS);
        assert!(DEFAULT_FILTER_GROWTH_FACTOR >= 2);
    }
}
