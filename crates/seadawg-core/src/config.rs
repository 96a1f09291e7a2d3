//! # Engine Configuration
//!
//! Tunables injected into a [`crate::SeaDawg`] at construction time.
//! Every field has a default, so an empty TOML table or `{}` is a valid
//! configuration.

use crate::primitives::{
    DEFAULT_FILTER_CAPACITY, DEFAULT_FILTER_GROWTH_FACTOR, DEFAULT_FILTER_HASH_FUNCTIONS,
    DEFAULT_MAX_TEXT_LENGTH, MAX_FILTER_HASH_FUNCTIONS,
};
use crate::types::SeaDawgError;
use serde::{Deserialize, Serialize};

/// Behaviour switches and limits for one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeaDawgConfig {
    /// Emit a `trace` event for every split, separation, merge and reclaim.
    pub trace_mutations: bool,
    /// Run [`crate::SeaDawg::check_invariants`] after every add and delete.
    pub verify_invariants: bool,
    /// Longest text accepted by `add`, in symbols.
    pub max_text_length: usize,
    /// Sizing of the substring duplicate filter.
    pub duplicate_filter: FilterConfig,
}

impl Default for SeaDawgConfig {
    fn default() -> Self {
        Self {
            trace_mutations: false,
            verify_invariants: false,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            duplicate_filter: FilterConfig::default(),
        }
    }
}

/// Sizing of a [`crate::filter::ScalableBloomFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Items the first stage holds before a new stage is added.
    pub initial_capacity: usize,
    /// Hash functions of the first stage; each later stage adds one.
    pub hash_functions: u32,
    /// Capacity multiplier between consecutive stages.
    pub growth_factor: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_FILTER_CAPACITY,
            hash_functions: DEFAULT_FILTER_HASH_FUNCTIONS,
            growth_factor: DEFAULT_FILTER_GROWTH_FACTOR,
        }
    }
}

impl SeaDawgConfig {
    /// Check every limit, returning the first problem found.
    pub fn validate(&self) -> Result<(), SeaDawgError> {
        if self.max_text_length == 0 {
            return Err(SeaDawgError::InvalidConfig(
                "max_text_length must be positive".to_string(),
            ));
        }
        self.duplicate_filter.validate()
    }
}

impl FilterConfig {
    /// Check the filter sizing.
    pub fn validate(&self) -> Result<(), SeaDawgError> {
        if self.initial_capacity == 0 {
            return Err(SeaDawgError::InvalidConfig(
                "duplicate_filter.initial_capacity must be positive".to_string(),
            ));
        }
        if self.hash_functions == 0 || self.hash_functions > MAX_FILTER_HASH_FUNCTIONS {
            return Err(SeaDawgError::InvalidConfig(format!(
                "duplicate_filter.hash_functions must be within 1..={MAX_FILTER_HASH_FUNCTIONS}"
            )));
        }
        if self.growth_factor < 2 {
            return Err(SeaDawgError::InvalidConfig(
                "duplicate_filter.growth_factor must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}
