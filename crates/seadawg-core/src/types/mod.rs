//! # Core Type Definitions
//!
//! This module contains the core types shared by every SeaDawg component:
//! - Arena identifiers (`NodeId`, `EdgeId`, `SinkId`)
//! - Symbol representation (`Symbol`, `SeaSymbol`)
//! - Error types (`SeaDawgError`)
//!
//! ## Identity Guarantees
//!
//! Identifiers are allocated from monotonically increasing counters and are
//! never reused, so a stale id can only ever miss; it never aliases a newer
//! node, edge or sink.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

// =============================================================================
// ARENA IDENTIFIERS
// =============================================================================

/// Identifier of an explicit node (root, source or an internal state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

/// Identifier of a labeled edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

/// Identifier of a sink, the terminal state of exactly one indexed text.
///
/// The sink id doubles as the text's terminator symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SinkId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

// =============================================================================
// SYMBOLS
// =============================================================================

/// Bound for caller symbol types.
///
/// The engine treats symbols as atomic: it compares, orders and hashes
/// them, nothing else. `char`, `u8` and `u32` tokens all qualify.
pub trait SeaSymbol: Clone + Ord + Hash + fmt::Debug {}

impl<T: Clone + Ord + Hash + fmt::Debug> SeaSymbol for T {}

/// A symbol as stored on edge labels.
///
/// Every indexed text ends in `Terminator(id)` where `id` is its own sink,
/// so the terminator never collides with caller symbols and two texts never
/// share a terminal path. Terminators order before values, which makes
/// enumeration lexicographic with shorter texts first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol<S> {
    /// End of the text owned by the given sink.
    Terminator(SinkId),
    /// A caller symbol.
    Value(S),
}

impl<S> Symbol<S> {
    /// Returns the caller symbol, or `None` for a terminator.
    #[must_use]
    pub fn value(&self) -> Option<&S> {
        match self {
            Self::Value(value) => Some(value),
            Self::Terminator(_) => None,
        }
    }

    /// Returns the owning sink when this symbol is a terminator.
    #[must_use]
    pub fn terminator(&self) -> Option<SinkId> {
        match self {
            Self::Terminator(sink) => Some(*sink),
            Self::Value(_) => None,
        }
    }
}

impl<S: fmt::Display> fmt::Display for Symbol<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminator(sink) => write!(f, "{sink}"),
            Self::Value(value) => write!(f, "{value}"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the SeaDawg engine.
///
/// - Absence is never an error: lookups return `Option`, deletes return `bool`
/// - The engine should never panic; a broken internal precondition surfaces
///   as `InvariantViolation`
#[derive(Debug, Error)]
pub enum SeaDawgError {
    /// An internal structural precondition did not hold.
    #[error("Invariant violated during {operation}: {detail}")]
    InvariantViolation {
        operation: &'static str,
        detail: String,
    },

    /// The operation is not backed by the engine.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// The text exceeds the configured maximum length.
    #[error("Text of {len} symbols exceeds the maximum of {max}")]
    TextTooLong { len: usize, max: usize },

    /// The configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SeaDawgError {
    /// Shorthand for an [`SeaDawgError::InvariantViolation`].
    pub fn invariant(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            operation,
            detail: detail.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminators_order_before_values() {
        let mut symbols = vec![
            Symbol::Value('a'),
            Symbol::Terminator(SinkId(7)),
            Symbol::Value('0'),
            Symbol::Terminator(SinkId(2)),
        ];
        symbols.sort();
        assert_eq!(
            symbols,
            vec![
                Symbol::Terminator(SinkId(2)),
                Symbol::Terminator(SinkId(7)),
                Symbol::Value('0'),
                Symbol::Value('a'),
            ]
        );
    }

    #[test]
    fn symbol_accessors() {
        let value: Symbol<char> = Symbol::Value('x');
        let end: Symbol<char> = Symbol::Terminator(SinkId(3));
        assert_eq!(value.value(), Some(&'x'));
        assert_eq!(value.terminator(), None);
        assert_eq!(end.value(), None);
        assert_eq!(end.terminator(), Some(SinkId(3)));
    }

    #[test]
    fn display_formats() {
        assert_eq!(NodeId(4).to_string(), "n4");
        assert_eq!(EdgeId(9).to_string(), "e9");
        assert_eq!(Symbol::<char>::Terminator(SinkId(1)).to_string(), "$1");
        assert_eq!(Symbol::Value('q').to_string(), "q");
    }

    #[test]
    fn error_messages() {
        let err = SeaDawgError::invariant("canonize", "edge leads to a sink");
        assert_eq!(
            err.to_string(),
            "Invariant violated during canonize: edge leads to a sink"
        );
        let err = SeaDawgError::TextTooLong { len: 10, max: 4 };
        assert_eq!(err.to_string(), "Text of 10 symbols exceeds the maximum of 4");
    }
}
