//! # seadawg-core
//!
//! The SeaDawg engine - a Compact Directed Acyclic Word Graph (CDAWG) that
//! indexes a growing and shrinking set of texts in one shared graph.
//!
//! ## Operations
//!
//! - `add` extends the graph online, one symbol at a time
//! - `find_exact` follows a text from source to its sink
//! - `delete` retracts a text and recompacts what only it used
//! - `find_with_prefix` / `find_with_substring` enumerate matching texts
//!
//! Each text ends in a sink that carries a caller payload. Symbols are
//! opaque to the engine: any `Clone + Ord + Hash + Debug` type works.
//!
//! ## Architectural Constraints
//!
//! - Single-threaded and synchronous; mutation goes through `&mut self`
//! - In-memory only; nothing is persisted
//! - Deterministic: `BTreeMap` storage, fixed-seed hashing, no floats

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod dawg;
pub mod filter;
pub mod graph;
pub mod inspect;
pub mod map;
pub mod primitives;
pub mod traversal;
pub mod types;

mod construction;
mod deletion;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use config::{FilterConfig, SeaDawgConfig};
pub use dawg::SeaDawg;
pub use filter::ScalableBloomFilter;
pub use graph::{Destination, Edge, Graph, Label, Node, Sink};
pub use inspect::{EdgeSnapshot, GraphMetrics, GraphSnapshot, NodeSnapshot, SinkSnapshot, SnapshotTarget};
pub use map::SeaDawgMap;
pub use traversal::{Match, TraversalContext, TraversalMode, TraversalStrategy};
pub use types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};
