//! # Inspection
//!
//! Read-only views of an index for debugging and tooling:
//! - [`SeaDawg::check_invariants`] verifies the structural invariants
//! - [`SeaDawg::metrics`] summarizes graph size
//! - [`SeaDawg::snapshot`] renders the graph as a serializable dump
//!
//! Snapshots are ordered by id, so two identical graphs serialize
//! identically.

use crate::dawg::SeaDawg;
use crate::graph::{Destination, Graph};
use crate::types::{SeaDawgError, SeaSymbol};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

// =============================================================================
// METRICS
// =============================================================================

/// Size summary of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphMetrics {
    /// Indexed texts (live sinks).
    pub text_count: usize,
    /// Explicit nodes, root and source included.
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges whose end tracks their sink.
    pub open_edge_count: usize,
    /// Longest string ending at an explicit node.
    pub max_node_length: i64,
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Serializable dump of the whole graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub root: u64,
    pub source: u64,
    pub nodes: Vec<NodeSnapshot>,
    pub sinks: Vec<SinkSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: u64,
    pub length: i64,
    pub suffix: Option<u64>,
    pub edges: Vec<EdgeSnapshot>,
}

/// One outgoing edge. Terminators render as `$<sink id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub label: String,
    pub open: bool,
    pub target: SnapshotTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SnapshotTarget {
    Node(u64),
    Sink(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkSnapshot {
    pub id: u64,
    /// Text length including the terminator.
    pub length: usize,
    pub in_degree: usize,
}

// =============================================================================
// SEADAWG INSPECTION API
// =============================================================================

impl<S: SeaSymbol, P> SeaDawg<S, P> {
    /// Verify the structural invariants of the graph.
    ///
    /// Checked:
    /// - every node but root and source branches (out-degree >= 2)
    /// - outgoing keys equal the first symbol of their edge's label
    /// - incoming sets are exact inverses of the outgoing maps
    /// - open labels only lead to sinks; no label is empty
    /// - no edge reaches further than its destination's length
    /// - suffix links name live nodes
    /// - every sink is reachable
    pub fn check_invariants(&self) -> Result<(), SeaDawgError> {
        check_graph(self.graph())
    }

    /// Size summary.
    #[must_use]
    pub fn metrics(&self) -> GraphMetrics {
        let graph = self.graph();
        GraphMetrics {
            text_count: graph.sink_count(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            open_edge_count: graph
                .edges()
                .filter(|(_, edge)| edge.label().is_open())
                .count(),
            max_node_length: graph
                .nodes()
                .map(|(_, node)| node.length())
                .max()
                .unwrap_or_default(),
        }
    }
}

impl<S: SeaSymbol + Display, P> SeaDawg<S, P> {
    /// Serializable dump of the graph.
    pub fn snapshot(&self) -> Result<GraphSnapshot, SeaDawgError> {
        let graph = self.graph();
        let mut nodes = Vec::with_capacity(graph.node_count());
        for (id, node) in graph.nodes() {
            let mut edges = Vec::with_capacity(node.out_degree());
            for (_, edge_id) in node.outgoing() {
                let edge = graph.edge(edge_id)?;
                let label = graph
                    .symbols(edge_id)?
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                let target = match edge.destination() {
                    Destination::Node(node) => SnapshotTarget::Node(node.0),
                    Destination::Sink(sink) => SnapshotTarget::Sink(sink.0),
                };
                edges.push(EdgeSnapshot {
                    label,
                    open: edge.label().is_open(),
                    target,
                });
            }
            nodes.push(NodeSnapshot {
                id: id.0,
                length: node.length(),
                suffix: node.suffix().map(|suffix| suffix.0),
                edges,
            });
        }
        let sinks = graph
            .sinks()
            .map(|(id, sink)| SinkSnapshot {
                id: id.0,
                length: sink.length(),
                in_degree: sink.in_degree(),
            })
            .collect();
        Ok(GraphSnapshot {
            root: graph.root().0,
            source: graph.source().0,
            nodes,
            sinks,
        })
    }
}

// =============================================================================
// INVARIANT CHECK
// =============================================================================

fn violation(detail: String) -> SeaDawgError {
    SeaDawgError::invariant("check_invariants", detail)
}

fn check_graph<S: SeaSymbol, P>(graph: &Graph<S, P>) -> Result<(), SeaDawgError> {
    let (root, source) = (graph.root(), graph.source());

    for (id, node) in graph.nodes() {
        if id != root && id != source && node.out_degree() < 2 {
            return Err(violation(format!(
                "{id} has out-degree {}",
                node.out_degree()
            )));
        }
        if id != root {
            match node.suffix() {
                Some(suffix) if graph.contains_node(suffix) => {}
                Some(suffix) => {
                    return Err(violation(format!("{id} links to reclaimed {suffix}")));
                }
                None => return Err(violation(format!("{id} has no suffix link"))),
            }
        }

        for (key, edge_id) in node.outgoing() {
            let edge = graph.edge(edge_id)?;
            if edge.source() != id {
                return Err(violation(format!("{edge_id} is listed on {id} but leaves {}", edge.source())));
            }
            let symbols = graph.symbols(edge_id)?;
            if symbols.first() != Some(key) {
                return Err(violation(format!("{edge_id} on {id} does not start with its key")));
            }
            let destination = edge.destination();
            let registered = match destination {
                Destination::Node(target) => graph.node(target)?.incoming().any(|e| e == edge_id),
                Destination::Sink(sink) => {
                    if !edge.label().is_open() && symbols.last().and_then(|s| s.terminator()) != Some(sink) {
                        return Err(violation(format!("{edge_id} into {sink} misses its terminator")));
                    }
                    graph.live_sink(sink)?.incoming().any(|e| e == edge_id)
                }
            };
            if !registered {
                return Err(violation(format!("{edge_id} missing from its destination's incoming set")));
            }
            if edge.label().is_open() && matches!(destination, Destination::Node(_)) {
                return Err(violation(format!("{edge_id} is open but leads to a node")));
            }
            let reach = node.length() + symbols.len() as i64;
            if reach > graph.destination_length(destination)? {
                return Err(violation(format!("{edge_id} reaches past its destination")));
            }
        }

        for edge_id in node.incoming() {
            if graph.edge(edge_id)?.destination() != Destination::Node(id) {
                return Err(violation(format!("{id} lists foreign incoming {edge_id}")));
            }
        }
    }

    for (id, sink) in graph.sinks() {
        if sink.in_degree() == 0 {
            return Err(violation(format!("{id} is unreachable")));
        }
        for edge_id in sink.incoming() {
            if graph.edge(edge_id)?.destination() != Destination::Sink(id) {
                return Err(violation(format!("{id} lists foreign incoming {edge_id}")));
            }
        }
    }

    for (edge_id, edge) in graph.edges() {
        let listed = graph
            .node(edge.source())?
            .outgoing()
            .any(|(_, id)| id == edge_id);
        if !listed {
            return Err(violation(format!("{edge_id} is not listed on its source")));
        }
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
