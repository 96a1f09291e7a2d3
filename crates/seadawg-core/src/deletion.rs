//! # Deletion Engine
//!
//! Retracts one text from the graph while keeping every other text's path
//! intact.
//!
//! ## Strategy
//!
//! 1. Every edge into the text's sink is detached, as is root's bootstrap
//!    edge for the text's terminator.
//! 2. The sources of detached edges go onto a FIFO worklist. A node left
//!    with one outgoing edge no longer branches: its edge is merged into
//!    each incoming edge and the node is reclaimed. A node left with no
//!    outgoing edge is reclaimed together with its incoming edges, whose
//!    sources are queued in turn.
//!
//! Source and root (length `<= 0`) are never merged or reclaimed.

use crate::graph::{Destination, Graph, Label, Sink};
use crate::types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};
use std::collections::VecDeque;

/// Remove the text ending in `sink`, returning the released sink.
pub(crate) fn remove<S: SeaSymbol, P>(
    graph: &mut Graph<S, P>,
    sink: SinkId,
    trace: bool,
) -> Result<Sink<P>, SeaDawgError> {
    let incoming: Vec<EdgeId> = graph.live_sink(sink)?.incoming().collect();
    let mut worklist = VecDeque::with_capacity(incoming.len());
    for id in incoming {
        let edge = graph.detach_edge(id)?;
        worklist.push_back(edge.source());
    }
    let root = graph.root();
    graph.remove_edge(root, &Symbol::Terminator(sink))?;
    let released = graph.remove_sink(sink)?;

    while let Some(node) = worklist.pop_front() {
        if !graph.contains_node(node) {
            continue;
        }
        let current = graph.node(node)?;
        if current.length() <= 0 {
            continue;
        }
        match current.out_degree() {
            0 => reclaim(graph, node, &mut worklist, trace)?,
            1 => merge(graph, node, trace)?,
            _ => {}
        }
    }
    Ok(released)
}

/// Drop a node without outgoing edges along with every edge into it.
fn reclaim<S: SeaSymbol, P>(
    graph: &mut Graph<S, P>,
    node: NodeId,
    worklist: &mut VecDeque<NodeId>,
    trace: bool,
) -> Result<(), SeaDawgError> {
    let incoming: Vec<EdgeId> = graph.node(node)?.incoming().collect();
    for id in incoming {
        let edge = graph.detach_edge(id)?;
        worklist.push_back(edge.source());
    }
    graph.remove_node(node)?;
    if trace {
        tracing::trace!(node = %node, "reclaimed node");
    }
    Ok(())
}

/// Fold the single outgoing edge of `node` into each of its incoming edges,
/// then drop the node.
fn merge<S: SeaSymbol, P>(
    graph: &mut Graph<S, P>,
    node: NodeId,
    trace: bool,
) -> Result<(), SeaDawgError> {
    let current = graph.node(node)?;
    let length = current.length();
    let (_, sole) = current
        .outgoing()
        .next()
        .ok_or_else(|| SeaDawgError::invariant("merge", format!("{node} has no edge")))?;
    let incoming: Vec<EdgeId> = current.incoming().collect();
    let tail: Vec<Symbol<S>> = graph.symbols(sole)?.to_vec();
    let destination = graph.edge(sole)?.destination();

    for id in incoming {
        let source = graph.edge(id)?.source();
        let mut symbols = graph.symbols(id)?.to_vec();
        symbols.extend(tail.iter().cloned());
        graph.set_edge(source, Label::from_symbols(symbols), destination)?;
    }

    if let Destination::Node(target) = destination {
        let merged = length + tail.len() as i64;
        if graph.node(target)?.length() < merged {
            graph.set_length(target, merged)?;
        }
    }

    graph.detach_edge(sole)?;
    graph.remove_node(node)?;
    if trace {
        tracing::trace!(node = %node, into = ?destination, "merged node");
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::insert;

    fn build(words: &[&str]) -> (Graph<char, u32>, Vec<SinkId>) {
        let mut graph = Graph::new();
        let mut sinks = Vec::new();
        for (index, word) in words.iter().enumerate() {
            let text: Vec<char> = word.chars().collect();
            let sink = insert(&mut graph, &text, Sink::new(index as u32), false).expect("insert");
            sinks.push(sink);
        }
        (graph, sinks)
    }

    #[test]
    fn removing_only_text_empties_graph() {
        let (mut graph, sinks) = build(&["cocoa"]);
        let released = remove(&mut graph, sinks[0], false).expect("remove");
        assert_eq!(released.payload(), Some(&0));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.sink_count(), 0);
        assert_eq!(graph.node(graph.source()).expect("source").out_degree(), 0);
    }

    #[test]
    fn merge_recompacts_shared_prefix() {
        let (mut graph, sinks) = build(&["cocoa", "cola"]);
        remove(&mut graph, sinks[0], false).expect("remove");
        // Only "cola" is left, which has no repeated factor.
        assert_eq!(graph.node_count(), 2);
        let source = graph.node(graph.source()).expect("source");
        assert_eq!(source.out_degree(), 5);
        let edge = source.edge(&Symbol::Value('c')).expect("c edge");
        let label: Vec<Symbol<char>> = graph.symbols(edge).expect("symbols").to_vec();
        let mut expected: Vec<Symbol<char>> = "cola".chars().map(Symbol::Value).collect();
        expected.push(Symbol::Terminator(sinks[1]));
        assert_eq!(label, expected);
    }

    #[test]
    fn root_terminator_edge_removed() {
        let (mut graph, sinks) = build(&["ab", "b"]);
        remove(&mut graph, sinks[1], false).expect("remove");
        let root = graph.node(graph.root()).expect("root");
        assert!(root.edge(&Symbol::Terminator(sinks[1])).is_none());
        assert!(root.edge(&Symbol::Terminator(sinks[0])).is_some());
    }

    #[test]
    fn removing_unknown_sink_fails() {
        let (mut graph, _) = build(&["ab"]);
        assert!(remove(&mut graph, SinkId(99), false).is_err());
    }
}
