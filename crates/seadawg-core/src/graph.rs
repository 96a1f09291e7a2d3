//! # Graph Data Model
//!
//! Arena storage for the word graph: nodes, labeled edges and sinks, each in
//! its own id-keyed `BTreeMap`.
//!
//! ## Structure
//!
//! - **Root** (`length = -1`) holds one length-1 edge per first symbol ever
//!   seen, all leading to source. It anchors every suffix-link chain.
//! - **Source** (`length = 0`) is the start state; every indexed text is
//!   spelled by a path from source to that text's sink.
//! - Outgoing edges are keyed by the first symbol of their label, so no node
//!   can hold two edges starting with the same symbol.
//! - Incoming edge sets are maintained symmetrically with the outgoing maps
//!   by every mutation in this module.
//!
//! Labels reference a shared, reference-counted symbol buffer. An open
//! label extends to the current length of the sink it points at.

use crate::primitives::{ROOT_LENGTH, SOURCE_LENGTH};
use crate::types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

// =============================================================================
// DESTINATION
// =============================================================================

/// Target of an edge: an explicit node or the sink of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    Node(NodeId),
    Sink(SinkId),
}

// =============================================================================
// LABEL
// =============================================================================

/// A span `[start, end)` of a shared symbol buffer.
///
/// `end == None` marks an open label whose end tracks the destination
/// sink's length while that sink's text is being inserted.
#[derive(Debug, Clone)]
pub struct Label<S> {
    text: Rc<[Symbol<S>]>,
    start: usize,
    end: Option<usize>,
}

impl<S> Label<S> {
    /// Open label starting at `start`.
    pub(crate) fn open(text: Rc<[Symbol<S>]>, start: usize) -> Self {
        Self {
            text,
            start,
            end: None,
        }
    }

    /// Closed label `[start, end)`.
    pub(crate) fn closed(text: Rc<[Symbol<S>]>, start: usize, end: usize) -> Self {
        Self {
            text,
            start,
            end: Some(end),
        }
    }

    /// Closed label owning its own buffer.
    pub(crate) fn from_symbols(symbols: Vec<Symbol<S>>) -> Self {
        let end = symbols.len();
        Self::closed(Rc::from(symbols), 0, end)
    }

    /// Whether the end of this label tracks its sink.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// First `len` symbols. Always closed.
    pub(crate) fn head(&self, len: usize) -> Self {
        Self::closed(Rc::clone(&self.text), self.start, self.start + len)
    }

    /// Everything after the first `len` symbols. Openness is kept.
    pub(crate) fn tail(&self, len: usize) -> Self {
        Self {
            text: Rc::clone(&self.text),
            start: self.start + len,
            end: self.end,
        }
    }

    fn first(&self) -> Option<&Symbol<S>> {
        if self.end.is_some_and(|end| end <= self.start) {
            return None;
        }
        self.text.get(self.start)
    }

    fn resolve(&self, open_end: usize) -> &[Symbol<S>] {
        let end = self.end.unwrap_or(open_end).min(self.text.len());
        self.text.get(self.start..end).unwrap_or(&[])
    }

    fn same_span(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.text, &other.text) && self.start == other.start && self.end == other.end
    }
}

// =============================================================================
// EDGE / NODE / SINK
// =============================================================================

/// A labeled edge between a node and a node or sink.
#[derive(Debug, Clone)]
pub struct Edge<S> {
    source: NodeId,
    label: Label<S>,
    destination: Destination,
}

impl<S> Edge<S> {
    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[must_use]
    pub fn destination(&self) -> Destination {
        self.destination
    }

    #[must_use]
    pub fn label(&self) -> &Label<S> {
        &self.label
    }
}

/// An explicit state of the word graph.
#[derive(Debug, Clone)]
pub struct Node<S> {
    length: i64,
    suffix: Option<NodeId>,
    outgoing: BTreeMap<Symbol<S>, EdgeId>,
    incoming: BTreeSet<EdgeId>,
}

impl<S: SeaSymbol> Node<S> {
    fn new(length: i64, suffix: Option<NodeId>) -> Self {
        Self {
            length,
            suffix,
            outgoing: BTreeMap::new(),
            incoming: BTreeSet::new(),
        }
    }

    /// Length of the longest string ending at this node.
    #[must_use]
    pub fn length(&self) -> i64 {
        self.length
    }

    /// Suffix link. `None` only for root.
    #[must_use]
    pub fn suffix(&self) -> Option<NodeId> {
        self.suffix
    }

    #[must_use]
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Outgoing edge whose label starts with `symbol`.
    #[must_use]
    pub fn edge(&self, symbol: &Symbol<S>) -> Option<EdgeId> {
        self.outgoing.get(symbol).copied()
    }

    /// Outgoing edges in ascending key order.
    pub fn outgoing(&self) -> impl DoubleEndedIterator<Item = (&Symbol<S>, EdgeId)> {
        self.outgoing.iter().map(|(symbol, id)| (symbol, *id))
    }

    /// Incoming edges in ascending id order.
    pub fn incoming(&self) -> impl DoubleEndedIterator<Item = EdgeId> {
        self.incoming.iter().copied()
    }

    /// Terminator edges, i.e. texts that end exactly at this node.
    pub fn terminator_edges(&self) -> impl Iterator<Item = (SinkId, EdgeId)> {
        self.outgoing
            .iter()
            .map_while(|(symbol, id)| symbol.terminator().map(|sink| (sink, *id)))
    }
}

/// Terminal state of one indexed text, carrying the caller's payload.
#[derive(Debug, Clone)]
pub struct Sink<P> {
    length: usize,
    incoming: BTreeSet<EdgeId>,
    payload: Option<P>,
}

impl<P> Sink<P> {
    /// A sink carrying `payload`.
    #[must_use]
    pub fn new(payload: P) -> Self {
        Self {
            length: 0,
            incoming: BTreeSet::new(),
            payload: Some(payload),
        }
    }

    /// A sink without payload; the text's presence is the only information.
    #[must_use]
    pub fn marker() -> Self {
        Self {
            length: 0,
            incoming: BTreeSet::new(),
            payload: None,
        }
    }

    /// Length of the text including its terminator.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Length of the text without its terminator.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.length.saturating_sub(1)
    }

    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn payload_mut(&mut self) -> Option<&mut P> {
        self.payload.as_mut()
    }

    /// Replace the payload, returning the previous one.
    pub fn set_payload(&mut self, payload: Option<P>) -> Option<P> {
        std::mem::replace(&mut self.payload, payload)
    }

    pub fn into_payload(self) -> Option<P> {
        self.payload
    }

    #[must_use]
    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Incoming edges in ascending id order.
    pub fn incoming(&self) -> impl DoubleEndedIterator<Item = EdgeId> {
        self.incoming.iter().copied()
    }
}

impl<P> Default for Sink<P> {
    fn default() -> Self {
        Self::marker()
    }
}

// =============================================================================
// GRAPH
// =============================================================================

/// The word graph shared by every indexed text.
#[derive(Debug, Clone)]
pub struct Graph<S, P> {
    nodes: BTreeMap<NodeId, Node<S>>,
    edges: BTreeMap<EdgeId, Edge<S>>,
    sinks: BTreeMap<SinkId, Sink<P>>,
    root: NodeId,
    source: NodeId,
    next_node_id: u64,
    next_edge_id: u64,
    next_sink_id: u64,
}

impl<S: SeaSymbol, P> Default for Graph<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SeaSymbol, P> Graph<S, P> {
    /// Create a graph holding only root and source.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            sinks: BTreeMap::new(),
            root: NodeId(0),
            source: NodeId(0),
            next_node_id: 0,
            next_edge_id: 0,
            next_sink_id: 0,
        };
        graph.reset();
        graph
    }

    /// Drop every node, edge and sink. Id counters keep advancing.
    pub fn clear(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.sinks.clear();
        self.root = self.insert_node(ROOT_LENGTH, None);
        self.source = self.insert_node(SOURCE_LENGTH, Some(self.root));
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<S>, SeaDawgError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| SeaDawgError::invariant("node lookup", format!("{id} is not live")))
    }

    #[must_use]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge<S>, SeaDawgError> {
        self.edges
            .get(&id)
            .ok_or_else(|| SeaDawgError::invariant("edge lookup", format!("{id} is not live")))
    }

    #[must_use]
    pub fn sink(&self, id: SinkId) -> Option<&Sink<P>> {
        self.sinks.get(&id)
    }

    pub fn sink_mut(&mut self, id: SinkId) -> Option<&mut Sink<P>> {
        self.sinks.get_mut(&id)
    }

    pub(crate) fn live_sink(&self, id: SinkId) -> Result<&Sink<P>, SeaDawgError> {
        self.sinks
            .get(&id)
            .ok_or_else(|| SeaDawgError::invariant("sink lookup", format!("{id} is not live")))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge<S>)> {
        self.edges.iter().map(|(id, edge)| (*id, edge))
    }

    pub fn sinks(&self) -> impl Iterator<Item = (SinkId, &Sink<P>)> {
        self.sinks.iter().map(|(id, sink)| (*id, sink))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Resolved symbols of an edge label.
    pub fn symbols(&self, id: EdgeId) -> Result<&[Symbol<S>], SeaDawgError> {
        let edge = self.edge(id)?;
        let open_end = match edge.destination {
            Destination::Sink(sink) => self.live_sink(sink)?.length,
            Destination::Node(_) => edge.label.text.len(),
        };
        Ok(edge.label.resolve(open_end))
    }

    /// Resolved length of an edge label.
    pub fn edge_len(&self, id: EdgeId) -> Result<usize, SeaDawgError> {
        self.symbols(id).map(<[Symbol<S>]>::len)
    }

    /// Outgoing edge of `node` keyed by `symbol`, if any.
    pub fn find_edge(
        &self,
        node: NodeId,
        symbol: &Symbol<S>,
    ) -> Result<Option<EdgeId>, SeaDawgError> {
        Ok(self.node(node)?.edge(symbol))
    }

    /// Length of a destination: node length, or sink length.
    pub(crate) fn destination_length(&self, destination: Destination) -> Result<i64, SeaDawgError> {
        match destination {
            Destination::Node(node) => Ok(self.node(node)?.length),
            Destination::Sink(sink) => Ok(self.live_sink(sink)?.length as i64),
        }
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    pub(crate) fn insert_node(&mut self, length: i64, suffix: Option<NodeId>) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.insert(id, Node::new(length, suffix));
        id
    }

    /// Copy of `node` with the same length, suffix link and outgoing labels.
    ///
    /// Each copied edge is a new edge id registered at the shared destination.
    pub(crate) fn clone_node(&mut self, node: NodeId) -> Result<NodeId, SeaDawgError> {
        let original = self.node(node)?;
        let (length, suffix) = (original.length, original.suffix);
        let edges: Vec<EdgeId> = original.outgoing.values().copied().collect();
        let clone = self.insert_node(length, suffix);
        for id in edges {
            let edge = self.edge(id)?;
            let (label, destination) = (edge.label.clone(), edge.destination);
            self.set_edge(clone, label, destination)?;
        }
        Ok(clone)
    }

    pub(crate) fn set_length(&mut self, node: NodeId, length: i64) -> Result<(), SeaDawgError> {
        self.node_mut(node)?.length = length;
        Ok(())
    }

    pub(crate) fn set_suffix(&mut self, node: NodeId, suffix: NodeId) -> Result<(), SeaDawgError> {
        self.node(suffix)?;
        self.node_mut(node)?.suffix = Some(suffix);
        Ok(())
    }

    /// Remove a node that no edge touches any more.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Result<(), SeaDawgError> {
        if id == self.root || id == self.source {
            return Err(SeaDawgError::invariant(
                "remove_node",
                format!("{id} is permanent"),
            ));
        }
        let node = self.node(id)?;
        if !node.outgoing.is_empty() || !node.incoming.is_empty() {
            return Err(SeaDawgError::invariant(
                "remove_node",
                format!("{id} is still connected"),
            ));
        }
        self.nodes.remove(&id);
        Ok(())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<S>, SeaDawgError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| SeaDawgError::invariant("node lookup", format!("{id} is not live")))
    }

    // -------------------------------------------------------------------------
    // Sinks
    // -------------------------------------------------------------------------

    /// Take ownership of a caller sink and assign it an id.
    pub(crate) fn insert_sink(&mut self, mut sink: Sink<P>) -> SinkId {
        let id = SinkId(self.next_sink_id);
        self.next_sink_id += 1;
        sink.length = 0;
        sink.incoming.clear();
        self.sinks.insert(id, sink);
        id
    }

    pub(crate) fn set_sink_length(&mut self, id: SinkId, length: usize) -> Result<(), SeaDawgError> {
        self.sinks
            .get_mut(&id)
            .ok_or_else(|| SeaDawgError::invariant("sink lookup", format!("{id} is not live")))?
            .length = length;
        Ok(())
    }

    /// Release a sink that no edge points at any more.
    pub(crate) fn remove_sink(&mut self, id: SinkId) -> Result<Sink<P>, SeaDawgError> {
        if self.live_sink(id)?.in_degree() > 0 {
            return Err(SeaDawgError::invariant(
                "remove_sink",
                format!("{id} is still reachable"),
            ));
        }
        self.sinks
            .remove(&id)
            .ok_or_else(|| SeaDawgError::invariant("remove_sink", format!("{id} is not live")))
    }

    // -------------------------------------------------------------------------
    // Edges
    // -------------------------------------------------------------------------

    /// Make sure root has its length-1 edge for `symbol`.
    pub(crate) fn bootstrap(&mut self, symbol: &Symbol<S>) -> Result<(), SeaDawgError> {
        if self.find_edge(self.root, symbol)?.is_none() {
            let label = Label::from_symbols(vec![symbol.clone()]);
            self.set_edge(self.root, label, Destination::Node(self.source))?;
        }
        Ok(())
    }

    /// Install or overwrite the edge of `node` keyed by the label's first
    /// symbol. Overwriting keeps the edge id and moves its registration to
    /// the new destination.
    pub(crate) fn set_edge(
        &mut self,
        node: NodeId,
        label: Label<S>,
        destination: Destination,
    ) -> Result<EdgeId, SeaDawgError> {
        let key = label
            .first()
            .cloned()
            .ok_or_else(|| SeaDawgError::invariant("set_edge", format!("empty label on {node}")))?;
        if label.is_open() && matches!(destination, Destination::Node(_)) {
            return Err(SeaDawgError::invariant(
                "set_edge",
                format!("open label from {node} towards a node"),
            ));
        }
        match self.node(node)?.edge(&key) {
            Some(id) => {
                let edge = self.edges.get_mut(&id).ok_or_else(|| {
                    SeaDawgError::invariant("set_edge", format!("{id} is not live"))
                })?;
                if edge.destination == destination && edge.label.same_span(&label) {
                    return Ok(id);
                }
                let previous = std::mem::replace(&mut edge.destination, destination);
                edge.label = label;
                if previous != destination {
                    self.unlink_incoming(previous, id);
                    self.link_incoming(destination, id)?;
                }
                Ok(id)
            }
            None => {
                let id = EdgeId(self.next_edge_id);
                self.link_incoming(destination, id)?;
                self.next_edge_id += 1;
                self.edges.insert(
                    id,
                    Edge {
                        source: node,
                        label,
                        destination,
                    },
                );
                self.node_mut(node)?.outgoing.insert(key, id);
                Ok(id)
            }
        }
    }

    /// Detach the edge of `node` keyed by `symbol`, returning it.
    pub(crate) fn remove_edge(
        &mut self,
        node: NodeId,
        symbol: &Symbol<S>,
    ) -> Result<Option<Edge<S>>, SeaDawgError> {
        let Some(id) = self.node_mut(node)?.outgoing.remove(symbol) else {
            return Ok(None);
        };
        let edge = self
            .edges
            .remove(&id)
            .ok_or_else(|| SeaDawgError::invariant("remove_edge", format!("{id} is not live")))?;
        self.unlink_incoming(edge.destination, id);
        Ok(Some(edge))
    }

    /// Detach an edge by id, returning it.
    pub(crate) fn detach_edge(&mut self, id: EdgeId) -> Result<Edge<S>, SeaDawgError> {
        let edge = self.edge(id)?;
        let source = edge.source;
        let key = edge
            .label
            .first()
            .cloned()
            .ok_or_else(|| SeaDawgError::invariant("detach_edge", format!("{id} has no key")))?;
        self.remove_edge(source, &key)?
            .ok_or_else(|| SeaDawgError::invariant("detach_edge", format!("{id} is not keyed")))
    }

    fn link_incoming(&mut self, destination: Destination, id: EdgeId) -> Result<(), SeaDawgError> {
        match destination {
            Destination::Node(node) => {
                self.node_mut(node)?.incoming.insert(id);
            }
            Destination::Sink(sink) => {
                self.sinks
                    .get_mut(&sink)
                    .ok_or_else(|| {
                        SeaDawgError::invariant("link_incoming", format!("{sink} is not live"))
                    })?
                    .incoming
                    .insert(id);
            }
        }
        Ok(())
    }

    fn unlink_incoming(&mut self, destination: Destination, id: EdgeId) {
        match destination {
            Destination::Node(node) => {
                if let Some(node) = self.nodes.get_mut(&node) {
                    node.incoming.remove(&id);
                }
            }
            Destination::Sink(sink) => {
                if let Some(sink) = self.sinks.get_mut(&sink) {
                    sink.incoming.remove(&id);
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str, sink: SinkId) -> Rc<[Symbol<char>]> {
        let mut symbols: Vec<Symbol<char>> = s.chars().map(Symbol::Value).collect();
        symbols.push(Symbol::Terminator(sink));
        Rc::from(symbols)
    }

    #[test]
    fn new_graph_has_root_and_source() {
        let graph: Graph<char, ()> = Graph::new();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        let root = graph.node(graph.root()).expect("root");
        let source = graph.node(graph.source()).expect("source");
        assert_eq!(root.length(), ROOT_LENGTH);
        assert_eq!(root.suffix(), None);
        assert_eq!(source.length(), SOURCE_LENGTH);
        assert_eq!(source.suffix(), Some(graph.root()));
    }

    #[test]
    fn set_edge_maintains_incoming() {
        let mut graph: Graph<char, ()> = Graph::new();
        let sink = graph.insert_sink(Sink::marker());
        let buffer = text("ab", sink);
        graph.set_sink_length(sink, 3).expect("length");
        let source = graph.source();
        let id = graph
            .set_edge(source, Label::open(Rc::clone(&buffer), 0), Destination::Sink(sink))
            .expect("edge");
        assert_eq!(graph.symbols(id).expect("symbols").len(), 3);
        assert_eq!(graph.sink(sink).expect("sink").in_degree(), 1);

        let node = graph.insert_node(1, Some(source));
        let same = graph
            .set_edge(source, Label::closed(buffer, 0, 1), Destination::Node(node))
            .expect("redirect");
        assert_eq!(same, id);
        assert_eq!(graph.sink(sink).expect("sink").in_degree(), 0);
        assert_eq!(graph.node(node).expect("node").in_degree(), 1);
        assert_eq!(graph.edge_len(id).expect("len"), 1);
    }

    #[test]
    fn open_label_towards_node_rejected() {
        let mut graph: Graph<char, ()> = Graph::new();
        let sink = graph.insert_sink(Sink::marker());
        let source = graph.source();
        let node = graph.insert_node(1, Some(source));
        let result = graph.set_edge(source, Label::open(text("a", sink), 0), Destination::Node(node));
        assert!(matches!(
            result,
            Err(SeaDawgError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn clone_node_copies_edges_with_new_ids() {
        let mut graph: Graph<char, ()> = Graph::new();
        let sink = graph.insert_sink(Sink::marker());
        graph.set_sink_length(sink, 3).expect("length");
        let buffer = text("ab", sink);
        let source = graph.source();
        let node = graph.insert_node(1, Some(source));
        let original = graph
            .set_edge(node, Label::open(Rc::clone(&buffer), 1), Destination::Sink(sink))
            .expect("edge");

        let clone = graph.clone_node(node).expect("clone");
        let copied = graph
            .node(clone)
            .expect("clone")
            .edge(&Symbol::Value('b'))
            .expect("copied edge");
        assert_ne!(copied, original);
        assert_eq!(graph.node(clone).expect("clone").length(), 1);
        assert_eq!(graph.sink(sink).expect("sink").in_degree(), 2);
        assert_eq!(
            graph.symbols(copied).expect("symbols"),
            graph.symbols(original).expect("symbols")
        );
    }

    #[test]
    fn remove_node_requires_detachment() {
        let mut graph: Graph<char, ()> = Graph::new();
        let source = graph.source();
        let node = graph.insert_node(1, Some(source));
        let label = Label::from_symbols(vec![Symbol::Value('x')]);
        graph
            .set_edge(source, label, Destination::Node(node))
            .expect("edge");
        assert!(graph.remove_node(node).is_err());
        graph
            .remove_edge(source, &Symbol::Value('x'))
            .expect("remove")
            .expect("edge present");
        graph.remove_node(node).expect("detached node");
        assert!(graph.node(node).is_err());
        assert!(graph.remove_node(source).is_err());
    }

    #[test]
    fn terminator_edges_listed_first() {
        let mut graph: Graph<char, ()> = Graph::new();
        let first = graph.insert_sink(Sink::marker());
        let second = graph.insert_sink(Sink::marker());
        let source = graph.source();
        graph
            .set_edge(
                source,
                Label::from_symbols(vec![Symbol::Value('a')]),
                Destination::Sink(first),
            )
            .expect("value edge");
        for sink in [first, second] {
            graph
                .set_edge(
                    source,
                    Label::from_symbols(vec![Symbol::Terminator(sink)]),
                    Destination::Sink(sink),
                )
                .expect("terminator edge");
        }
        let ends: Vec<SinkId> = graph
            .node(source)
            .expect("source")
            .terminator_edges()
            .map(|(sink, _)| sink)
            .collect();
        assert_eq!(ends, vec![first, second]);
    }

    #[test]
    fn clear_keeps_id_counters() {
        let mut graph: Graph<char, u8> = Graph::new();
        let sink = graph.insert_sink(Sink::new(1));
        graph.clear();
        assert_eq!(graph.sink_count(), 0);
        assert_eq!(graph.node_count(), 2);
        let next = graph.insert_sink(Sink::new(2));
        assert_ne!(next, sink);
    }
}
