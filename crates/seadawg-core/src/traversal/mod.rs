//! # Traversal Engine
//!
//! Iterative, strategy-driven walk over the word graph.
//!
//! The engine keeps an explicit stack of [`TraversalContext`]s. Each step
//! pops a context, takes one of its pending edges and hands it to the
//! strategy according to the context's mode:
//!
//! | Mode         | Engine action                                            |
//! |--------------|----------------------------------------------------------|
//! | `Traversal`  | `should_accept_edge`; on acceptance descend (`select_edges`) or `collect` at a sink |
//! | `Collection` | `collect`                                                |
//! | `Sink`       | `should_accept_sink` on the reconstructed text           |
//!
//! Contexts spawned by a hook are pushed above the popped context, so the
//! walk is depth-first. Pending edges are stored in descending key order and
//! popped from the back, so results come out in lexicographic order.

pub mod prefix;
pub mod substring;

pub use prefix::PrefixStrategy;
pub use substring::SubstringStrategy;

use crate::graph::{Destination, Graph, Sink};
use crate::types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};

// =============================================================================
// CONTEXT
// =============================================================================

/// What the engine does with the next pending edge of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// Still matching the query.
    Traversal,
    /// Query matched; gathering everything below (or behind) this point.
    Collection,
    /// A candidate text is complete and awaits acceptance.
    Sink,
}

/// One frame of the traversal stack.
#[derive(Debug, Clone)]
pub struct TraversalContext<S> {
    pub mode: TraversalMode,
    /// Node the pending edges belong to, if any.
    pub node: Option<NodeId>,
    /// Pending edges, popped from the back.
    pub edges: Vec<EdgeId>,
    /// Symbols spelled so far.
    pub word: Vec<Symbol<S>>,
    /// Position in the query.
    pub query_index: usize,
    /// Edge into the sink a backward walk started from.
    pub sink_edge: Option<EdgeId>,
}

impl<S: Clone> TraversalContext<S> {
    /// Initial context at `node`.
    #[must_use]
    pub fn start(node: NodeId) -> Self {
        Self {
            mode: TraversalMode::Traversal,
            node: Some(node),
            edges: Vec::new(),
            word: Vec::new(),
            query_index: 0,
            sink_edge: None,
        }
    }

    /// A new context sharing this one's word, query position and sink edge.
    #[must_use]
    pub fn spawn(&self, mode: TraversalMode, node: Option<NodeId>, edges: Vec<EdgeId>) -> Self {
        Self {
            mode,
            node,
            edges,
            word: self.word.clone(),
            query_index: self.query_index,
            sink_edge: self.sink_edge,
        }
    }
}

// =============================================================================
// STRATEGY
// =============================================================================

/// Hooks a search plugs into the engine.
///
/// Hooks push follow-up contexts into `spawned`; the engine schedules them.
pub trait TraversalStrategy<S: SeaSymbol, P> {
    /// Choose the edges to explore from a freshly reached node.
    fn select_edges(
        &mut self,
        graph: &Graph<S, P>,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<(), SeaDawgError>;

    /// Decide whether to follow `edge` while matching.
    fn should_accept_edge(
        &mut self,
        graph: &Graph<S, P>,
        edge: EdgeId,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<bool, SeaDawgError>;

    /// Gather `edge` into the result being assembled.
    fn collect(
        &mut self,
        graph: &Graph<S, P>,
        edge: EdgeId,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<(), SeaDawgError>;

    /// Final verdict on a reconstructed text.
    fn should_accept_sink(
        &mut self,
        graph: &Graph<S, P>,
        sink: SinkId,
        context: &TraversalContext<S>,
        text: &[S],
    ) -> Result<bool, SeaDawgError>;
}

/// A text reported by a search, with its sink.
#[derive(Debug)]
pub struct Match<'g, S, P> {
    pub text: Vec<S>,
    pub sink_id: SinkId,
    pub sink: &'g Sink<P>,
}

impl<S, P> Match<'_, S, P> {
    #[must_use]
    pub fn payload(&self) -> Option<&P> {
        self.sink.payload()
    }
}

impl<P> Match<'_, char, P> {
    /// The matched text as a `String`.
    #[must_use]
    pub fn text_string(&self) -> String {
        self.text.iter().collect()
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Run `strategy` from `start`, returning accepted texts in visit order.
pub fn execute<'g, S: SeaSymbol, P, T: TraversalStrategy<S, P>>(
    graph: &'g Graph<S, P>,
    strategy: &mut T,
    start: TraversalContext<S>,
) -> Result<Vec<Match<'g, S, P>>, SeaDawgError> {
    let mut results = Vec::new();
    let mut spawned = Vec::new();
    strategy.select_edges(graph, &start, &mut spawned)?;
    let mut stack = std::mem::take(&mut spawned);

    while let Some(mut context) = stack.pop() {
        let Some(edge) = context.edges.pop() else {
            continue;
        };
        match context.mode {
            TraversalMode::Traversal => {
                if strategy.should_accept_edge(graph, edge, &context, &mut spawned)? {
                    match graph.edge(edge)?.destination() {
                        Destination::Node(node) => {
                            if graph.node(node)?.out_degree() > 0 {
                                let next = descend(graph, edge, node, &context)?;
                                strategy.select_edges(graph, &next, &mut spawned)?;
                            }
                        }
                        Destination::Sink(_) => {
                            strategy.collect(graph, edge, &context, &mut spawned)?;
                        }
                    }
                }
            }
            TraversalMode::Collection => {
                strategy.collect(graph, edge, &context, &mut spawned)?;
            }
            TraversalMode::Sink => {
                let sink = sink_of(graph, edge)?;
                let text = plain_text(&context.word);
                if strategy.should_accept_sink(graph, sink, &context, &text)? {
                    results.push(Match {
                        text,
                        sink_id: sink,
                        sink: graph.live_sink(sink)?,
                    });
                }
            }
        }
        if !context.edges.is_empty() {
            stack.push(context);
        }
        stack.append(&mut spawned);
    }
    Ok(results)
}

fn descend<S: SeaSymbol, P>(
    graph: &Graph<S, P>,
    edge: EdgeId,
    node: NodeId,
    context: &TraversalContext<S>,
) -> Result<TraversalContext<S>, SeaDawgError> {
    let label = graph.symbols(edge)?;
    let mut next = context.spawn(TraversalMode::Traversal, Some(node), Vec::new());
    next.word.extend_from_slice(label);
    next.query_index += label.len();
    Ok(next)
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Outgoing edges of `node`, highest key first.
pub(crate) fn pending_outgoing<S: SeaSymbol, P>(
    graph: &Graph<S, P>,
    node: NodeId,
) -> Result<Vec<EdgeId>, SeaDawgError> {
    Ok(graph.node(node)?.outgoing().rev().map(|(_, id)| id).collect())
}

/// Sink an edge leads to.
pub(crate) fn sink_of<S: SeaSymbol, P>(
    graph: &Graph<S, P>,
    edge: EdgeId,
) -> Result<SinkId, SeaDawgError> {
    match graph.edge(edge)?.destination() {
        Destination::Sink(sink) => Ok(sink),
        Destination::Node(node) => Err(SeaDawgError::invariant(
            "traversal",
            format!("{edge} leads to {node}, not a sink"),
        )),
    }
}

/// Caller symbols of `word`, terminators dropped.
pub(crate) fn plain_text<S: Clone>(word: &[Symbol<S>]) -> Vec<S> {
    word.iter().filter_map(|symbol| symbol.value().cloned()).collect()
}

/// Outcome of comparing a label with the rest of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelMatch {
    /// The label disagrees with the query.
    Mismatch,
    /// The label is a proper prefix of the remaining query.
    Continue,
    /// The remaining query ends within (or exactly at the end of) the label.
    Exhausted,
}

pub(crate) fn match_label<S: PartialEq>(label: &[Symbol<S>], query: &[S], index: usize) -> LabelMatch {
    let remaining = query.get(index..).unwrap_or(&[]);
    let agrees = label
        .iter()
        .zip(remaining)
        .all(|(symbol, expected)| symbol.value() == Some(expected));
    if !agrees {
        LabelMatch::Mismatch
    } else if remaining.len() <= label.len() {
        LabelMatch::Exhausted
    } else {
        LabelMatch::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(s: &str) -> Vec<Symbol<char>> {
        s.chars().map(Symbol::Value).collect()
    }

    fn query(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn label_match_outcomes() {
        let q = query("cola");
        assert_eq!(match_label(&symbols("co"), &q, 0), LabelMatch::Continue);
        assert_eq!(match_label(&symbols("la"), &q, 2), LabelMatch::Exhausted);
        assert_eq!(match_label(&symbols("lab"), &q, 2), LabelMatch::Exhausted);
        assert_eq!(match_label(&symbols("ca"), &q, 0), LabelMatch::Mismatch);
        assert_eq!(match_label(&symbols("x"), &q, 4), LabelMatch::Exhausted);
    }

    #[test]
    fn terminator_never_matches_query_symbol() {
        let mut label = symbols("co");
        label.push(Symbol::Terminator(SinkId(0)));
        assert_eq!(match_label(&label, &query("coc"), 0), LabelMatch::Mismatch);
        assert_eq!(match_label(&label, &query("co"), 0), LabelMatch::Exhausted);
    }

    #[test]
    fn plain_text_drops_terminators() {
        let mut word = symbols("ab");
        word.push(Symbol::Terminator(SinkId(3)));
        assert_eq!(plain_text(&word), vec!['a', 'b']);
    }

    #[test]
    fn spawn_carries_progress() {
        let mut context: TraversalContext<char> = TraversalContext::start(NodeId(1));
        context.word = symbols("co");
        context.query_index = 2;
        context.sink_edge = Some(EdgeId(5));
        let child = context.spawn(TraversalMode::Collection, None, vec![EdgeId(1)]);
        assert_eq!(child.mode, TraversalMode::Collection);
        assert_eq!(child.word, context.word);
        assert_eq!(child.query_index, 2);
        assert_eq!(child.sink_edge, Some(EdgeId(5)));
        assert_eq!(child.node, None);
    }
}
