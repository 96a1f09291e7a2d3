//! Substring search: every indexed text that contains the query.
//!
//! The forward phase matches the query from source and then fans out to
//! every sink reachable from there, expanding each node at most once. The
//! first sink edge found for a sink starts a backward phase over incoming
//! edges that rebuilds the sink's whole text; a text is reported the first
//! time it is rebuilt.
//!
//! The backward word is spelled last symbol first and reversed once the
//! walk reaches source.

use super::{
    LabelMatch, TraversalContext, TraversalMode, TraversalStrategy, match_label, pending_outgoing,
    sink_of,
};
use crate::config::FilterConfig;
use crate::filter::ScalableBloomFilter;
use crate::graph::{Destination, Graph};
use crate::types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};
use std::collections::BTreeSet;

#[derive(Debug)]
pub struct SubstringStrategy<'q, S> {
    query: &'q [S],
    seen: ScalableBloomFilter,
    /// Nodes already fanned out from with the query matched.
    expanded: BTreeSet<NodeId>,
    /// Sinks whose backward walk has been scheduled.
    walked: BTreeSet<SinkId>,
}

impl<'q, S> SubstringStrategy<'q, S> {
    #[must_use]
    pub fn new(query: &'q [S], filter: FilterConfig) -> Self {
        Self {
            query,
            seen: ScalableBloomFilter::new(filter),
            expanded: BTreeSet::new(),
            walked: BTreeSet::new(),
        }
    }
}

impl<S: SeaSymbol, P> TraversalStrategy<S, P> for SubstringStrategy<'_, S> {
    fn select_edges(
        &mut self,
        graph: &Graph<S, P>,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<(), SeaDawgError> {
        let Some(node) = context.node else {
            return Ok(());
        };
        let edges = match self.query.get(context.query_index) {
            // Every sink below an expanded node has already been reached.
            None if !self.expanded.insert(node) => return Ok(()),
            None => pending_outgoing(graph, node)?,
            Some(next) => graph
                .find_edge(node, &Symbol::Value(next.clone()))?
                .into_iter()
                .collect(),
        };
        if !edges.is_empty() {
            spawned.push(context.spawn(TraversalMode::Traversal, Some(node), edges));
        }
        Ok(())
    }

    fn should_accept_edge(
        &mut self,
        graph: &Graph<S, P>,
        edge: EdgeId,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<bool, SeaDawgError> {
        let label = graph.symbols(edge)?;
        let outcome = match_label(label, self.query, context.query_index);
        if outcome == LabelMatch::Mismatch {
            return Ok(false);
        }
        match graph.edge(edge)?.destination() {
            Destination::Node(_) => Ok(true),
            Destination::Sink(sink) => {
                if outcome == LabelMatch::Exhausted && self.walked.insert(sink) {
                    let incoming: Vec<EdgeId> =
                        graph.live_sink(sink)?.incoming().rev().collect();
                    spawned.push(TraversalContext {
                        mode: TraversalMode::Collection,
                        node: None,
                        edges: incoming,
                        word: Vec::new(),
                        query_index: context.query_index,
                        sink_edge: Some(edge),
                    });
                }
                Ok(false)
            }
        }
    }

    fn collect(
        &mut self,
        graph: &Graph<S, P>,
        edge: EdgeId,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<(), SeaDawgError> {
        let sink_edge = context.sink_edge.ok_or_else(|| {
            SeaDawgError::invariant("substring collect", "backward walk without a sink edge")
        })?;
        let target = graph.live_sink(sink_of(graph, sink_edge)?)?.length() as i64;

        let source = graph.edge(edge)?.source();
        let mut word = context.word.clone();
        word.extend(graph.symbols(edge)?.iter().rev().cloned());
        let length = graph.node(source)?.length();

        if length <= 0 {
            word.reverse();
            spawned.push(TraversalContext {
                mode: TraversalMode::Sink,
                node: None,
                edges: vec![sink_edge],
                word,
                query_index: context.query_index,
                sink_edge: context.sink_edge,
            });
        } else if length + word.len() as i64 >= target {
            let incoming: Vec<EdgeId> = graph.node(source)?.incoming().rev().collect();
            spawned.push(TraversalContext {
                mode: TraversalMode::Collection,
                node: Some(source),
                edges: incoming,
                word,
                query_index: context.query_index,
                sink_edge: context.sink_edge,
            });
        }
        Ok(())
    }

    fn should_accept_sink(
        &mut self,
        graph: &Graph<S, P>,
        sink: SinkId,
        _context: &TraversalContext<S>,
        text: &[S],
    ) -> Result<bool, SeaDawgError> {
        if graph.live_sink(sink)?.text_len() != text.len() {
            return Ok(false);
        }
        Ok(self.seen.insert(text))
    }
}
