//! Prefix search: every indexed text that starts with the query.

use super::{
    LabelMatch, TraversalContext, TraversalMode, TraversalStrategy, match_label, pending_outgoing,
};
use crate::graph::{Destination, Graph};
use crate::types::{EdgeId, SeaDawgError, SeaSymbol, SinkId, Symbol};

/// Matches the query from source, then collects every sink below the point
/// where the query ends.
///
/// A path from source to a sink spells a suffix of that sink's text. Only
/// paths spelling the whole text (length check against the sink) are
/// reported.
#[derive(Debug)]
pub struct PrefixStrategy<'q, S> {
    query: &'q [S],
}

impl<'q, S> PrefixStrategy<'q, S> {
    #[must_use]
    pub fn new(query: &'q [S]) -> Self {
        Self { query }
    }
}

impl<S: SeaSymbol, P> TraversalStrategy<S, P> for PrefixStrategy<'_, S> {
    fn select_edges(
        &mut self,
        graph: &Graph<S, P>,
        context: &TraversalContext<S>,
        spawned: &mut Vec<TraversalContext<S>>,
    ) -> Result<(), SeaDawgError> {
        let Some(node) = context.node else {
            return Ok(());
        };
        match self.query.get(context.query_index) {
            None => {
                let edges = pending_outgoing(graph, node)?;
                spawned.push(context.spawn(TraversalMode::Collection, Some(node), edges));
            }
            Some(next) => {
                if let Some(edge) = graph.find_edge(node, &Symbol::Value(next.clone()))? {
                    spawned.push(context.spawn(TraversalMode::Traversal, Some(node), vec![edge]));
                }
            }
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
        match match_label(label, self.query, context.query_index) {
            LabelMatch::Mismatch => Ok(false),
            LabelMatch::Continue => Ok(true),
            LabelMatch::Exhausted => {
                // The query ends on this edge: everything below it matches.
                spawned.push(context.spawn(TraversalMode::Collection, context.node, vec![edge]));
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
        let label = graph.symbols(edge)?;
        let mut next = match graph.edge(edge)?.destination() {
            Destination::Node(node) => {
                let edges = pending_outgoing(graph, node)?;
                context.spawn(TraversalMode::Collection, Some(node), edges)
            }
            Destination::Sink(_) => context.spawn(TraversalMode::Sink, None, vec![edge]),
        };
        next.word.extend_from_slice(label);
        next.query_index += label.len();
        spawned.push(next);
        Ok(())
    }

    fn should_accept_sink(
        &mut self,
        graph: &Graph<S, P>,
        sink: SinkId,
        _context: &TraversalContext<S>,
        text: &[S],
    ) -> Result<bool, SeaDawgError> {
        Ok(graph.live_sink(sink)?.text_len() == text.len())
    }
}
