//! # Construction Engine
//!
//! Online CDAWG construction: a text is appended symbol by symbol, and each
//! symbol runs one `update` from the active point.
//!
//! ## Active point
//!
//! The active point is `(node, start)` together with the current position
//! `end`: the string `word[start..end]` read from `node`. It is **canonical**
//! when `node` is the deepest explicit node on that path, i.e. the span ends
//! strictly inside the edge keyed by `word[start]` (or is empty).
//!
//! Every text is terminated by its own sink's terminator, so a new text
//! starts from `(source, 0)`: no suffix of a previous text is still open.

use crate::graph::{Destination, Graph, Label, Sink};
use crate::types::{EdgeId, NodeId, SeaDawgError, SeaSymbol, SinkId, Symbol};
use std::rc::Rc;

/// Insert one text into the graph, returning the id of its new sink.
pub(crate) fn insert<S: SeaSymbol, P>(
    graph: &mut Graph<S, P>,
    text: &[S],
    sink: Sink<P>,
    trace: bool,
) -> Result<SinkId, SeaDawgError> {
    let id = graph.insert_sink(sink);
    let mut symbols: Vec<Symbol<S>> = text.iter().cloned().map(Symbol::Value).collect();
    symbols.push(Symbol::Terminator(id));

    let source = graph.source();
    let mut run = Construction {
        graph,
        word: Rc::from(symbols),
        sink: id,
        trace,
    };

    let (mut node, mut start) = (source, 0);
    for end in 0..run.word.len() {
        let symbol = run.symbol(end)?.clone();
        run.graph.bootstrap(&symbol)?;
        run.graph.set_sink_length(id, end + 1)?;
        (node, start) = run.update(node, start, end)?;
    }
    Ok(id)
}

struct Construction<'g, S, P> {
    graph: &'g mut Graph<S, P>,
    word: Rc<[Symbol<S>]>,
    sink: SinkId,
    trace: bool,
}

impl<S: SeaSymbol, P> Construction<'_, S, P> {
    fn symbol(&self, index: usize) -> Result<&Symbol<S>, SeaDawgError> {
        self.word.get(index).ok_or_else(|| {
            SeaDawgError::invariant("construction", format!("position {index} past end of text"))
        })
    }

    fn suffix_of(&self, node: NodeId) -> Result<NodeId, SeaDawgError> {
        self.graph
            .node(node)?
            .suffix()
            .ok_or_else(|| SeaDawgError::invariant("construction", format!("{node} has no suffix link")))
    }

    /// Edge of `node` keyed by `word[start]`.
    fn span_edge(&self, node: NodeId, start: usize) -> Result<EdgeId, SeaDawgError> {
        let symbol = self.symbol(start)?;
        self.graph.find_edge(node, symbol)?.ok_or_else(|| {
            SeaDawgError::invariant("construction", format!("{node} has no edge for {symbol:?}"))
        })
    }

    /// Add `word[end]` at the active point `(node, start)`.
    ///
    /// Walks the suffix chain, branching every position that cannot be
    /// extended by the new symbol, and returns the next active point.
    fn update(
        &mut self,
        mut node: NodeId,
        mut start: usize,
        end: usize,
    ) -> Result<(NodeId, usize), SeaDawgError> {
        let symbol = self.symbol(end)?.clone();
        let mut previous: Option<NodeId> = None;
        let mut branch: Option<NodeId> = None;
        let mut last_extension: Option<Destination> = None;

        while !self.check_endpoint(node, start, end, &symbol)? {
            let target = if start < end {
                let extension = self.extension(node, start, end)?;
                if last_extension == Some(extension) {
                    let branch = branch.ok_or_else(|| {
                        SeaDawgError::invariant("update", "redirect before any branch")
                    })?;
                    self.redirect_edge(node, start, end, branch)?;
                    (node, start) = self.canonize(self.suffix_of(node)?, start, end)?;
                    continue;
                }
                last_extension = Some(extension);
                self.split_edge(node, start, end)?
            } else {
                node
            };
            branch = Some(target);

            self.graph.set_edge(
                target,
                Label::open(Rc::clone(&self.word), end),
                Destination::Sink(self.sink),
            )?;
            if let Some(previous) = previous {
                self.graph.set_suffix(previous, target)?;
            }
            previous = Some(target);

            (node, start) = self.canonize(self.suffix_of(node)?, start, end)?;
        }

        if let Some(previous) = previous {
            self.graph.set_suffix(previous, node)?;
        }
        self.separate_node(node, start, end + 1)
    }

    /// Whether the active point can already be extended by `symbol`.
    fn check_endpoint(
        &self,
        node: NodeId,
        start: usize,
        end: usize,
        symbol: &Symbol<S>,
    ) -> Result<bool, SeaDawgError> {
        if start < end {
            let edge = self.span_edge(node, start)?;
            let symbols = self.graph.symbols(edge)?;
            return Ok(symbols.get(end - start) == Some(symbol));
        }
        Ok(self.graph.find_edge(node, symbol)?.is_some())
    }

    /// Normalize `(node, start)` to the deepest explicit node on
    /// `word[start..end]`.
    fn canonize(
        &self,
        mut node: NodeId,
        mut start: usize,
        end: usize,
    ) -> Result<(NodeId, usize), SeaDawgError> {
        while start < end {
            let edge = self.span_edge(node, start)?;
            let len = self.graph.edge_len(edge)?;
            if len > end - start {
                break;
            }
            start += len;
            node = match self.graph.edge(edge)?.destination() {
                Destination::Node(next) => next,
                Destination::Sink(sink) => {
                    return Err(SeaDawgError::invariant(
                        "canonize",
                        format!("span runs through {edge} into {sink}"),
                    ));
                }
            };
        }
        Ok((node, start))
    }

    /// Where the edge carrying the active point leads, or the node itself
    /// when the span is empty.
    fn extension(&self, node: NodeId, start: usize, end: usize) -> Result<Destination, SeaDawgError> {
        if start >= end {
            return Ok(Destination::Node(node));
        }
        let edge = self.span_edge(node, start)?;
        Ok(self.graph.edge(edge)?.destination())
    }

    /// Shorten the edge carrying the span to exactly the span and point it at
    /// `target`.
    fn redirect_edge(
        &mut self,
        node: NodeId,
        start: usize,
        end: usize,
        target: NodeId,
    ) -> Result<(), SeaDawgError> {
        let edge = self.span_edge(node, start)?;
        let label = self.graph.edge(edge)?.label().head(end - start);
        self.graph.set_edge(node, label, Destination::Node(target))?;
        if self.trace {
            tracing::trace!(from = %node, to = %target, "redirected edge");
        }
        Ok(())
    }

    /// Split the edge carrying the span at the span's end, returning the new
    /// node.
    fn split_edge(&mut self, node: NodeId, start: usize, end: usize) -> Result<NodeId, SeaDawgError> {
        let edge = self.span_edge(node, start)?;
        let offset = end - start;
        let (label, destination) = {
            let edge = self.graph.edge(edge)?;
            (edge.label().clone(), edge.destination())
        };
        let length = self.graph.node(node)?.length() + offset as i64;
        let split = self.graph.insert_node(length, None);
        self.graph.set_edge(split, label.tail(offset), destination)?;
        self.graph
            .set_edge(node, label.head(offset), Destination::Node(split))?;
        if self.trace {
            tracing::trace!(node = %split, length, "split edge");
        }
        Ok(split)
    }

    /// Make the node reached by `word[start..end]` solid.
    ///
    /// When the canonical node is reached through a non-solid edge it also
    /// stands for longer strings than `word[start..end]`; it is cloned with
    /// the shorter length and every edge along the suffix chain that reaches
    /// it the same way is moved onto the clone.
    fn separate_node(
        &mut self,
        node: NodeId,
        start: usize,
        end: usize,
    ) -> Result<(NodeId, usize), SeaDawgError> {
        let canonical = self.canonize(node, start, end)?;
        let (canon, canon_start) = canonical;
        if canon_start < end {
            return Ok(canonical);
        }

        let length = self.graph.node(node)?.length() + (end - start) as i64;
        if self.graph.node(canon)?.length() == length {
            return Ok(canonical);
        }

        let separated = self.graph.clone_node(canon)?;
        self.graph.set_length(separated, length)?;
        self.graph.set_suffix(canon, separated)?;
        if self.trace {
            tracing::trace!(node = %canon, clone = %separated, length, "separated node");
        }

        let (mut src, mut src_start) = (node, start);
        loop {
            let edge = self.span_edge(src, src_start)?;
            let label = self.graph.edge(edge)?.label().clone();
            self.graph
                .set_edge(src, label, Destination::Node(separated))?;

            (src, src_start) = self.canonize(self.suffix_of(src)?, src_start, end - 1)?;
            if self.canonize(src, src_start, end)? != canonical {
                break;
            }
        }
        Ok((separated, end))
    }
}

// =============================================================================
// TESTS
// =============================================================================
