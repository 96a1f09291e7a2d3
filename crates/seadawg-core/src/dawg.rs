//! # SeaDawg
//!
//! The public index: one word graph, one sink per indexed text.
//!
//! ```
//! use seadawg_core::{SeaDawg, Sink};
//!
//! let mut dawg: SeaDawg<char, u32> = SeaDawg::new();
//! dawg.add_str("cocoa", Sink::new(1)).expect("add");
//! dawg.add_str("cola", Sink::new(2)).expect("add");
//!
//! let hits = dawg.find_with_prefix_str("co").expect("prefix");
//! let texts: Vec<String> = hits.iter().map(|hit| hit.text_string()).collect();
//! assert_eq!(texts, vec!["cocoa", "cola"]);
//! assert!(dawg.find_exact_str("coc").expect("exact").is_none());
//! ```

use crate::config::SeaDawgConfig;
use crate::graph::{Destination, Graph, Sink};
use crate::traversal::{self, Match, PrefixStrategy, SubstringStrategy, TraversalContext};
use crate::types::{SeaDawgError, SeaSymbol, SinkId, Symbol};
use crate::{construction, deletion};

/// CDAWG index over texts of `S` symbols with `P` payloads.
#[derive(Debug, Clone)]
pub struct SeaDawg<S, P = ()> {
    graph: Graph<S, P>,
    config: SeaDawgConfig,
}

impl<S: SeaSymbol, P> Default for SeaDawg<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SeaSymbol, P> SeaDawg<S, P> {
    /// Create an empty index with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            config: SeaDawgConfig::default(),
        }
    }

    /// Create an empty index with a validated configuration.
    pub fn with_config(config: SeaDawgConfig) -> Result<Self, SeaDawgError> {
        config.validate()?;
        Ok(Self {
            graph: Graph::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SeaDawgConfig {
        &self.config
    }

    /// Read-only view of the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<S, P> {
        &self.graph
    }

    /// Number of indexed texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.sink_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.sink_count() == 0
    }

    /// Drop every indexed text.
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    #[must_use]
    pub fn sink(&self, id: SinkId) -> Option<&Sink<P>> {
        self.graph.sink(id)
    }

    pub fn sink_mut(&mut self, id: SinkId) -> Option<&mut Sink<P>> {
        self.graph.sink_mut(id)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Index `text`, attaching `sink` as its terminal state.
    ///
    /// If `text` is already indexed its sink keeps its id and takes over the
    /// new sink's payload.
    pub fn add(&mut self, text: &[S], sink: Sink<P>) -> Result<SinkId, SeaDawgError> {
        if text.len() > self.config.max_text_length {
            return Err(SeaDawgError::TextTooLong {
                len: text.len(),
                max: self.config.max_text_length,
            });
        }
        if let Some(existing) = self.find_exact_id(text)? {
            if let Some(current) = self.graph.sink_mut(existing) {
                current.set_payload(sink.into_payload());
            }
            tracing::debug!(sink = %existing, "text already indexed, payload replaced");
            return Ok(existing);
        }

        let id = construction::insert(&mut self.graph, text, sink, self.config.trace_mutations)?;
        tracing::debug!(
            sink = %id,
            symbols = text.len(),
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "indexed text"
        );
        if self.config.verify_invariants {
            self.check_invariants()?;
        }
        Ok(id)
    }

    /// Remove `text`, returning its released sink, or `None` if it was not
    /// indexed.
    pub fn remove(&mut self, text: &[S]) -> Result<Option<Sink<P>>, SeaDawgError> {
        let Some(id) = self.find_exact_id(text)? else {
            return Ok(None);
        };
        let released = deletion::remove(&mut self.graph, id, self.config.trace_mutations)?;
        tracing::debug!(
            sink = %id,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "removed text"
        );
        if self.config.verify_invariants {
            self.check_invariants()?;
        }
        Ok(Some(released))
    }

    /// Remove `text`. Returns `false` if it was not indexed.
    pub fn delete(&mut self, text: &[S]) -> Result<bool, SeaDawgError> {
        Ok(self.remove(text)?.is_some())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Sink of exactly `text`, if indexed.
    pub fn find_exact(&self, text: &[S]) -> Result<Option<&Sink<P>>, SeaDawgError> {
        Ok(self
            .find_exact_id(text)?
            .and_then(|id| self.graph.sink(id)))
    }

    /// Id of the sink of exactly `text`, if indexed.
    ///
    /// Follows `text` from source; at its end, the text is indexed when a
    /// terminator continues the path into a sink of matching length.
    pub fn find_exact_id(&self, text: &[S]) -> Result<Option<SinkId>, SeaDawgError> {
        let mut node = self.graph.source();
        let mut index = 0;
        while index < text.len() {
            let Some(edge) = self
                .graph
                .find_edge(node, &Symbol::Value(text[index].clone()))?
            else {
                return Ok(None);
            };
            let label = self.graph.symbols(edge)?;
            let rest = &text[index..];
            if label.len() <= rest.len() {
                if !agrees(label, rest) {
                    return Ok(None);
                }
                index += label.len();
                node = match self.graph.edge(edge)?.destination() {
                    Destination::Node(next) => next,
                    Destination::Sink(_) => return Ok(None),
                };
                continue;
            }
            // The text ends inside this edge: the next label symbol must be
            // the terminator of a sink of the right length.
            if !agrees(&label[..rest.len()], rest) {
                return Ok(None);
            }
            let Destination::Sink(sink) = self.graph.edge(edge)?.destination() else {
                return Ok(None);
            };
            let terminated = label.get(rest.len()) == Some(&Symbol::Terminator(sink));
            if terminated && self.graph.live_sink(sink)?.text_len() == text.len() {
                return Ok(Some(sink));
            }
            return Ok(None);
        }

        for (sink, _) in self.graph.node(node)?.terminator_edges() {
            if self.graph.live_sink(sink)?.text_len() == text.len() {
                return Ok(Some(sink));
            }
        }
        Ok(None)
    }

    /// Every indexed text starting with `prefix`, in lexicographic order.
    pub fn find_with_prefix(&self, prefix: &[S]) -> Result<Vec<Match<'_, S, P>>, SeaDawgError> {
        let mut strategy = PrefixStrategy::new(prefix);
        let start = TraversalContext::start(self.graph.source());
        traversal::execute(&self.graph, &mut strategy, start)
    }

    /// Every indexed text containing `factor`, each reported once.
    pub fn find_with_substring(
        &self,
        factor: &[S],
    ) -> Result<Vec<Match<'_, S, P>>, SeaDawgError> {
        let mut strategy = SubstringStrategy::new(factor, self.config.duplicate_filter);
        let start = TraversalContext::start(self.graph.source());
        traversal::execute(&self.graph, &mut strategy, start)
    }
}

fn agrees<S: PartialEq>(label: &[Symbol<S>], text: &[S]) -> bool {
    label
        .iter()
        .zip(text)
        .all(|(symbol, expected)| symbol.value() == Some(expected))
}

// =============================================================================
// STRING CONVENIENCES
// =============================================================================

impl<P> SeaDawg<char, P> {
    pub fn add_str(&mut self, text: &str, sink: Sink<P>) -> Result<SinkId, SeaDawgError> {
        self.add(&chars(text), sink)
    }

    pub fn find_exact_str(&self, text: &str) -> Result<Option<&Sink<P>>, SeaDawgError> {
        self.find_exact(&chars(text))
    }

    pub fn delete_str(&mut self, text: &str) -> Result<bool, SeaDawgError> {
        self.delete(&chars(text))
    }

    pub fn find_with_prefix_str(&self, prefix: &str) -> Result<Vec<Match<'_, char, P>>, SeaDawgError> {
        self.find_with_prefix(&chars(prefix))
    }

    pub fn find_with_substring_str(
        &self,
        factor: &str,
    ) -> Result<Vec<Match<'_, char, P>>, SeaDawgError> {
        self.find_with_substring(&chars(factor))
    }
}

pub(crate) fn chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

// =============================================================================
// TESTS
// =============================================================================
