//! # SeaDawgMap
//!
//! String-keyed map whose values live in the sinks of a [`SeaDawg`].
//!
//! Keys share one word graph, so a large set of overlapping keys costs far
//! less than a map of owned strings. Only point operations are backed by the
//! graph: removal and iteration report [`SeaDawgError::Unsupported`].

use crate::config::SeaDawgConfig;
use crate::dawg::{SeaDawg, chars};
use crate::graph::Sink;
use crate::types::SeaDawgError;

/// Map from `&str` keys to `V` values.
#[derive(Debug, Clone)]
pub struct SeaDawgMap<V> {
    core: SeaDawg<char, V>,
}

impl<V> Default for SeaDawgMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SeaDawgMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            core: SeaDawg::new(),
        }
    }

    pub fn with_config(config: SeaDawgConfig) -> Result<Self, SeaDawgError> {
        Ok(Self {
            core: SeaDawg::with_config(config)?,
        })
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<&V>, SeaDawgError> {
        Ok(self.core.find_exact_str(key)?.and_then(Sink::payload))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>, SeaDawgError> {
        let Some(id) = self.core.find_exact_id(&chars(key))? else {
            return Ok(None);
        };
        Ok(self.core.sink_mut(id).and_then(Sink::payload_mut))
    }

    pub fn has(&self, key: &str) -> Result<bool, SeaDawgError> {
        Ok(self.core.find_exact_str(key)?.is_some())
    }

    /// Store `value` under `key`, replacing any previous value in place.
    pub fn set(&mut self, key: &str, value: V) -> Result<&mut Self, SeaDawgError> {
        let text = chars(key);
        match self.core.find_exact_id(&text)? {
            Some(id) => {
                if let Some(sink) = self.core.sink_mut(id) {
                    sink.set_payload(Some(value));
                }
            }
            None => {
                self.core.add(&text, Sink::new(value))?;
            }
        }
        Ok(self)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.core.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// The index behind the map, for prefix and substring queries.
    #[must_use]
    pub fn index(&self) -> &SeaDawg<char, V> {
        &self.core
    }

    pub fn remove(&mut self, _key: &str) -> Result<Option<V>, SeaDawgError> {
        Err(SeaDawgError::Unsupported("SeaDawgMap::remove"))
    }

    pub fn for_each<F: FnMut(&str, &V)>(&self, _visit: F) -> Result<(), SeaDawgError> {
        Err(SeaDawgError::Unsupported("SeaDawgMap::for_each"))
    }

    pub fn iter(&self) -> Result<std::vec::IntoIter<(String, &V)>, SeaDawgError> {
        Err(SeaDawgError::Unsupported("SeaDawgMap::iter"))
    }

    pub fn keys(&self) -> Result<std::vec::IntoIter<String>, SeaDawgError> {
        Err(SeaDawgError::Unsupported("SeaDawgMap::keys"))
    }

    pub fn values(&self) -> Result<std::vec::IntoIter<&V>, SeaDawgError> {
        Err(SeaDawgError::Unsupported("SeaDawgMap::values"))
    }
}
