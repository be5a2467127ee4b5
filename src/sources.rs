//! Bibliography registry
//!
//! Citation texts get stable 1-based ids in first-seen order; registering
//! the same text again returns its existing id.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: BTreeMap<usize, String>,
    counter: usize,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a citation and return its id
    pub fn add(&mut self, text: &str) -> usize {
        if let Some(id) = self.find(text) {
            return id;
        }

        self.counter += 1;
        self.sources.insert(self.counter, text.to_string());
        self.counter
    }

    /// Id of an already registered citation
    pub fn find(&self, text: &str) -> Option<usize> {
        self.sources
            .iter()
            .find(|(_, value)| value.as_str() == text)
            .map(|(id, _)| *id)
    }

    /// All entries ordered by id
    pub fn entries(&self) -> &BTreeMap<usize, String> {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
