use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

pub type DocId = u32;

/// Raw term frequencies of one term, keyed by document.
pub type Postings<D = DocId> = HashMap<D, u32>;

/// Term -> document -> raw term frequency, as handed over by the indexing stage.
///
/// Serialized transparently as a nested map, e.g. `{"cat": {"1": 2, "2": 1}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent, bound(deserialize = "D: serde::Deserialize<'de> + Eq + std::hash::Hash"))]
pub struct InvertedIndex<D = DocId> {
    terms: HashMap<String, Postings<D>>,
}

impl<D> Default for InvertedIndex<D> {
    fn default() -> Self { Self { terms: HashMap::new() } }
}

impl<D: Eq + Hash> PartialEq for InvertedIndex<D> {
    fn eq(&self, other: &Self) -> bool { self.terms == other.terms }
}

impl<D: Eq + Hash> Eq for InvertedIndex<D> {}

impl<D: Eq + Hash + Clone> InvertedIndex<D> {
    pub fn new() -> Self { Self::default() }

    /// Record `tf` occurrences of `term` in `doc_id`, replacing any earlier posting for the pair.
    pub fn insert(&mut self, term: impl Into<String>, doc_id: D, tf: u32) {
        self.terms.entry(term.into()).or_default().insert(doc_id, tf);
    }

    pub fn postings(&self, term: &str) -> Option<&Postings<D>> { self.terms.get(term) }

    /// Number of documents whose postings contain `term`; 0 for unknown terms.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, |p| p.len())
    }

    /// Every document identifier mentioned anywhere in the index, each once.
    pub fn doc_ids(&self) -> HashSet<&D> {
        self.terms.values().flat_map(|p| p.keys()).collect()
    }

    pub fn num_docs(&self) -> usize { self.doc_ids().len() }

    pub fn num_terms(&self) -> usize { self.terms.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Postings<D>)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }
}

impl<D> From<HashMap<String, Postings<D>>> for InvertedIndex<D> {
    fn from(terms: HashMap<String, Postings<D>>) -> Self { Self { terms } }
}

impl<D: Eq + Hash + Clone, T: Into<String>> FromIterator<(T, D, u32)> for InvertedIndex<D> {
    fn from_iter<I: IntoIterator<Item = (T, D, u32)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (term, doc_id, tf) in iter {
            index.insert(term, doc_id, tf);
        }
        index
    }
}
