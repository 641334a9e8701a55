use crate::index::InvertedIndex;
use crate::weighting::{idf, WeightingScheme};
use std::collections::HashMap;
use std::hash::Hash;

/// Corpus-wide statistics derived once from an index: document count, IDF per term
/// and the Euclidean norm of every document vector under one weighting scheme.
#[derive(Debug, Clone)]
pub struct CorpusStats<D> {
    pub num_docs: usize,
    pub idf: HashMap<String, f32>,
    pub doc_norms: HashMap<D, f32>,
}

impl<D: Eq + Hash + Clone> CorpusStats<D> {
    /// IDF for every indexed term; norms only when a scheme is given.
    pub fn build(index: &InvertedIndex<D>, scheme: Option<WeightingScheme>) -> Self {
        let num_docs = index.num_docs();
        let idf = idf_table(index, num_docs);
        let doc_norms = match scheme {
            Some(scheme) => doc_norms(index, &idf, scheme),
            None => HashMap::new(),
        };
        tracing::debug!(num_docs, num_terms = idf.len(), normed_docs = doc_norms.len(), "computed corpus statistics");
        Self { num_docs, idf, doc_norms }
    }

    /// IDF of `term`, 0 for terms not in the index.
    pub fn idf(&self, term: &str) -> f32 { self.idf.get(term).copied().unwrap_or(0.0) }
}

fn idf_table<D: Eq + Hash + Clone>(index: &InvertedIndex<D>, num_docs: usize) -> HashMap<String, f32> {
    let mut table = HashMap::with_capacity(index.num_terms());
    for (term, postings) in index.iter() {
        let df = postings.len();
        if df == 0 {
            tracing::warn!(term, "term has empty postings; idf set to 0");
        }
        table.insert(term.to_string(), idf(num_docs, df));
    }
    table
}

/// Accumulate squared term weights per document, then take the square root once every term is folded in.
fn doc_norms<D: Eq + Hash + Clone>(
    index: &InvertedIndex<D>,
    idf: &HashMap<String, f32>,
    scheme: WeightingScheme,
) -> HashMap<D, f32> {
    let mut sums: HashMap<D, f32> = HashMap::new();
    let mut zero_tf = 0usize;
    for (term, postings) in index.iter() {
        let term_idf = idf.get(term).copied().unwrap_or(0.0);
        for (doc_id, &tf) in postings {
            match scheme.weight(tf, term_idf) {
                Some(w) => *sums.entry(doc_id.clone()).or_insert(0.0) += w * w,
                None => zero_tf += 1,
            }
        }
    }
    if zero_tf > 0 {
        tracing::warn!(zero_tf, "postings with zero term frequency treated as absent");
    }
    sums.into_iter().map(|(doc_id, sum)| (doc_id, sum.sqrt())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets() -> InvertedIndex {
        [("cat", 1, 2), ("cat", 2, 1), ("dog", 2, 3)].into_iter().collect()
    }

    #[test]
    fn idf_is_base10_ratio() {
        let stats = CorpusStats::build(&pets(), None);
        assert_eq!(stats.num_docs, 2);
        assert_eq!(stats.idf("cat"), 0.0);
        assert!((stats.idf("dog") - 2f32.log10()).abs() < 1e-6);
        assert_eq!(stats.idf("bird"), 0.0);
        assert!(stats.doc_norms.is_empty());
    }

    #[test]
    fn binary_norm_counts_distinct_terms() {
        let stats = CorpusStats::build(&pets(), Some(WeightingScheme::Binary));
        assert_eq!(stats.doc_norms[&1], 1.0);
        assert!((stats.doc_norms[&2] - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn tf_norm_uses_log_weights() {
        let stats = CorpusStats::build(&pets(), Some(WeightingScheme::Tf));
        let w_cat = 1.0 + 2f32.log10();
        assert!((stats.doc_norms[&1] - w_cat).abs() < 1e-6);
        let w_dog = 1.0 + 3f32.log10();
        assert!((stats.doc_norms[&2] - (1.0 + w_dog * w_dog).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn tfidf_norm_zero_when_every_term_is_ubiquitous() {
        let stats = CorpusStats::build(&pets(), Some(WeightingScheme::TfIdf));
        // doc 1 only holds "cat", which appears in every document
        assert_eq!(stats.doc_norms[&1], 0.0);
        assert!(stats.doc_norms[&2] > 0.0);
    }

    #[test]
    fn empty_postings_get_zero_idf() {
        let mut raw = HashMap::new();
        raw.insert("ghost".to_string(), HashMap::<u32, u32>::new());
        raw.insert("cat".to_string(), HashMap::from([(1u32, 1u32)]));
        let stats = CorpusStats::build(&InvertedIndex::from(raw), Some(WeightingScheme::TfIdf));
        assert_eq!(stats.idf("ghost"), 0.0);
        assert_eq!(stats.num_docs, 1);
    }

    #[test]
    fn zero_frequency_postings_are_skipped() {
        let idx: InvertedIndex = [("cat", 1, 0), ("dog", 1, 1), ("dog", 2, 1)].into_iter().collect();
        let stats = CorpusStats::build(&idx, Some(WeightingScheme::Binary));
        assert_eq!(stats.doc_norms[&1], 1.0);
    }
}
