use crate::index::{DocId, InvertedIndex};
use crate::stats::CorpusStats;
use crate::weighting::{norm, term_counts, WeightingScheme};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Ranks documents of an immutable inverted index against pre-tokenized queries
/// by cosine similarity under one weighting scheme.
///
/// All corpus statistics are computed in the constructor; queries only read them,
/// so a `Retriever` can be shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Retriever<D = DocId> {
    index: InvertedIndex<D>,
    scheme: Option<WeightingScheme>,
    scheme_name: String,
    stats: CorpusStats<D>,
}

impl<D: Eq + Hash + Ord + Clone> Retriever<D> {
    pub fn new(index: InvertedIndex<D>, scheme: WeightingScheme) -> Self {
        Self::build(index, Some(scheme), scheme.as_str().to_string())
    }

    /// Construct from a scheme name such as `"tfidf"`.
    ///
    /// Unknown names are accepted; every query on such a retriever returns an empty ranking.
    pub fn with_scheme_name(index: InvertedIndex<D>, name: &str) -> Self {
        let scheme = match name.parse::<WeightingScheme>() {
            Ok(scheme) => Some(scheme),
            Err(err) => {
                tracing::warn!(error = %err, "retriever will answer every query with an empty ranking");
                None
            }
        };
        Self::build(index, scheme, name.to_string())
    }

    fn build(index: InvertedIndex<D>, scheme: Option<WeightingScheme>, scheme_name: String) -> Self {
        let stats = CorpusStats::build(&index, scheme);
        tracing::debug!(scheme = %scheme_name, num_docs = stats.num_docs, num_terms = index.num_terms(), "retriever ready");
        Self { index, scheme, scheme_name, stats }
    }

    /// `None` when constructed from an unrecognised scheme name.
    pub fn scheme(&self) -> Option<WeightingScheme> { self.scheme }

    pub fn scheme_name(&self) -> &str { &self.scheme_name }

    pub fn num_docs(&self) -> usize { self.stats.num_docs }

    pub fn idf(&self, term: &str) -> f32 { self.stats.idf(term) }

    pub fn doc_norm(&self, doc_id: &D) -> Option<f32> { self.stats.doc_norms.get(doc_id).copied() }

    /// Weight vector of a query, built from its own term counts with the document transform.
    ///
    /// Terms missing from the index are skipped and do not count toward the query norm.
    pub fn query_vector<S: AsRef<str>>(&self, query: &[S]) -> HashMap<String, f32> {
        let Some(scheme) = self.scheme else { return HashMap::new() };
        term_counts(query)
            .into_iter()
            .filter(|(term, _)| self.index.postings(term).is_some())
            .filter_map(|(term, tf)| scheme.weight(tf, self.stats.idf(term)).map(|w| (term.to_string(), w)))
            .collect()
    }

    /// Document identifiers most relevant first; empty when nothing matches or the scheme is unknown.
    pub fn for_query<S: AsRef<str>>(&self, query: &[S]) -> Vec<D> {
        self.rank_with_scores(query).into_iter().map(|(doc_id, _)| doc_id).collect()
    }

    /// The first `k` entries of [`Retriever::rank_with_scores`].
    pub fn top_k<S: AsRef<str>>(&self, query: &[S], k: usize) -> Vec<(D, f32)> {
        let mut ranked = self.rank_with_scores(query);
        ranked.truncate(k);
        ranked
    }

    /// Every candidate document with its cosine score, sorted by descending score
    /// and then by ascending document identifier.
    pub fn rank_with_scores<S: AsRef<str>>(&self, query: &[S]) -> Vec<(D, f32)> {
        let Some(scheme) = self.scheme else {
            tracing::warn!(scheme = %self.scheme_name, "unknown term weighting scheme; returning empty ranking");
            return Vec::new();
        };

        let q_weights = self.query_vector(query);
        let mut q_norm = norm(q_weights.values());
        // degenerate all-zero query
        if q_norm == 0.0 { q_norm = 1.0; }

        // Dot products over candidates: every doc in the postings of some query term.
        let mut dots: HashMap<&D, f32> = HashMap::new();
        for (term, q_w) in q_weights.iter() {
            let Some(postings) = self.index.postings(term) else { continue };
            let term_idf = self.stats.idf(term);
            for (doc_id, &tf) in postings {
                let d_w = scheme.weight(tf, term_idf).unwrap_or(0.0);
                *dots.entry(doc_id).or_insert(0.0) += q_w * d_w;
            }
        }
        if dots.is_empty() {
            tracing::debug!(terms = query.len(), "no query term matched the index");
            return Vec::new();
        }

        let mut scored: Vec<(D, f32)> = dots
            .into_iter()
            .map(|(doc_id, dot)| {
                let d_norm = self.stats.doc_norms.get(doc_id).copied().unwrap_or(1.0);
                (doc_id.clone(), cosine(dot, q_norm, d_norm))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then_with(|| a.0.cmp(&b.0)));
        tracing::debug!(scheme = %scheme, hits = scored.len(), "ranked query");
        scored
    }
}

/// `dot / (q_norm * d_norm)`, 0 when either norm is not positive, clamped to [0, 1].
fn cosine(dot: f32, q_norm: f32, d_norm: f32) -> f32 {
    if q_norm <= 0.0 || d_norm <= 0.0 {
        return 0.0;
    }
    (dot / (q_norm * d_norm)).clamp(0.0, 1.0)
}
