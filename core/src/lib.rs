//! Vector-space ranking over a pre-built inverted index.
//!
//! The index maps each term to per-document raw term frequencies. A [`Retriever`]
//! weights both documents and queries with one [`WeightingScheme`] (binary,
//! log-scaled tf, or tf-idf) and ranks candidate documents by cosine similarity.

pub mod index;
pub mod retriever;
pub mod stats;
pub mod weighting;

pub use index::{DocId, InvertedIndex, Postings};
pub use retriever::Retriever;
pub use stats::CorpusStats;
pub use weighting::WeightingScheme;
