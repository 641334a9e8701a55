//! Term weighting schemes shared by documents and queries.
//!
//! A scheme is applied identically to both sides of the cosine: documents are
//! weighted from their postings, queries from their own term counts.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightingScheme {
    /// 1 for every present term.
    Binary,
    /// `1 + log10(tf)`.
    Tf,
    /// `(1 + log10(tf)) * idf(term)`.
    TfIdf,
}

impl WeightingScheme {
    pub const ALL: [WeightingScheme; 3] = [Self::Binary, Self::Tf, Self::TfIdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Tf => "tf",
            Self::TfIdf => "tfidf",
        }
    }

    /// Weight of a term occurring `tf` times, or `None` when the term is absent (`tf == 0`).
    ///
    /// `idf` is ignored by the schemes that do not use it.
    pub fn weight(&self, tf: u32, idf: f32) -> Option<f32> {
        if tf == 0 {
            return None;
        }
        let w = match self {
            Self::Binary => 1.0,
            Self::Tf => log_tf(tf),
            Self::TfIdf => log_tf(tf) * idf,
        };
        Some(w)
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for WeightingScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Self::Binary),
            "tf" => Ok(Self::Tf),
            "tfidf" => Ok(Self::TfIdf),
            other => bail!("unknown term weighting scheme {other:?} (expected binary, tf or tfidf)"),
        }
    }
}

/// Sublinear term frequency, `1 + log10(tf)`, for `tf > 0`.
#[inline]
pub fn log_tf(tf: u32) -> f32 { 1.0 + (tf as f32).log10() }

/// `log10(num_docs / df)`; 0 when `df == 0` so malformed terms contribute nothing.
#[inline]
pub fn idf(num_docs: usize, df: usize) -> f32 {
    if df == 0 || num_docs == 0 {
        return 0.0;
    }
    (num_docs as f32 / df as f32).log10()
}

/// Count repeated terms of a pre-tokenized query.
pub fn term_counts<S: AsRef<str>>(query: &[S]) -> HashMap<&str, u32> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for term in query {
        *counts.entry(term.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Euclidean norm of a sparse weight vector.
pub fn norm<'a>(weights: impl IntoIterator<Item = &'a f32>) -> f32 {
    weights.into_iter().map(|w| w * w).sum::<f32>().sqrt()
}
