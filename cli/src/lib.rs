use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::hash::Hash;
use std::path::PathBuf;
use std::time::Instant;
use vsm_core::{DocId, InvertedIndex, Retriever};

#[derive(Parser, Debug)]
#[command(name = "vsm")]
#[command(about = "Rank the documents of an inverted index against one pre-tokenized query", long_about = None)]
pub struct Args {
    /// Inverted index as JSON: {"term": {"doc_id": tf, ...}, ...}
    #[arg(long)]
    pub index: PathBuf,
    /// Term weighting scheme: binary, tf or tfidf
    #[arg(long, default_value = "tfidf")]
    pub scheme: String,
    /// Only print the first k documents
    #[arg(long)]
    pub k: Option<usize>,
    /// Include cosine scores in the output
    #[arg(long, default_value_t = false)]
    pub scores: bool,
    /// Query terms, already normalized and stemmed
    pub terms: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub scheme: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<RankedDoc>,
}

#[derive(Debug, Serialize)]
pub struct RankedDoc {
    pub doc_id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

/// Load the index named by `args` and rank its documents for `args.terms`.
///
/// Document ids are read as integers when every id parses as one, as strings otherwise.
pub fn run(args: &Args) -> Result<RankResponse> {
    let raw = fs::read_to_string(&args.index).with_context(|| format!("reading index {}", args.index.display()))?;
    match serde_json::from_str::<InvertedIndex<DocId>>(&raw) {
        Ok(index) => rank(index, args),
        Err(int_err) => {
            tracing::debug!(error = %int_err, "doc ids are not all integers; retrying with string ids");
            let index: InvertedIndex<String> = serde_json::from_str(&raw).with_context(|| {
                format!("parsing index {} (as integer ids: {int_err})", args.index.display())
            })?;
            rank(index, args)
        }
    }
}

fn rank<D: Eq + Hash + Ord + Clone + Serialize>(index: InvertedIndex<D>, args: &Args) -> Result<RankResponse> {
    let retriever = Retriever::with_scheme_name(index, &args.scheme);
    tracing::info!(scheme = %args.scheme, num_docs = retriever.num_docs(), "index loaded");

    let start = Instant::now();
    let ranked = retriever.rank_with_scores(&args.terms);
    let took_s = start.elapsed().as_secs_f64();
    let total_hits = ranked.len();
    let k = args.k.unwrap_or(total_hits);

    let mut results = Vec::with_capacity(k.min(total_hits));
    for (doc_id, score) in ranked.into_iter().take(k) {
        results.push(RankedDoc { doc_id: serde_json::to_value(doc_id)?, score: args.scores.then_some(score) });
    }
    tracing::info!(total_hits, took_s, "query ranked");
    Ok(RankResponse { scheme: args.scheme.clone(), took_s, total_hits, results })
}
