pub mod scoring;

use std::num::NonZeroUsize;

use num::Float;
use rayon::prelude::*;
use tracing::trace;

use crate::{
    utils::math::vector::SparseVec,
    vectorizer::{
        evaluate::scoring::{compare_desc, HitEntry, Hits},
        tfidf::TFIDFEngine,
        Index,
    },
};

/// Query ranking
impl<N, E> Index<N, E>
where
    N: Float + Into<f64> + Send + Sync,
    E: TFIDFEngine<N> + Send + Sync,
{
    /// Score every corpus row against `query_text`.
    ///
    /// Rows are unit length and the query is projected to unit length,
    /// so cosine similarity is the dot product. A query with no
    /// vocabulary term scores 0 against every row.
    ///
    /// # Returns
    /// * `Hits` - one entry per row, sorted by descending score,
    ///   ties by ascending row
    pub fn score(&self, query_text: &str) -> Hits {
        self.top_hits(query_text, self.doc_num())
    }

    /// Top `top_k` scored rows
    ///
    /// # Returns
    /// * `Hits` - `min(top_k, corpus size)` entries
    pub fn rank_hits(&self, query_text: &str, top_k: NonZeroUsize) -> Hits {
        self.top_hits(query_text, top_k.get())
    }

    /// Recommend careers for `query_text`
    ///
    /// # Arguments
    /// * `query_text` - free text; empty or unknown words are allowed
    /// * `top_k` - maximum number of names to return
    ///
    /// # Returns
    /// * `Vec<String>` - `min(top_k, corpus size)` career names, most similar first.
    ///   Names are not deduplicated.
    pub fn rank(&self, query_text: &str, top_k: NonZeroUsize) -> Vec<String> {
        self.rank_hits(query_text, top_k).names()
    }

    /// Select and order the best `limit` rows.
    /// Names are cloned only for the rows that are kept.
    fn top_hits(&self, query_text: &str, limit: usize) -> Hits {
        let query = self.project(query_text);
        let mut scored: Vec<(usize, f64)> = self
            .cosine_scores(&query)
            .into_iter()
            .enumerate()
            .collect();
        trace!(terms = query.nnz(), rows = scored.len(), "scored query");

        if limit == 0 {
            return Hits::default();
        }
        if limit < scored.len() {
            scored.select_nth_unstable_by(limit - 1, |&a, &b| compare_desc(a, b));
            scored.truncate(limit);
        }
        scored.sort_unstable_by(|&a, &b| compare_desc(a, b));

        Hits::new(
            scored
                .into_iter()
                .map(|(row, score)| HitEntry {
                    row,
                    name: self.corpus()[row].name.clone(),
                    score,
                })
                .collect(),
        )
    }

    /// Cosine similarity of `query` with every row, in row order
    fn cosine_scores(&self, query: &SparseVec<N>) -> Vec<f64> {
        if query.is_zero() {
            return vec![0.0; self.doc_num()];
        }
        let dot = |row: &SparseVec<N>| -> f64 { query.dot(row) };
        if self.doc_num() >= self.parallel_threshold() {
            self.matrix().par_iter().map(dot).collect()
        } else {
            self.matrix().iter().map(dot).collect()
        }
    }
}
