use futures::future::join_all;
use ndarray::ArrayView1;
use tokio::runtime::Runtime;

use crate::align::sentence_score;
use crate::embeddings::EmbeddingTable;
use crate::error::ScoreError;
use crate::vectorize::sentence_vectors;

/// One corpus line pair, vectorized against the two vector spaces. The
/// source and target tables are separate: cross-lingual spaces are only
/// individually consistent, never assumed shared.
pub struct SentencePair<'t> {
    src: Vec<ArrayView1<'t, f64>>,
    tgt: Vec<ArrayView1<'t, f64>>,
}

impl<'t> SentencePair<'t> {
    pub fn from_lines(
        src_line: &str,
        tgt_line: &str,
        src_table: &'t EmbeddingTable,
        tgt_table: &'t EmbeddingTable,
    ) -> Self {
        SentencePair {
            src: sentence_vectors(src_line, src_table),
            tgt: sentence_vectors(tgt_line, tgt_table),
        }
    }

    pub fn score(&self) -> f64 {
        sentence_score(&self.src, &self.tgt)
    }
}

/// Scores two parallel corpora line by line, one score per pair, in
/// input order. Pairs share nothing but the read-only tables, so each
/// one scores in its own task.
pub async fn score_corpus(
    src_lines: &[String],
    tgt_lines: &[String],
    src_table: &EmbeddingTable,
    tgt_table: &EmbeddingTable,
) -> Result<Vec<f64>, ScoreError> {
    if src_lines.len() != tgt_lines.len() {
        return Err(ScoreError::CorpusLength {
            src_lines: src_lines.len(),
            tgt_lines: tgt_lines.len(),
        });
    }
    tracing::info!(pairs = src_lines.len(), "scoring parallel corpus");

    let mut pairs = Vec::with_capacity(src_lines.len());
    for (src_line, tgt_line) in src_lines.iter().zip(tgt_lines.iter()) {
        pairs.push(SentencePair::from_lines(
            src_line, tgt_line, src_table, tgt_table,
        ));
    }

    let tasks = pairs.into_iter().map(|pair| async move { pair.score() });
    Ok(join_all(tasks).await)
}

/// Synchronous entry point for callers without a runtime of their own.
pub fn score_corpus_blocking(
    src_lines: &[String],
    tgt_lines: &[String],
    src_table: &EmbeddingTable,
    tgt_table: &EmbeddingTable,
) -> Result<Vec<f64>, ScoreError> {
    let rt = Runtime::new().expect("Failed to create async runtime");
    rt.block_on(score_corpus(src_lines, tgt_lines, src_table, tgt_table))
}
