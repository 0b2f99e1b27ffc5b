use ndarray::ArrayView1;

/// Score assigned to a pair where either side has no embeddable tokens.
/// Sidesteps the zero-length average rather than claiming real similarity.
pub const EMPTY_SENTENCE_FALLBACK: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentResult {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

// For each probe vector, the best raw dot product against every
// candidate, averaged over the probes. The running maximum starts as
// "no value yet" instead of a numeric sentinel, and only a strictly
// greater similarity replaces it, so the first-seen candidate wins ties.
fn mean_best_match(probes: &[ArrayView1<f64>], candidates: &[ArrayView1<f64>]) -> f64 {
    let mut sum = 0.0;
    for probe in probes {
        let mut best: Option<f64> = None;
        for candidate in candidates {
            let similarity = probe.dot(candidate);
            if best.map_or(true, |b| similarity > b) {
                best = Some(similarity);
            }
        }
        // empty sides never reach this point, see alignment_score
        sum += best.expect("at least one candidate");
    }
    sum / probes.len() as f64
}

/// Greedy bidirectional best-match alignment. Recall averages each
/// source vector's best match among the targets; precision is the same
/// with the roles swapped. Matches are not mutually exclusive and every
/// pairwise dot product is evaluated, O(|src|·|tgt|·d).
///
/// Returns `None` when either side is empty; the triple is undefined
/// there and callers fall back to [`EMPTY_SENTENCE_FALLBACK`].
pub fn alignment_score(
    src: &[ArrayView1<f64>],
    tgt: &[ArrayView1<f64>],
) -> Option<AlignmentResult> {
    if src.is_empty() || tgt.is_empty() {
        return None;
    }

    let recall = mean_best_match(src, tgt);
    let precision = mean_best_match(tgt, src);

    // Dot products can be negative, so P + R can reach zero or below;
    // the harmonic mean is meaningless there and collapses to 0.
    let f1 = if precision + recall <= 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    Some(AlignmentResult {
        precision,
        recall,
        f1,
    })
}

/// The per-sentence score: F1 of the alignment, or the fallback when
/// either side vectorized to nothing.
pub fn sentence_score(src: &[ArrayView1<f64>], tgt: &[ArrayView1<f64>]) -> f64 {
    match alignment_score(src, tgt) {
        Some(result) => result.f1,
        None => EMPTY_SENTENCE_FALLBACK,
    }
}
