//! Similarity Scorer — cosine similarity between term-frequency vectors,
//! reported as a percentage rounded to two decimals.

use crate::screening::vectorizer::TermVector;

/// Cosine similarity of `reference` and `candidate` scaled to [0, 100].
///
/// Returns 0.0 when either vector has zero norm (empty vocabulary, or a
/// candidate that shares no terms with the reference).
pub fn score(reference: &TermVector, candidate: &TermVector) -> f64 {
    let cosine = cosine_similarity(reference.counts(), candidate.counts());
    round_percent(cosine * 100.0)
}

fn cosine_similarity(a: &[u32], b: &[u32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| f64::from(x) * f64::from(y))
        .sum();
    let norm_a = a.iter().map(|&x| f64::from(x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|&y| f64::from(y).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn round_percent(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 100.0)
}
