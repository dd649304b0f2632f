// Screening pipeline: normalization, vectorization, similarity, attribute
// extraction and ranking, plus the PDF and HTTP edges around it.
// The pipeline itself is synchronous and holds no state between runs.

pub mod attributes;
pub mod extraction;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod ranking;
pub mod similarity;
pub mod vectorizer;
