//! Screening pipeline — reference + candidates in, ranked report out.
//!
//! Flow per run:
//! 1. Build the vector space from the reference (empty vocabulary is not fatal)
//! 2. For each candidate in submission order: normalize, score, extract attributes
//! 3. Fold successes into score records and failures into a failure list
//! 4. Rank and summarize
//!
//! Candidates are independent of each other; a failed extraction only
//! removes that candidate from the ranking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::document::{CandidateInput, Document, ExtractionFailure};
use crate::screening::attributes::AttributeExtractor;
use crate::screening::ranking::{RankedResultSet, ScoreRecord, Summary};
use crate::screening::similarity::score;
use crate::screening::vectorizer::{VectorSpace, VectorizeError};

/// Default number of top candidates listed in the summary shortlist.
pub const DEFAULT_SHORTLIST_SIZE: usize = 2;

/// Per-run settings.
#[derive(Debug, Clone)]
pub struct ScreeningOptions {
    pub extractor: AttributeExtractor,
    pub shortlist_size: usize,
}

/// A top-ranked candidate together with the text it was scored on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistedCandidate {
    pub candidate_id: String,
    pub score: f64,
    pub text: String,
}

/// Full output of one screening run.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Normalized reference text the vocabulary was built from.
    pub reference_text: String,
    pub vocabulary_size: usize,
    pub ranked: RankedResultSet,
    /// Best `shortlist_size` candidates with their normalized text.
    pub shortlisted: Vec<ShortlistedCandidate>,
    pub failures: Vec<ExtractionFailure>,
    pub summary: Summary,
}

/// Scores every candidate against `reference` and returns the ranked report.
pub fn screen(
    reference: &Document,
    candidates: Vec<CandidateInput>,
    options: &ScreeningOptions,
) -> ScreeningReport {
    let space = match VectorSpace::build(reference.normalized_text()) {
        Ok(space) => Some(space),
        Err(VectorizeError::EmptyVocabulary) => {
            warn!(
                "Reference '{}' has no vocabulary terms; every candidate will score 0",
                reference.id()
            );
            None
        }
    };
    let vocabulary_size = space.as_ref().map_or(0, VectorSpace::len);

    info!(
        "Screening {} candidates against '{}' ({} vocabulary terms, {} skills)",
        candidates.len(),
        reference.id(),
        vocabulary_size,
        options.extractor.skills().len()
    );

    let (documents, failures) = candidates.into_iter().enumerate().fold(
        (Vec::new(), Vec::new()),
        |(mut documents, mut failures), (ordinal, input)| {
            match Document::from_input(input, ordinal) {
                Ok(document) => documents.push(document),
                Err(failure) => {
                    warn!(
                        "Skipping candidate '{}': {}",
                        failure.candidate_id, failure.reason
                    );
                    failures.push(failure);
                }
            }
            (documents, failures)
        },
    );

    let records = documents
        .iter()
        .map(|document| score_document(document, space.as_ref(), &options.extractor))
        .collect();
    let ranked = RankedResultSet::rank(records);
    let summary = ranked.summary(options.shortlist_size);
    let shortlisted = shortlist(&ranked, &documents, options.shortlist_size);

    info!(
        "Screening complete: {} ranked, {} failed",
        ranked.len(),
        failures.len()
    );

    ScreeningReport {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        reference_text: reference.normalized_text().to_string(),
        vocabulary_size,
        ranked,
        shortlisted,
        failures,
        summary,
    }
}

/// Scores and extracts attributes for one document.
pub fn score_document(
    document: &Document,
    space: Option<&VectorSpace>,
    extractor: &AttributeExtractor,
) -> ScoreRecord {
    let text = document.normalized_text();
    let similarity = space.map_or(0.0, |space| {
        score(space.reference_vector(), &space.project(text))
    });
    debug!("Candidate '{}' scored {similarity}", document.id());

    ScoreRecord {
        candidate_id: document.id().to_string(),
        ordinal: document.ordinal(),
        score: similarity,
        attributes: extractor.extract(text),
    }
}

/// Pairs the top `n` records with the documents they were scored from,
/// matched on ordinal.
fn shortlist(
    ranked: &RankedResultSet,
    documents: &[Document],
    n: usize,
) -> Vec<ShortlistedCandidate> {
    ranked
        .top(n)
        .iter()
        .filter_map(|record| {
            documents
                .iter()
                .find(|d| d.ordinal() == record.ordinal)
                .map(|document| ShortlistedCandidate {
                    candidate_id: record.candidate_id.clone(),
                    score: record.score,
                    text: document.normalized_text().to_string(),
                })
        })
        .collect()
}
