use serde::{Deserialize, Serialize};

use crate::screening::normalizer::{normalize, require_text};

/// A document whose text could not be obtained from its source.
///
/// Failures are carried as data: the pipeline excludes the document from the
/// ranking and reports it alongside the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionFailure {
    pub candidate_id: String,
    pub reason: String,
}

impl ExtractionFailure {
    pub fn new(candidate_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            reason: reason.into(),
        }
    }
}

/// A candidate as handed to the pipeline: an id plus either extracted text
/// or the reason extraction failed.
#[derive(Debug, Clone)]
pub struct CandidateInput {
    pub id: String,
    pub text: Result<String, ExtractionFailure>,
}

impl CandidateInput {
    #[allow(dead_code)]
    pub fn extracted(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Ok(text.into()),
        }
    }

    /// Wraps text that may be absent, e.g. a JSON `null` or a PDF page with no
    /// text layer.
    pub fn from_optional(id: impl Into<String>, text: Option<String>) -> Self {
        let id = id.into();
        let text = require_text(&id, text);
        Self { id, text }
    }

    #[allow(dead_code)]
    pub fn failed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        let id = id.into();
        let failure = ExtractionFailure::new(id.clone(), reason);
        Self { id, text: Err(failure) }
    }
}

/// An extracted document. Raw and normalized text are both kept for the
/// lifetime of a screening run.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    ordinal: usize,
    raw_text: String,
    normalized_text: String,
}

impl Document {
    /// Builds a document from extracted text. `ordinal` is the submission
    /// position and is used as the ranking tie-break.
    pub fn new(id: impl Into<String>, ordinal: usize, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let normalized_text = normalize(&raw_text);
        Self {
            id: id.into(),
            ordinal,
            raw_text,
            normalized_text,
        }
    }

    /// Builds a document from a candidate, surfacing the extraction failure
    /// when the source text is missing.
    pub fn from_input(input: CandidateInput, ordinal: usize) -> Result<Self, ExtractionFailure> {
        let raw_text = input.text?;
        Ok(Self::new(input.id, ordinal, raw_text))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[allow(dead_code)]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn normalized_text(&self) -> &str {
        &self.normalized_text
    }
}
