//! Text normalization applied to every extracted document before scoring.
//!
//! Lowercasing is the only transformation. Word boundaries are left to the
//! vectorizer's tokenizer; there is no stemming or stop-word removal.

use crate::models::document::ExtractionFailure;

/// Reason recorded when a source yielded no text at all.
pub const MISSING_TEXT_REASON: &str = "no extractable text";

/// Lowercases extracted text.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Returns the raw text, or an `ExtractionFailure` naming `id` when the
/// source produced nothing. An empty string is valid text, not a failure.
pub fn require_text(id: &str, raw: Option<String>) -> Result<String, ExtractionFailure> {
    raw.ok_or_else(|| ExtractionFailure::new(id, MISSING_TEXT_REASON))
}
