//! PDF text extraction. Only the first page of each document is read.

use std::panic;

use tracing::debug;

use crate::models::document::{CandidateInput, ExtractionFailure};

/// Text of the first page of an in-memory PDF.
///
/// Parse errors and parser panics both come back as an `ExtractionFailure`
/// for `id`. A first page without a text layer yields an empty string.
pub fn extract_first_page(id: &str, bytes: &[u8]) -> Result<String, ExtractionFailure> {
    if bytes.is_empty() {
        return Err(ExtractionFailure::new(id, "empty upload"));
    }

    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| ExtractionFailure::new(id, "PDF parser aborted on malformed input"))?
        .map_err(|e| ExtractionFailure::new(id, format!("unreadable PDF: {e:?}")))?;

    debug!("Extracted {} pages from '{id}'", pages.len());

    pages
        .into_iter()
        .next()
        .ok_or_else(|| ExtractionFailure::new(id, "document has no pages"))
}

/// Runs `extract_first_page` on the blocking pool so a slow parse does not
/// stall the runtime.
pub async fn extract_candidate(id: String, bytes: Vec<u8>) -> CandidateInput {
    let task_id = id.clone();
    let text = tokio::task::spawn_blocking(move || extract_first_page(&task_id, &bytes))
        .await
        .unwrap_or_else(|e| {
            Err(ExtractionFailure::new(
                id.clone(),
                format!("extraction task failed: {e}"),
            ))
        });
    CandidateInput { id, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bytes_is_failure() {
        let failure = extract_first_page("resume.pdf", &[]).unwrap_err();
        assert_eq!(failure.candidate_id, "resume.pdf");
        assert_eq!(failure.reason, "empty upload");
    }

    #[test]
    fn test_non_pdf_bytes_is_failure() {
        let failure = extract_first_page("notes.txt", b"just some plain text").unwrap_err();
        assert_eq!(failure.candidate_id, "notes.txt");
    }

    #[tokio::test]
    async fn test_extract_candidate_keeps_id_on_failure() {
        let input = extract_candidate("broken.pdf".to_string(), b"%PDF-garbage".to_vec()).await;
        assert_eq!(input.id, "broken.pdf");
        assert!(input.text.is_err());
    }
}
